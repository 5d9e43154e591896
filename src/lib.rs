//! # multisource
//!
//! Tiered line sources with interchangeable providers.
//!
//! ## Overview
//!
//! multisource provides:
//! - **Three capability tiers**: synchronous retrieval, asynchronous batch
//!   retrieval and asynchronous streaming, with default fallbacks between them
//! - **Built-in providers**: in-memory, file, HTTP (JSON array of strings) and a
//!   null object for unconfigured slots
//! - **Capability descriptor**: `Provider` tags each source with the richest tier
//!   it implements, so callers never inspect concrete types
//! - **Driver**: drains an ordered list of optional providers into a report
//! - **Error handling**: Configurable error policies (FastFail or Accumulate)
//! - **Configuration**: Define source lists via YAML/JSON config files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use multisource::{ErrorPolicy, SourcesBuilder};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let driver = SourcesBuilder::new()
//!         .add_memory("greeting", ["In", "Memory", "Data", "Source"])
//!         .add_file("lines.txt")
//!         .add_absent()
//!         .with_mode(ErrorPolicy::FastFail)
//!         .build()?;
//!
//!     driver.run(&mut tokio::io::stdout()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Tier semantics
//!
//! - `DataSource::retrieve` is mandatory and returns the whole sequence.
//! - `AsyncDataSource::retrieve_async` defaults to running `retrieve` on tokio's
//!   blocking pool.
//! - `AsyncStreamingDataSource::retrieve_stream` defaults to awaiting
//!   `retrieve_async` and yielding each line. A provider wrapped at the sync tier
//!   streams by calling `retrieve` directly.
//! - Streams are finite and single-pass; every call re-runs retrieval.
//! - Only `FileSource` streams incrementally. The other providers materialize the
//!   full sequence before the first line is yielded.
//!
//! ## Features
//!
//! - `http` - HTTP provider backed by reqwest (enabled by default)
//! - `yaml` - YAML configuration files (enabled by default)
//! - `miette` - Pretty error reporting with miette

// Core modules
pub mod builder;
pub mod config;
pub mod driver;
pub mod error;
pub mod source;

// Re-exports for convenience
pub use builder::SourcesBuilder;
pub use config::{SourceConfig, SourcesConfig};
pub use driver::Driver;
pub use error::{AggregateError, ArgumentError, ErrorPolicy, SourceError, Stage};
#[cfg(feature = "http")]
pub use source::HttpSource;
pub use source::{
    AsyncDataSource, AsyncStreamingDataSource, Capabilities, DataSource, FileSource,
    InMemorySource, LineStream, Lines, NullSource, Provider, SourceKind, Tier,
};

/// Build a Driver from a SourcesConfig.
pub fn build_driver_from_config(config: SourcesConfig) -> Result<Driver, AggregateError> {
    SourcesBuilder::from_config(config)?.build()
}

/// Build a Driver from a SourcesConfig, allowing the caller to further
/// customize the SourcesBuilder before it is built. This is the hook point
/// for sharing an HTTP client or appending pre-built providers.
pub fn build_driver_from_config_with<F>(
    config: SourcesConfig,
    customize: F,
) -> Result<Driver, AggregateError>
where
    F: FnOnce(SourcesBuilder) -> SourcesBuilder,
{
    let builder = SourcesBuilder::from_config(config)?;
    customize(builder).build()
}

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::SourceDiagnostic;
