//! Line sources and their capability tiers.
//!
//! This module provides:
//! - `DataSource`, `AsyncDataSource`, `AsyncStreamingDataSource`: the three tiers
//! - `Provider`: a source tagged with the richest tier it implements
//! - Built-in sources: in-memory, file, HTTP (feature `http`) and null
//! - The shared fallback functions used by the default tier methods

mod file;
mod memory;
mod null;
mod provider;
mod tier;

pub use file::FileSource;
pub use memory::InMemorySource;
pub use null::NullSource;
pub use provider::Provider;
pub use tier::{
    AsyncDataSource, AsyncStreamingDataSource, Capabilities, DataSource, LineStream, Lines,
    SourceKind, Tier, retrieve_off_thread, stream_from_async, stream_from_sync,
};

// HTTP support
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpSource;
