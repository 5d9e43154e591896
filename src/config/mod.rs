//! Configuration types for source lists.
//!
//! This module provides:
//! - `SourcesConfig`: An ordered list of optional source slots plus an error policy
//! - `SourceConfig`: Configuration for a single source

mod sources;

pub use sources::{SourceConfig, SourcesConfig};
