//! Error types and policies for multisource.
//!
//! This module provides:
//! - `ErrorPolicy`: Controls whether a run fails fast or accumulates errors
//! - `Stage`: Indicates where an error occurred (construction, fetch, decode, ...)
//! - `SourceError`: A single source error with context
//! - `ArgumentError`: Causes for construction and resolution failures
//! - `AggregateError`: A collection of errors when using `Accumulate` policy

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error encountered
    #[default]
    FastFail,
    /// Isolate failing sources, keep going and return all errors together
    Accumulate,
}

impl ErrorPolicy {
    /// Parse a policy from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fast_fail" | "fastfail" | "fast-fail" => Some(ErrorPolicy::FastFail),
            "accumulate" => Some(ErrorPolicy::Accumulate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Invalid or missing constructor argument
    Construct,
    /// Unknown or disabled source kind in configuration
    Resolve,
    /// Error while opening the backing file
    Open,
    Read,
    /// HTTP transport failure or non-success status
    Fetch,
    /// Payload is not a JSON array of strings
    Decode,
    /// Blocking retrieval task panicked or was cancelled
    Join,
    /// Error while writing the report
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Construct => write!(f, "Construct"),
            Stage::Resolve => write!(f, "Resolve"),
            Stage::Open => write!(f, "Open"),
            Stage::Read => write!(f, "Read"),
            Stage::Fetch => write!(f, "Fetch"),
            Stage::Decode => write!(f, "Decode"),
            Stage::Join => write!(f, "Join"),
            Stage::Write => write!(f, "Write"),
        }
    }
}

#[derive(Debug)]
pub struct SourceError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the source (file path, URL, in-memory id, ...)
    pub target: String,
    /// The underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl SourceError {
    pub fn new(
        stage: Stage,
        target: impl Into<String>,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            target: target.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// Reasons a source could not be constructed or resolved.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("{kind} source requires `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("file path is empty")]
    EmptyPath,

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unknown source kind: {0}")]
    UnknownKind(String),

    #[error("source kind not enabled: {0}")]
    NotEnabled(&'static str),

    #[error("unknown error policy: {0}")]
    UnknownPolicy(String),
}

/// An aggregate of multiple source errors.
///
/// This is returned when using `ErrorPolicy::Accumulate` and several sources failed,
/// and wraps the single failure under `ErrorPolicy::FastFail`.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors
    pub errors: Vec<SourceError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sources encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: SourceError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl From<SourceError> for AggregateError {
    fn from(error: SourceError) -> Self {
        Self::single(error)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
