//! In-memory line source.

use std::sync::Arc;

use super::tier::{AsyncDataSource, AsyncStreamingDataSource, DataSource, Lines, SourceKind};
use crate::error::SourceError;

/// In-memory source over a fixed sequence of lines.
///
/// `retrieve()` hands out the shared sequence itself; callers get an alias,
/// not a copy. Tiers 2 and 3 use the default fallbacks.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    lines: Lines,
}

impl InMemorySource {
    /// Create a new in-memory source with the given lines.
    pub fn new<I, S>(id: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_shared(id, Arc::new(lines.into_iter().map(Into::into).collect()))
    }

    /// Create a new in-memory source that aliases an existing sequence.
    pub fn from_shared(id: impl Into<String>, lines: Lines) -> Self {
        Self {
            id: id.into(),
            lines,
        }
    }

    /// Create a new in-memory source by splitting a string into lines.
    pub fn from_string(id: impl Into<String>, data: &str) -> Self {
        Self::new(id, data.lines())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl DataSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> SourceKind {
        SourceKind::InMemory
    }

    fn retrieve(&self) -> Result<Lines, SourceError> {
        tracing::debug!(source = %self.id, lines = self.lines.len(), "in-memory retrieve");
        Ok(Arc::clone(&self.lines))
    }
}

impl AsyncDataSource for InMemorySource {}

impl AsyncStreamingDataSource for InMemorySource {}
