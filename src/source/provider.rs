//! Tagged provider handle carrying its capability tier.

use std::sync::Arc;

use super::null::NullSource;
use super::tier::{
    AsyncDataSource, AsyncStreamingDataSource, Capabilities, DataSource, LineStream, Lines,
    SourceKind, Tier, retrieve_off_thread, stream_from_async, stream_from_sync,
};
use crate::error::SourceError;

/// A shared source tagged with the richest tier it implements.
///
/// Callers pick behavior by matching on the variant (or asking for
/// [`Provider::capabilities`]) instead of inspecting concrete types. Every
/// variant answers all three retrieval operations; missing tiers are filled
/// with the default fallback functions.
#[derive(Debug, Clone)]
pub enum Provider {
    Sync(Arc<dyn DataSource>),
    Async(Arc<dyn AsyncDataSource>),
    Streaming(Arc<dyn AsyncStreamingDataSource>),
}

impl Provider {
    /// Wrap a source that only implements tier 1.
    pub fn sync<S: DataSource>(source: S) -> Self {
        Provider::Sync(Arc::new(source))
    }

    /// Wrap a source implementing tiers 1 and 2.
    pub fn batch<S: AsyncDataSource>(source: S) -> Self {
        Provider::Async(Arc::new(source))
    }

    /// Wrap a source implementing all three tiers.
    pub fn streaming<S: AsyncStreamingDataSource>(source: S) -> Self {
        Provider::Streaming(Arc::new(source))
    }

    /// The null-object provider used for absent slots.
    pub fn null() -> Self {
        Provider::sync(NullSource::new())
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Provider::Sync(_) => Capabilities::SYNC,
            Provider::Async(_) => Capabilities::ASYNC_BATCH,
            Provider::Streaming(_) => Capabilities::STREAMING,
        }
    }

    pub fn tier(&self) -> Tier {
        self.capabilities().richest()
    }

    pub fn id(&self) -> &str {
        match self {
            Provider::Sync(s) => s.id(),
            Provider::Async(s) => s.id(),
            Provider::Streaming(s) => s.id(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Provider::Sync(s) => s.kind(),
            Provider::Async(s) => s.kind(),
            Provider::Streaming(s) => s.kind(),
        }
    }

    /// Tier 1, available on every provider.
    pub fn retrieve(&self) -> Result<Lines, SourceError> {
        match self {
            Provider::Sync(s) => s.retrieve(),
            Provider::Async(s) => s.retrieve(),
            Provider::Streaming(s) => s.retrieve(),
        }
    }

    /// Tier 2, falling back to running tier 1 off the calling task.
    pub async fn retrieve_async(&self) -> Result<Lines, SourceError> {
        match self {
            Provider::Sync(s) => retrieve_off_thread(Arc::clone(s)).await,
            Provider::Async(s) => Arc::clone(s).retrieve_async().await,
            Provider::Streaming(s) => Arc::clone(s).retrieve_async().await,
        }
    }

    /// Tier 3, falling back to tier 2 and then to tier 1.
    pub fn retrieve_stream(&self) -> LineStream {
        match self {
            Provider::Sync(s) => stream_from_sync(Arc::clone(s)),
            Provider::Async(s) => stream_from_async(Arc::clone(s)),
            Provider::Streaming(s) => Arc::clone(s).retrieve_stream(),
        }
    }
}

impl From<Arc<dyn DataSource>> for Provider {
    fn from(source: Arc<dyn DataSource>) -> Self {
        Provider::Sync(source)
    }
}

impl From<Arc<dyn AsyncDataSource>> for Provider {
    fn from(source: Arc<dyn AsyncDataSource>) -> Self {
        Provider::Async(source)
    }
}

impl From<Arc<dyn AsyncStreamingDataSource>> for Provider {
    fn from(source: Arc<dyn AsyncStreamingDataSource>) -> Self {
        Provider::Streaming(source)
    }
}
