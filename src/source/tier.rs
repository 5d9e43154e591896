//! Capability tiers shared by every source.
//!
//! A source always implements [`DataSource`]. It may also implement
//! [`AsyncDataSource`] and [`AsyncStreamingDataSource`]; the default methods
//! of those traits delegate to the free functions in this module, so a
//! provider only overrides the tiers it can do better.

use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::{SourceError, Stage};

/// Ordered, shared sequence of lines returned by a retrieval.
pub type Lines = Arc<Vec<String>>;

/// Finite, single-pass stream of lines.
pub type LineStream = BoxStream<'static, Result<String, SourceError>>;

/// The concrete kind of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    InMemory,
    Http,
    File,
    Null,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::InMemory => write!(f, "in-memory"),
            SourceKind::Http => write!(f, "http"),
            SourceKind::File => write!(f, "file"),
            SourceKind::Null => write!(f, "null"),
        }
    }
}

impl SourceKind {
    /// Parse a source kind from a configuration string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" | "in_memory" => Some(SourceKind::InMemory),
            "http" | "https" | "url" => Some(SourceKind::Http),
            "file" | "path" => Some(SourceKind::File),
            "null" | "none" | "empty" => Some(SourceKind::Null),
            _ => None,
        }
    }
}

/// Retrieval tier, ordered from least to most capable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Sync,
    AsyncBatch,
    Streaming,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Sync => write!(f, "sync"),
            Tier::AsyncBatch => write!(f, "async-batch"),
            Tier::Streaming => write!(f, "streaming"),
        }
    }
}

/// Declares which optional tiers a source implements. Tier 1 is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub async_batch: bool,
    pub streaming: bool,
}

impl Capabilities {
    pub const SYNC: Self = Self {
        async_batch: false,
        streaming: false,
    };
    pub const ASYNC_BATCH: Self = Self {
        async_batch: true,
        streaming: false,
    };
    pub const STREAMING: Self = Self {
        async_batch: true,
        streaming: true,
    };

    pub fn supports(&self, tier: Tier) -> bool {
        match tier {
            Tier::Sync => true,
            Tier::AsyncBatch => self.async_batch,
            Tier::Streaming => self.streaming,
        }
    }

    /// The most capable tier available: streaming > async-batch > sync.
    pub fn richest(&self) -> Tier {
        if self.streaming {
            Tier::Streaming
        } else if self.async_batch {
            Tier::AsyncBatch
        } else {
            Tier::Sync
        }
    }
}

/// Tier 1: synchronous retrieval. Every source implements this.
pub trait DataSource: Send + Sync + Debug + 'static {
    /// Returns an identifier for this source, used in errors and logs.
    fn id(&self) -> &str;

    fn kind(&self) -> SourceKind;

    /// Retrieve every line, in order.
    ///
    /// Implementations must not block indefinitely; bounding I/O is the
    /// caller's responsibility.
    fn retrieve(&self) -> Result<Lines, SourceError>;
}

/// Tier 2: asynchronous batch retrieval.
#[async_trait]
pub trait AsyncDataSource: DataSource {
    /// Retrieve every line without blocking the calling task.
    ///
    /// Defaults to running [`DataSource::retrieve`] on the blocking pool.
    async fn retrieve_async(self: Arc<Self>) -> Result<Lines, SourceError> {
        retrieve_off_thread(self).await
    }
}

/// Tier 3: lazy, item-by-item asynchronous retrieval.
pub trait AsyncStreamingDataSource: AsyncDataSource {
    /// Stream every line. Each call starts a fresh retrieval.
    ///
    /// Defaults to awaiting [`AsyncDataSource::retrieve_async`] and yielding
    /// its items in order.
    fn retrieve_stream(self: Arc<Self>) -> LineStream {
        stream_from_async(self)
    }
}

/// Run `retrieve()` on tokio's blocking pool and resolve with its result.
pub async fn retrieve_off_thread<S>(source: Arc<S>) -> Result<Lines, SourceError>
where
    S: DataSource + ?Sized,
{
    let target = source.id().to_owned();
    tokio::task::spawn_blocking(move || source.retrieve())
        .await
        .map_err(|e| SourceError::new(Stage::Join, target, e))?
}

/// Await the batch tier, then yield each line.
pub fn stream_from_async<S>(source: Arc<S>) -> LineStream
where
    S: AsyncDataSource + ?Sized,
{
    Box::pin(async_stream::stream! {
        match source.retrieve_async().await {
            Ok(lines) => {
                for line in into_owned_lines(lines) {
                    yield Ok(line);
                }
            }
            Err(e) => {
                yield Err(e);
            }
        }
    })
}

/// Call the sync tier, then yield each line.
pub fn stream_from_sync<S>(source: Arc<S>) -> LineStream
where
    S: DataSource + ?Sized,
{
    Box::pin(async_stream::stream! {
        match source.retrieve() {
            Ok(lines) => {
                for line in into_owned_lines(lines) {
                    yield Ok(line);
                }
            }
            Err(e) => {
                yield Err(e);
            }
        }
    })
}

// Avoid cloning when the retrieval handed us the only reference.
fn into_owned_lines(lines: Lines) -> Vec<String> {
    Arc::try_unwrap(lines).unwrap_or_else(|shared| (*shared).clone())
}
