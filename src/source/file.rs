//! File-backed line source.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncBufReadExt;

use super::tier::{
    AsyncDataSource, AsyncStreamingDataSource, DataSource, LineStream, Lines, SourceKind,
};
use crate::error::{ArgumentError, SourceError, Stage};

/// Source reading lines from a text file.
///
/// This is the only built-in source with genuinely incremental streaming:
/// `retrieve_stream()` yields each line as it is read.
#[derive(Debug, Clone)]
pub struct FileSource {
    id: String,
    path: PathBuf,
}

impl FileSource {
    /// Create a new file source. An empty path is rejected.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(SourceError::new(
                Stage::Construct,
                "file",
                ArgumentError::EmptyPath,
            ));
        }
        let id = path.to_string_lossy().into_owned();
        Ok(Self { id, path })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_error(&self, e: std::io::Error) -> SourceError {
        SourceError::new(Stage::Open, self.id.clone(), e)
    }

    fn read_error(&self, e: std::io::Error) -> SourceError {
        SourceError::new(Stage::Read, self.id.clone(), e)
    }
}

impl DataSource for FileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn retrieve(&self) -> Result<Lines, SourceError> {
        let file = std::fs::File::open(&self.path).map_err(|e| self.open_error(e))?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.read_error(e))?;
        tracing::debug!(source = %self.id, lines = lines.len(), "file retrieve");
        Ok(Arc::new(lines))
    }
}

#[async_trait]
impl AsyncDataSource for FileSource {
    async fn retrieve_async(self: Arc<Self>) -> Result<Lines, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    self.open_error(e)
                }
                _ => self.read_error(e),
            })?;
        let lines: Vec<String> = content.lines().map(str::to_owned).collect();
        tracing::debug!(source = %self.id, lines = lines.len(), "file retrieve_async");
        Ok(Arc::new(lines))
    }
}

impl AsyncStreamingDataSource for FileSource {
    fn retrieve_stream(self: Arc<Self>) -> LineStream {
        let source = self;
        Box::pin(async_stream::stream! {
            // The reader lives inside the generator; dropping the stream closes it.
            match tokio::fs::File::open(&source.path).await {
                Err(e) => {
                    yield Err(source.open_error(e));
                }
                Ok(file) => {
                    let mut lines = tokio::io::BufReader::new(file).lines();
                    let mut count = 0usize;
                    loop {
                        match lines.next_line().await {
                            Ok(Some(line)) => {
                                count += 1;
                                yield Ok(line);
                            }
                            Ok(None) => break,
                            Err(e) => {
                                yield Err(source.read_error(e));
                                break;
                            }
                        }
                    }
                    tracing::debug!(source = %source.id, lines = count, "file stream finished");
                }
            }
        })
    }
}
