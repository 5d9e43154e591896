//! HTTP line source: a GET returning a JSON array of strings.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::tier::{AsyncDataSource, AsyncStreamingDataSource, DataSource, Lines, SourceKind};
use crate::error::{ArgumentError, SourceError, Stage};

/// Source fetching lines from an HTTP endpoint.
///
/// The response body must be a JSON array of strings, one per line. No
/// retries or timeouts are applied beyond what the supplied client does.
/// Streaming uses the default fallback, so the whole body is buffered before
/// the first line is yielded.
#[derive(Debug, Clone)]
pub struct HttpSource {
    id: String,
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Create a new HTTP source with the given client and URL.
    pub fn new(client: Client, url: &str) -> Result<Self, SourceError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(SourceError::new(
                Stage::Construct,
                "http",
                ArgumentError::MissingField {
                    kind: "http",
                    field: "url",
                },
            ));
        }
        let parsed = Url::parse(trimmed).map_err(|e| {
            SourceError::new(
                Stage::Construct,
                trimmed,
                ArgumentError::InvalidUrl {
                    url: trimmed.to_owned(),
                    reason: e.to_string(),
                },
            )
        })?;
        Ok(Self {
            id: parsed.to_string(),
            client,
            url: parsed,
        })
    }

    /// Create a new HTTP source with a default client.
    pub fn with_default_client(url: &str) -> Result<Self, SourceError> {
        Self::new(Client::new(), url)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch(&self) -> Result<Lines, SourceError> {
        let fetch_error = |e: reqwest::Error| SourceError::new(Stage::Fetch, self.id.clone(), e);

        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(fetch_error)?
            .text()
            .await
            .map_err(fetch_error)?;

        let lines: Vec<String> = serde_json::from_str(&body)
            .map_err(|e| SourceError::new(Stage::Decode, self.id.clone(), e))?;
        tracing::debug!(source = %self.id, lines = lines.len(), "http fetch");
        Ok(Arc::new(lines))
    }
}

impl DataSource for HttpSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Http
    }

    /// Blocks until the async fetch resolves.
    ///
    /// The request runs on a scoped helper thread driving its own
    /// current-thread runtime, so this never blocks a runtime worker on its
    /// own future. It still blocks the caller; prefer `retrieve_async`.
    fn retrieve(&self) -> Result<Lines, SourceError> {
        std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let rt = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                        .map_err(|e| SourceError::new(Stage::Fetch, self.id.clone(), e))?;
                    rt.block_on(self.fetch())
                })
                .join()
                .unwrap_or_else(|_| {
                    Err(SourceError::new(
                        Stage::Join,
                        self.id.clone(),
                        "http retrieve thread panicked",
                    ))
                })
        })
    }
}

#[async_trait]
impl AsyncDataSource for HttpSource {
    async fn retrieve_async(self: Arc<Self>) -> Result<Lines, SourceError> {
        self.fetch().await
    }
}

impl AsyncStreamingDataSource for HttpSource {}
