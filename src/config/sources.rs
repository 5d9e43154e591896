//! Source list configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::{SourceError, Stage};

/// Configuration for an ordered list of source slots.
///
/// A `null` entry (`~` in YAML) is an absent slot, served by the null
/// provider at run time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    /// Slots in report order
    #[serde(default)]
    pub sources: Vec<Option<SourceConfig>>,
    /// Error policy: "fast_fail" or "accumulate"
    #[serde(default)]
    pub error_policy: Option<String>,
}

/// Configuration for a single source.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Kind of source: "memory", "file", "http" or "null"
    pub kind: String,
    /// Identifier (in-memory sources; defaults to the kind)
    #[serde(default)]
    pub id: Option<String>,
    /// Lines (in-memory sources). Required; use `[]` for an empty source.
    #[serde(default)]
    pub lines: Option<Vec<String>>,
    /// File path (file sources)
    #[serde(default)]
    pub path: Option<String>,
    /// URL (HTTP sources)
    #[serde(default)]
    pub url: Option<String>,
}

impl SourceConfig {
    /// Create a source configuration of the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            lines: None,
            path: None,
            url: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl SourcesConfig {
    /// Create a new empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a configured slot.
    pub fn add_source(mut self, source: SourceConfig) -> Self {
        self.sources.push(Some(source));
        self
    }

    /// Add an absent slot.
    pub fn add_absent(mut self) -> Self {
        self.sources.push(None);
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: impl Into<String>) -> Self {
        self.error_policy = Some(policy.into());
        self
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(s: &str) -> Result<Self, SourceError> {
        serde_json::from_str(s).map_err(|e| SourceError::new(Stage::Decode, "config", e))
    }

    /// Parse a YAML configuration document.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, SourceError> {
        serde_yaml::from_str(s).map_err(|e| SourceError::new(Stage::Decode, "config", e))
    }

    /// Load a configuration file, choosing JSON or YAML by extension.
    ///
    /// Files without a recognized extension are parsed as YAML when the
    /// `yaml` feature is enabled, otherwise as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let target = path.to_string_lossy().into_owned();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SourceError::new(Stage::Open, target.clone(), e))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let parsed = match ext.as_deref() {
            Some("json") => Self::from_json_str(&content),
            #[cfg(feature = "yaml")]
            _ => Self::from_yaml_str(&content),
            #[cfg(not(feature = "yaml"))]
            Some("yaml" | "yml") => Err(SourceError::new(
                Stage::Resolve,
                target.clone(),
                crate::error::ArgumentError::NotEnabled("yaml"),
            )),
            #[cfg(not(feature = "yaml"))]
            _ => Self::from_json_str(&content),
        };

        parsed.map_err(|mut e| {
            e.target = target;
            e
        })
    }
}
