//! Builder for creating Driver instances.

use crate::config::{SourceConfig, SourcesConfig};
use crate::driver::Driver;
use crate::error::{AggregateError, ArgumentError, ErrorPolicy, SourceError, Stage};
use crate::source::{FileSource, InMemorySource, Provider, SourceKind};

#[derive(Debug)]
enum PendingSlot {
    Absent,
    Config(SourceConfig),
    Ready(Provider),
}

/// Builder for creating Driver instances.
///
/// Slots keep the order in which they were added. Configured slots are only
/// constructed in [`SourcesBuilder::build`], where failures are collected
/// according to the error policy.
#[derive(Debug)]
pub struct SourcesBuilder {
    slots: Vec<PendingSlot>,
    error_policy: ErrorPolicy,
    #[cfg(feature = "http")]
    client: Option<reqwest::Client>,
}

impl SourcesBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            error_policy: ErrorPolicy::FastFail,
            #[cfg(feature = "http")]
            client: None,
        }
    }

    /// Add an in-memory slot.
    pub fn add_memory<I, S>(self, id: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_source(SourceConfig::new("memory").with_id(id).with_lines(lines))
    }

    /// Add a file slot.
    pub fn add_file(self, path: impl Into<String>) -> Self {
        self.add_source(SourceConfig::new("file").with_path(path))
    }

    /// Add an HTTP slot.
    #[cfg(feature = "http")]
    pub fn add_http(self, url: impl Into<String>) -> Self {
        self.add_source(SourceConfig::new("http").with_url(url))
    }

    /// Add a slot from a source configuration.
    pub fn add_source(mut self, cfg: SourceConfig) -> Self {
        self.slots.push(PendingSlot::Config(cfg));
        self
    }

    /// Add an absent slot; it is served by the null provider at run time.
    pub fn add_absent(mut self) -> Self {
        self.slots.push(PendingSlot::Absent);
        self
    }

    /// Add a pre-built provider.
    pub fn add_provider(mut self, provider: Provider) -> Self {
        self.slots.push(PendingSlot::Ready(provider));
        self
    }

    /// Set the HTTP client shared by HTTP slots.
    #[cfg(feature = "http")]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the error handling policy.
    pub fn with_mode(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Build the Driver from the current configuration.
    pub fn build(self) -> Result<Driver, AggregateError> {
        let mut slots = Vec::with_capacity(self.slots.len());
        let mut errors = Vec::new();

        for (index, pending) in self.slots.iter().enumerate() {
            let resolved = match pending {
                PendingSlot::Absent => Ok(None),
                PendingSlot::Ready(provider) => Ok(Some(provider.clone())),
                PendingSlot::Config(cfg) => self.resolve_slot(index, cfg).map(Some),
            };

            match resolved {
                Ok(slot) => slots.push(slot),
                Err(e) => {
                    errors.push(e);
                    if matches!(self.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(Driver::new(slots, self.error_policy))
        } else {
            Err(AggregateError { errors })
        }
    }

    fn resolve_slot(&self, index: usize, cfg: &SourceConfig) -> Result<Provider, SourceError> {
        let target = cfg.id.clone().unwrap_or_else(|| format!("slot {index}"));

        let kind = SourceKind::from_str(&cfg.kind).ok_or_else(|| {
            SourceError::new(
                Stage::Resolve,
                target.clone(),
                ArgumentError::UnknownKind(cfg.kind.clone()),
            )
        })?;

        match kind {
            SourceKind::InMemory => {
                let lines = cfg
                    .lines
                    .clone()
                    .ok_or_else(|| missing_field("memory", "lines", &target))?;
                let id = cfg.id.clone().unwrap_or_else(|| "memory".to_string());
                Ok(Provider::streaming(InMemorySource::new(id, lines)))
            }
            SourceKind::File => {
                let path = cfg
                    .path
                    .as_deref()
                    .ok_or_else(|| missing_field("file", "path", &target))?;
                Ok(Provider::streaming(FileSource::new(path)?))
            }
            SourceKind::Http => self.http_provider(cfg, &target),
            SourceKind::Null => Ok(Provider::null()),
        }
    }

    #[cfg(feature = "http")]
    fn http_provider(&self, cfg: &SourceConfig, target: &str) -> Result<Provider, SourceError> {
        let url = cfg
            .url
            .as_deref()
            .ok_or_else(|| missing_field("http", "url", target))?;
        let client = self.client.clone().unwrap_or_default();
        Ok(Provider::streaming(crate::source::HttpSource::new(
            client, url,
        )?))
    }

    #[cfg(not(feature = "http"))]
    fn http_provider(&self, _cfg: &SourceConfig, target: &str) -> Result<Provider, SourceError> {
        Err(SourceError::new(
            Stage::Resolve,
            target,
            ArgumentError::NotEnabled("http"),
        ))
    }

    /// Create a builder from a parsed configuration.
    pub fn from_config(config: SourcesConfig) -> Result<Self, AggregateError> {
        let mut builder = SourcesBuilder::new();

        if let Some(policy_str) = config.error_policy.as_deref() {
            let policy = ErrorPolicy::from_str(policy_str).ok_or_else(|| {
                SourceError::new(
                    Stage::Resolve,
                    "config",
                    ArgumentError::UnknownPolicy(policy_str.to_string()),
                )
            })?;
            builder = builder.with_mode(policy);
        }

        for slot in config.sources {
            builder = match slot {
                Some(cfg) => builder.add_source(cfg),
                None => builder.add_absent(),
            };
        }

        Ok(builder)
    }
}

impl Default for SourcesBuilder {
    fn default() -> Self {
        SourcesBuilder::new()
    }
}

fn missing_field(kind: &'static str, field: &'static str, target: &str) -> SourceError {
    SourceError::new(
        Stage::Construct,
        target,
        ArgumentError::MissingField { kind, field },
    )
}
