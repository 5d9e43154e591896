//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AggregateError, SourceError, Stage};

/// A diagnostic wrapper for source errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SourceDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Construct | Stage::Resolve => "Check the source configuration entries",
        Stage::Open | Stage::Read => "Check that the file exists and is readable",
        Stage::Fetch => "Check that the URL is reachable",
        Stage::Decode => "The response body must be a JSON array of strings",
        Stage::Join => "The blocking retrieval task did not complete",
        Stage::Write => "Check the output stream",
    }
}

impl From<SourceError> for SourceDiagnostic {
    fn from(e: SourceError) -> Self {
        SourceDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            help: Some(help_for(e.stage).into()),
            source: Some(e.error),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for SourceDiagnostic {
    fn from(agg: AggregateError) -> Self {
        match agg.errors.into_iter().next() {
            Some(e) => SourceDiagnostic::from(e),
            None => SourceDiagnostic {
                message: "Unknown source error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            },
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(SourceDiagnostic::from(agg))
    }
}
