//! Null-object source.

use std::sync::{Arc, LazyLock};

use super::tier::{DataSource, Lines, SourceKind};
use crate::error::SourceError;

static EMPTY: LazyLock<Lines> = LazyLock::new(|| Arc::new(Vec::new()));

/// Source that always produces an empty sequence.
///
/// Only tier 1 is implemented; it stands in for slots with no configured
/// source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSource;

impl NullSource {
    pub fn new() -> Self {
        Self
    }
}

impl DataSource for NullSource {
    fn id(&self) -> &str {
        "null"
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Null
    }

    fn retrieve(&self) -> Result<Lines, SourceError> {
        Ok(Arc::clone(&EMPTY))
    }
}
