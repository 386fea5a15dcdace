//! Error types raised while reading metadata or applying a strategy.

use thiserror::Error;

/// Failure to build a [`Metadata`](crate::metadata::Metadata) description.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("metadata is not valid JSON for the expected layout: {0}")]
    Format(#[from] serde_json::Error),
    #[error("record '{0}' is declared more than once")]
    DuplicateRecord(String),
    #[error("enum '{0}' is declared more than once")]
    DuplicateEnum(String),
    #[error("record '{record}' declares field '{field}' more than once")]
    DuplicateField { record: String, field: String },
    #[error("field '{record}.{field}' refers to unknown record '{target}'")]
    UnknownRecord {
        record: String,
        field: String,
        target: String,
    },
    #[error("field '{record}.{field}' refers to unknown enum '{target}'")]
    UnknownEnum {
        record: String,
        field: String,
        target: String,
    },
}

/// Failure to map a document through a strategy.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("no record named '{0}' in metadata")]
    UnknownRecord(String),
    #[error("schema mismatch at {path}: {reason}")]
    Mismatch { path: String, reason: String },
}

impl StrategyError {
    pub(crate) fn mismatch(path: &str, reason: impl Into<String>) -> Self {
        Self::Mismatch {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// JSON path of the offending value, when the error is a mismatch.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Mismatch { path, .. } => Some(path),
            Self::UnknownRecord(_) => None,
        }
    }
}
