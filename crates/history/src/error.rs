//! The module contains the errors a history load can fail with.
//!
//! The errors are:
//!
//! - [`Database`] thrown when a database-backed source query fails.
//! - [`Source`] thrown when any other record source reports a failure.
//! - [`InvalidConfig`] thrown when paging limits are unusable.
//!
//!  [`Database`]: HistoryError::Database
//!  [`Source`]: HistoryError::Source
//!  [`InvalidConfig`]: HistoryError::InvalidConfig
use sea_orm::DbErr;
use thiserror::Error;

use crate::SourceKind;

/// History custom errors.
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("{kind} source failed: {message}")]
    Source { kind: SourceKind, message: String },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl HistoryError {
    /// Wraps a failure reported by a non-database record source.
    pub fn source_failed(kind: SourceKind, message: impl Into<String>) -> Self {
        Self::Source {
            kind,
            message: message.into(),
        }
    }
}

impl PartialEq for HistoryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Source {
                    kind: a,
                    message: am,
                },
                Self::Source {
                    kind: b,
                    message: bm,
                },
            ) => a == b && am == bm,
            (Self::InvalidConfig(a), Self::InvalidConfig(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
