use serde::Deserialize;

use crate::{HistoryError, ResultHistory};

pub const DEFAULT_CHUNK_SIZE: u64 = 1000;
pub const DEFAULT_MAX_ROWS_PER_SOURCE: u64 = 5000;

/// Paging limits applied to every source.
///
/// A single bounded query per source is the special case
/// `max_rows_per_source == chunk_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Rows requested per round-trip.
    pub chunk_size: u64,
    /// Upper bound of rows read from a single source in one load.
    pub max_rows_per_source: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_rows_per_source: DEFAULT_MAX_ROWS_PER_SOURCE,
        }
    }
}

impl HistoryConfig {
    pub(crate) fn validate(&self) -> ResultHistory<()> {
        if self.chunk_size == 0 {
            return Err(HistoryError::InvalidConfig(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if self.max_rows_per_source == 0 {
            return Err(HistoryError::InvalidConfig(
                "max_rows_per_source must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns a copy with a different per-source ceiling.
    #[must_use]
    pub fn with_max_rows_per_source(self, max_rows_per_source: u64) -> Self {
        Self {
            max_rows_per_source,
            ..self
        }
    }
}
