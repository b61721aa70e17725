use futures::future::try_join_all;
use serde::Serialize;

use crate::{ResultHistory, UnifiedTransaction};

use super::{Aggregator, paging::fetch_source};

/// Per-load knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Keep only the newest `n` transactions. `total_count` is unaffected.
    pub display_limit: Option<usize>,
    /// Override the configured per-source row ceiling for this load.
    pub max_rows_per_source: Option<u64>,
}

impl LoadOptions {
    pub fn with_display_limit(limit: usize) -> Self {
        Self {
            display_limit: Some(limit),
            ..Self::default()
        }
    }
}

/// Result of one aggregation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HistoryPage {
    /// Newest first, truncated to the display limit if one was given.
    pub transactions: Vec<UnifiedTransaction>,
    /// Number of transactions before display truncation.
    pub total_count: usize,
}

impl Aggregator {
    /// Fetches every source for `identity` and merges them into one history.
    ///
    /// All sources are queried concurrently. If any of them fails the whole
    /// load fails; partial histories are never returned.
    pub async fn collect(
        &self,
        identity: &str,
        options: &LoadOptions,
    ) -> ResultHistory<HistoryPage> {
        let config = match options.max_rows_per_source {
            Some(max_rows) => self.config.with_max_rows_per_source(max_rows),
            None => self.config,
        };
        config.validate()?;

        let batches = try_join_all(
            self.sources
                .iter()
                .map(|source| fetch_source(source.as_ref(), identity, &config)),
        )
        .await?;

        let mut transactions: Vec<UnifiedTransaction> = batches
            .iter()
            .flatten()
            .map(|record| record.normalize(identity))
            .collect();
        sort_newest_first(&mut transactions);

        let total_count = transactions.len();
        if let Some(limit) = options.display_limit {
            transactions.truncate(limit);
        }

        tracing::debug!(
            total_count,
            shown = transactions.len(),
            sources = self.sources.len(),
            "history collected"
        );

        Ok(HistoryPage {
            transactions,
            total_count,
        })
    }
}

/// Orders by `occurred_at` descending. Ties keep no particular order.
fn sort_newest_first(transactions: &mut [UnifiedTransaction]) {
    transactions.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
}
