//! Stateful history handle.
//!
//! `TransactionHistory` keeps the last computed history for a consumer and
//! reruns the aggregation on demand. Every load is tagged with a generation
//! number; a result is only applied if no newer load (or cancellation) was
//! issued in the meantime, so a slow stale fetch can never overwrite fresher
//! state.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{Aggregator, HistoryError, LoadOptions, UnifiedTransaction};

/// What a consumer renders.
///
/// A failed load is an empty history with `error` set, which keeps it
/// distinguishable from an identity that really has no transactions.
#[derive(Clone, Debug, Default, Serialize)]
pub struct HistorySnapshot {
    pub transactions: Vec<UnifiedTransaction>,
    pub total_count: usize,
    pub is_loading: bool,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<Arc<HistoryError>>,
}

impl HistorySnapshot {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn failed(err: HistoryError) -> Self {
        Self {
            error: Some(Arc::new(err)),
            ..Self::default()
        }
    }
}

fn serialize_error<S>(error: &Option<Arc<HistoryError>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

#[derive(Clone, Debug)]
struct Request {
    identity: Option<String>,
    options: LoadOptions,
}

#[derive(Debug, Default)]
struct State {
    snapshot: HistorySnapshot,
    generation: u64,
    last_request: Option<Request>,
}

#[derive(Clone, Debug)]
pub struct TransactionHistory {
    aggregator: Arc<Aggregator>,
    state: Arc<Mutex<State>>,
}

impl TransactionHistory {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self {
            aggregator,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Current state, without triggering a load.
    pub async fn snapshot(&self) -> HistorySnapshot {
        self.state.lock().await.snapshot.clone()
    }

    /// Rebuilds the history of `identity`.
    ///
    /// Without an identity nothing is queried and the empty, non-loading
    /// history is returned. If a newer load or a [`cancel`] happens while
    /// this one is in flight, its result is dropped and the current snapshot
    /// is returned instead.
    ///
    /// [`cancel`]: TransactionHistory::cancel
    pub async fn load(&self, identity: Option<&str>, options: LoadOptions) -> HistorySnapshot {
        let (generation, identity) = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            let previous = state
                .last_request
                .replace(Request {
                    identity: identity.map(ToString::to_string),
                    options,
                })
                .and_then(|r| r.identity);

            let Some(identity) = identity else {
                state.snapshot = HistorySnapshot::default();
                return state.snapshot.clone();
            };
            if previous.as_deref() != Some(identity) {
                state.snapshot = HistorySnapshot::default();
            }
            state.snapshot.is_loading = true;
            (state.generation, identity.to_string())
        };

        let result = self.aggregator.collect(&identity, &options).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::warn!(
                generation,
                latest = state.generation,
                "discarding stale history result"
            );
            return state.snapshot.clone();
        }

        state.snapshot = match result {
            Ok(page) => HistorySnapshot {
                transactions: page.transactions,
                total_count: page.total_count,
                is_loading: false,
                error: None,
            },
            Err(err) => {
                tracing::error!("failed to load transaction history: {err}");
                HistorySnapshot::failed(err)
            }
        };
        state.snapshot.clone()
    }

    /// Reruns the last load, whether it succeeded or failed.
    pub async fn refetch(&self) -> HistorySnapshot {
        let request = self.state.lock().await.last_request.clone();
        match request {
            Some(request) => self.load(request.identity.as_deref(), request.options).await,
            None => self.load(None, LoadOptions::default()).await,
        }
    }

    /// Drops the result of any load still in flight.
    pub async fn cancel(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.snapshot.is_loading = false;
    }
}
