use std::{collections::HashSet, fmt, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::{DatabaseSource, HistoryConfig, HistoryError, RecordSource, ResultHistory, SourceKind};

mod history;
mod paging;

pub use history::{HistoryPage, LoadOptions};
pub use paging::fetch_source;

/// Merges every record source of an identity into one history.
pub struct Aggregator {
    sources: Vec<Arc<dyn RecordSource>>,
    config: HistoryConfig,
}

impl Aggregator {
    /// Return a builder for `Aggregator`. Help to build the struct.
    pub fn builder() -> AggregatorBuilder {
        AggregatorBuilder::default()
    }

    /// Aggregator over the seven collections of the wallet database.
    pub fn from_database(
        database: &DatabaseConnection,
        config: HistoryConfig,
    ) -> ResultHistory<Self> {
        Self::builder().database(database).config(config).build()
    }

    /// Kinds of the registered sources, in registration order.
    pub fn source_kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("sources", &self.source_kinds())
            .field("config", &self.config)
            .finish()
    }
}

/// The builder for `Aggregator`
#[derive(Default)]
pub struct AggregatorBuilder {
    sources: Vec<Arc<dyn RecordSource>>,
    config: HistoryConfig,
}

impl AggregatorBuilder {
    /// Register the database-backed sources for every collection.
    pub fn database(mut self, db: &DatabaseConnection) -> AggregatorBuilder {
        self.sources.extend(DatabaseSource::all(db));
        self
    }

    /// Register a single source.
    pub fn source(mut self, source: Arc<dyn RecordSource>) -> AggregatorBuilder {
        self.sources.push(source);
        self
    }

    pub fn config(mut self, config: HistoryConfig) -> AggregatorBuilder {
        self.config = config;
        self
    }

    /// Construct `Aggregator`
    ///
    /// Each source kind may be registered once, otherwise its records would
    /// be counted twice.
    pub fn build(self) -> ResultHistory<Aggregator> {
        self.config.validate()?;

        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.kind()) {
                return Err(HistoryError::InvalidConfig(format!(
                    "{} source registered more than once",
                    source.kind()
                )));
            }
        }

        Ok(Aggregator {
            sources: self.sources,
            config: self.config,
        })
    }
}
