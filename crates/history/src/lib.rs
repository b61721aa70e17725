//! Unified transaction history of a wallet identity.
//!
//! Seven independently owned collections (deposits, withdrawals, transfers,
//! gift-card redemptions, betting transactions, game top-ups and digital-card
//! orders) are fetched through [`RecordSource`]s, normalized into
//! [`UnifiedTransaction`]s and merged newest first by an [`Aggregator`].
//! [`TransactionHistory`] keeps the latest result for a consumer and guards
//! it against stale loads.

pub use betting::BettingTransaction;
pub use config::HistoryConfig;
pub use database::DatabaseSource;
pub use deposits::Deposit;
pub use digital_cards::DigitalCardOrder;
pub use error::HistoryError;
pub use game_topups::GameTopup;
pub use gift_cards::GiftCardRedemption;
pub use ops::{Aggregator, AggregatorBuilder, HistoryPage, LoadOptions, fetch_source};
pub use records::RawRecord;
pub use source::{RecordScope, RecordSource, RowRange, SourceKind};
pub use state::{HistorySnapshot, TransactionHistory};
pub use transactions::{DisplayHint, Sign, TransactionKind, UnifiedTransaction};
pub use transfers::Transfer;
pub use withdrawals::Withdrawal;

mod betting;
mod config;
mod database;
mod deposits;
mod digital_cards;
mod error;
mod game_topups;
mod gift_cards;
mod ops;
mod records;
mod source;
mod state;
mod transactions;
mod transfers;
mod withdrawals;

pub type ResultHistory<T> = Result<T, HistoryError>;
