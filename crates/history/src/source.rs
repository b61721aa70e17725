//! The record source seam.
//!
//! Each of the seven collections feeding the history is reached through a
//! [`RecordSource`]. Sources are range-queryable, scoped to one identity and
//! ordered newest first.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{RawRecord, ResultHistory};

/// The independent collections contributing to the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Deposits,
    Withdrawals,
    Transfers,
    GiftCards,
    Betting,
    GameTopups,
    DigitalCards,
}

impl SourceKind {
    pub const ALL: [SourceKind; 7] = [
        SourceKind::Deposits,
        SourceKind::Withdrawals,
        SourceKind::Transfers,
        SourceKind::GiftCards,
        SourceKind::Betting,
        SourceKind::GameTopups,
        SourceKind::DigitalCards,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposits => "deposits",
            Self::Withdrawals => "withdrawals",
            Self::Transfers => "transfers",
            Self::GiftCards => "gift_cards",
            Self::Betting => "betting",
            Self::GameTopups => "game_topups",
            Self::DigitalCards => "digital_cards",
        }
    }

    /// The filter this source applies for `identity`.
    pub fn scope(self, identity: &str) -> RecordScope {
        let identity = identity.to_string();
        match self {
            Self::Transfers => RecordScope::SenderOrRecipient(identity),
            Self::GiftCards => RecordScope::Redeemer(identity),
            Self::Deposits
            | Self::Withdrawals
            | Self::Betting
            | Self::GameTopups
            | Self::DigitalCards => RecordScope::Owner(identity),
        }
    }
}

impl core::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity filter applied by a source query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordScope {
    /// Rows whose owner is the identity.
    Owner(String),
    /// Rows where the identity is either the sender or the recipient.
    SenderOrRecipient(String),
    /// Rows redeemed by the identity and marked as used.
    Redeemer(String),
}

impl RecordScope {
    pub fn identity(&self) -> &str {
        match self {
            Self::Owner(id) | Self::SenderOrRecipient(id) | Self::Redeemer(id) => id,
        }
    }
}

/// Half-open row range `[offset, offset + limit)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub offset: u64,
    pub limit: u64,
}

impl RowRange {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    pub fn end(self) -> u64 {
        self.offset.saturating_add(self.limit)
    }
}

/// A read-only, identity-scoped collection of raw records.
///
/// Implementations must return rows newest first with a deterministic
/// tie-breaker, so that consecutive ranges never overlap.
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Returns at most `range.limit` rows starting at `range.offset`.
    async fn fetch(&self, scope: &RecordScope, range: RowRange) -> ResultHistory<Vec<RawRecord>>;
}
