//! Unified transaction primitives.
//!
//! A `UnifiedTransaction` is the common shape every source record is mapped
//! into. It is derived and transient: it is rebuilt on every load and never
//! persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Origin of a unified transaction. It also decides the sign of the amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    TransferSent,
    TransferReceived,
    GiftCard,
    Betting,
    GameTopup,
    DigitalCard,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::TransferSent => "transfer_sent",
            Self::TransferReceived => "transfer_received",
            Self::GiftCard => "gift_card",
            Self::Betting => "betting",
            Self::GameTopup => "game_topup",
            Self::DigitalCard => "digital_card",
        }
    }

    /// Sign applied to the amount magnitude.
    ///
    /// `Betting` has no fixed sign: it depends on the direction of the
    /// underlying platform operation.
    pub fn sign(self) -> Option<Sign> {
        match self {
            Self::Deposit | Self::TransferReceived | Self::GiftCard => Some(Sign::Credit),
            Self::Withdrawal | Self::TransferSent | Self::GameTopup | Self::DigitalCard => {
                Some(Sign::Debit)
            }
            Self::Betting => None,
        }
    }

    pub fn display_hint(self) -> DisplayHint {
        match self {
            Self::Deposit => DisplayHint::Plus,
            Self::Withdrawal => DisplayHint::Withdraw,
            Self::TransferSent => DisplayHint::Send,
            Self::TransferReceived => DisplayHint::Receive,
            Self::GiftCard => DisplayHint::Gift,
            Self::Betting | Self::GameTopup => DisplayHint::Game,
            Self::DigitalCard => DisplayHint::Card,
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon hint for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayHint {
    Plus,
    Withdraw,
    Send,
    Receive,
    Gift,
    Game,
    Card,
}

/// Whether a transaction increases or decreases the identity's holdings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    Credit,
    Debit,
}

impl Sign {
    /// Applies the sign to the magnitude of `amount`, ignoring whatever sign
    /// the stored value carried.
    #[must_use]
    pub fn apply(self, amount: Decimal) -> Decimal {
        if amount.is_zero() {
            return Decimal::ZERO;
        }
        match self {
            Sign::Credit => amount.abs(),
            Sign::Debit => -amount.abs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedTransaction {
    /// Primary key of the source record. Unique within its source only.
    pub id: String,
    pub kind: TransactionKind,
    pub description: String,
    /// Signed amount, in the unit the source stores (no conversion).
    pub amount: Decimal,
    /// Status copied verbatim from the source record.
    pub status: String,
    pub occurred_at: DateTime<Utc>,
    pub display_hint: DisplayHint,
    /// Human-facing transfer reference, only set for transfers.
    pub reference_number: Option<String>,
}

/// A missing stored amount counts as zero so a single malformed row cannot
/// fail a whole load.
pub(crate) fn coerce_amount(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}
