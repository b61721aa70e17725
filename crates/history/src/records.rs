//! Raw source records and their mapping into [`UnifiedTransaction`].
//!
//! The mapping is pure and total: every raw record produces exactly one
//! unified transaction, and missing fields fall back to placeholders instead
//! of failing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    BettingTransaction, Deposit, DigitalCardOrder, GameTopup, GiftCardRedemption, SourceKind,
    Transfer, UnifiedTransaction, Withdrawal,
    transactions::{Sign, TransactionKind, coerce_amount},
};

const UNKNOWN: &str = "unknown";
const UNKNOWN_PLATFORM: &str = "unknown platform";
const UNKNOWN_CARD: &str = "unknown card";
const GIFT_CARD_LABEL: &str = "gift card redemption";
/// Redeemed cards have no status column; redemption is final.
const GIFT_CARD_STATUS: &str = "completed";

/// A record as returned by one of the record sources, in its native shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RawRecord {
    Deposit(Deposit),
    Withdrawal(Withdrawal),
    Transfer(Transfer),
    GiftCard(GiftCardRedemption),
    Betting(BettingTransaction),
    GameTopup(GameTopup),
    DigitalCard(DigitalCardOrder),
}

impl RawRecord {
    /// The source this record belongs to.
    pub fn source(&self) -> SourceKind {
        match self {
            Self::Deposit(_) => SourceKind::Deposits,
            Self::Withdrawal(_) => SourceKind::Withdrawals,
            Self::Transfer(_) => SourceKind::Transfers,
            Self::GiftCard(_) => SourceKind::GiftCards,
            Self::Betting(_) => SourceKind::Betting,
            Self::GameTopup(_) => SourceKind::GameTopups,
            Self::DigitalCard(_) => SourceKind::DigitalCards,
        }
    }

    /// Primary key of the record within its source.
    pub fn id(&self) -> &str {
        match self {
            Self::Deposit(d) => &d.id,
            Self::Withdrawal(w) => &w.id,
            Self::Transfer(t) => &t.id,
            Self::GiftCard(g) => &g.id,
            Self::Betting(b) => &b.id,
            Self::GameTopup(g) => &g.id,
            Self::DigitalCard(c) => &c.id,
        }
    }

    /// Maps the record into the unified shape as seen by `identity`.
    ///
    /// Only transfers look at `identity`: the sender sees a debit, anybody
    /// else a credit.
    pub fn normalize(&self, identity: &str) -> UnifiedTransaction {
        match self {
            Self::Deposit(d) => Draft::new(&d.id, TransactionKind::Deposit, &d.status, d.created_at)
                .describe(format!("deposit via {}", text_or_unknown(&d.payment_method)))
                .amount(d.amount)
                .finish(),
            Self::Withdrawal(w) => {
                Draft::new(&w.id, TransactionKind::Withdrawal, &w.status, w.created_at)
                    .describe(format!(
                        "withdrawal via {}",
                        text_or_unknown(&w.withdrawal_method)
                    ))
                    .amount(w.amount)
                    .finish()
            }
            Self::Transfer(t) => {
                let (kind, description) = if t.is_sent_by(identity) {
                    (
                        TransactionKind::TransferSent,
                        format!("to {}", text_or_unknown(&t.recipient_phone)),
                    )
                } else {
                    (
                        TransactionKind::TransferReceived,
                        format!("from {}", text_or_unknown(&t.sender_phone)),
                    )
                };
                let mut draft = Draft::new(&t.id, kind, &t.status, t.created_at)
                    .describe(description)
                    .amount(t.amount);
                draft.reference_number = t.transaction_number.clone();
                draft.finish()
            }
            Self::GiftCard(g) => Draft::new(
                &g.id,
                TransactionKind::GiftCard,
                GIFT_CARD_STATUS,
                g.occurred_at(),
            )
            .describe(GIFT_CARD_LABEL.to_string())
            .amount(g.amount)
            .finish(),
            Self::Betting(b) => {
                let (verb, direction) = if b.is_platform_deposit() {
                    ("deposit", Sign::Debit)
                } else {
                    ("withdraw", Sign::Credit)
                };
                let platform = b.platform_name.as_deref().unwrap_or(UNKNOWN_PLATFORM);
                let mut draft =
                    Draft::new(&b.id, TransactionKind::Betting, &b.status, b.created_at)
                        .describe(format!("{verb} at {platform}"))
                        .amount(b.amount);
                draft.direction = Some(direction);
                draft.finish()
            }
            Self::GameTopup(g) => {
                Draft::new(&g.id, TransactionKind::GameTopup, &g.status, g.created_at)
                    .describe(format!(
                        "top-up {}",
                        g.platform_name.as_deref().unwrap_or(UNKNOWN_PLATFORM)
                    ))
                    .amount(g.amount)
                    .finish()
            }
            Self::DigitalCard(c) => {
                Draft::new(&c.id, TransactionKind::DigitalCard, &c.status, c.created_at)
                    .describe(format!(
                        "{} order (${})",
                        c.card_type_name.as_deref().unwrap_or(UNKNOWN_CARD),
                        coerce_amount(c.amount_usd).normalize()
                    ))
                    .amount(c.total_dzd)
                    .finish()
            }
        }
    }
}

fn text_or_unknown(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN)
}

/// A unified transaction before its amount is signed.
struct Draft {
    id: String,
    kind: TransactionKind,
    description: String,
    amount: Decimal,
    status: String,
    occurred_at: DateTime<Utc>,
    reference_number: Option<String>,
    /// Decides the sign of kinds that have none of their own.
    direction: Option<Sign>,
}

impl Draft {
    fn new(id: &str, kind: TransactionKind, status: &str, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            kind,
            description: String::new(),
            amount: Decimal::ZERO,
            status: status.to_string(),
            occurred_at,
            reference_number: None,
            direction: None,
        }
    }

    fn describe(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    fn amount(mut self, amount: Option<Decimal>) -> Self {
        self.amount = coerce_amount(amount);
        self
    }

    fn finish(self) -> UnifiedTransaction {
        let amount = match self.kind.sign().or(self.direction) {
            Some(sign) => sign.apply(self.amount),
            None => self.amount,
        };
        UnifiedTransaction {
            id: self.id,
            kind: self.kind,
            description: self.description,
            amount,
            status: self.status,
            occurred_at: self.occurred_at,
            display_hint: self.kind.display_hint(),
            reference_number: self.reference_number,
        }
    }
}
