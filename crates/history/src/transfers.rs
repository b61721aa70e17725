//! Wallet-to-wallet transfers.
//!
//! A transfer row is visible to both parties: the same record is a debit for
//! the sender and a credit for the recipient.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub sender_phone: Option<String>,
    pub recipient_phone: Option<String>,
    /// Human-facing reference shown to both parties.
    pub transaction_number: Option<String>,
    pub amount: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    /// Returns `true` if `identity` sent this transfer.
    pub fn is_sent_by(&self, identity: &str) -> bool {
        self.sender_id == identity
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub sender_phone: Option<String>,
    pub recipient_phone: Option<String>,
    pub transaction_number: Option<String>,
    pub amount: Option<Decimal>,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Transfer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            sender_id: model.sender_id,
            recipient_id: model.recipient_id,
            sender_phone: model.sender_phone,
            recipient_phone: model.recipient_phone,
            transaction_number: model.transaction_number,
            amount: model.amount,
            status: model.status,
            created_at: model.created_at,
        }
    }
}
