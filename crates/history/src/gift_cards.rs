//! Gift cards and their redemption.
//!
//! Cards are not owned by anyone until redeemed; a redeemed card records who
//! used it and when.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GiftCardRedemption {
    pub id: String,
    pub card_code: String,
    pub amount: Option<Decimal>,
    pub is_used: bool,
    pub used_by: Option<String>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl GiftCardRedemption {
    /// Redemption time, or creation time for rows that never stored one.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.used_at.unwrap_or(self.created_at)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gift_cards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub card_code: String,
    pub amount: Option<Decimal>,
    pub is_used: bool,
    pub used_by: Option<String>,
    pub used_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for GiftCardRedemption {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            card_code: model.card_code,
            amount: model.amount,
            is_used: model.is_used,
            used_by: model.used_by,
            used_at: model.used_at,
            created_at: model.created_at,
        }
    }
}
