//! Orders for digital prepaid cards.
//!
//! Cards are priced in USD but paid in local currency; `total_dzd` is what
//! actually leaves the wallet.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DigitalCardOrder {
    pub id: String,
    pub user_id: String,
    /// Face value of the card.
    pub amount_usd: Option<Decimal>,
    /// Local-currency total charged to the wallet, fees included.
    pub total_dzd: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub card_type_name: Option<String>,
}

pub mod card_types {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "digital_card_types")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub name: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "digital_card_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub card_type_id: Option<String>,
    pub amount_usd: Option<Decimal>,
    pub total_dzd: Option<Decimal>,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "card_types::Entity",
        from = "Column::CardTypeId",
        to = "card_types::Column::Id"
    )]
    CardType,
}

impl Related<card_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CardType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<(Model, Option<card_types::Model>)> for DigitalCardOrder {
    fn from((model, card_type): (Model, Option<card_types::Model>)) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            amount_usd: model.amount_usd,
            total_dzd: model.total_dzd,
            status: model.status,
            created_at: model.created_at,
            card_type_name: card_type.and_then(|c| c.name),
        }
    }
}
