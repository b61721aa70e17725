//! Deposits to and withdrawals from third-party betting platforms.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BettingTransaction {
    pub id: String,
    pub user_id: String,
    /// `deposit` when money goes to the platform, `withdraw` when it comes
    /// back.
    pub transaction_type: String,
    pub amount: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Display name of the joined platform, if the join resolved.
    pub platform_name: Option<String>,
}

impl BettingTransaction {
    pub fn is_platform_deposit(&self) -> bool {
        self.transaction_type.trim().eq_ignore_ascii_case("deposit")
    }
}

pub mod platforms {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "betting_platforms")]
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
#[sea_orm(table_name = "betting_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub platform_id: Option<String>,
    pub transaction_type: String,
    pub amount: Option<Decimal>,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "platforms::Entity",
        from = "Column::PlatformId",
        to = "platforms::Column::Id"
    )]
    Platform,
}

impl Related<platforms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Platform.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<(Model, Option<platforms::Model>)> for BettingTransaction {
    fn from((model, platform): (Model, Option<platforms::Model>)) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            transaction_type: model.transaction_type,
            amount: model.amount,
            status: model.status,
            created_at: model.created_at,
            platform_name: platform.and_then(|p| p.name),
        }
    }
}
