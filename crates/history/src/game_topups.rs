//! In-game currency top-ups bought from the wallet.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameTopup {
    pub id: String,
    pub user_id: String,
    pub amount: Option<Decimal>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub platform_name: Option<String>,
}

pub mod platforms {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "game_platforms")]
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
#[sea_orm(table_name = "game_topup_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub platform_id: Option<String>,
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

impl From<(Model, Option<platforms::Model>)> for GameTopup {
    fn from((model, platform): (Model, Option<platforms::Model>)) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            amount: model.amount,
            status: model.status,
            created_at: model.created_at,
            platform_name: platform.and_then(|p| p.name),
        }
    }
}
