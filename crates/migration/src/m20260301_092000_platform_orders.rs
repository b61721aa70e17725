use sea_orm_migration::prelude::*;

use crate::m20260301_090000_catalogs::{BettingPlatforms, DigitalCardTypes, GamePlatforms};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum BettingTransactions {
    Table,
    Id,
    UserId,
    PlatformId,
    TransactionType,
    Amount,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum GameTopupOrders {
    Table,
    Id,
    UserId,
    PlatformId,
    Amount,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum DigitalCardOrders {
    Table,
    Id,
    UserId,
    CardTypeId,
    AmountUsd,
    TotalDzd,
    Status,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BettingTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BettingTransactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BettingTransactions::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BettingTransactions::PlatformId).string())
                    .col(
                        ColumnDef::new(BettingTransactions::TransactionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BettingTransactions::Amount).decimal_len(14, 2))
                    .col(
                        ColumnDef::new(BettingTransactions::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BettingTransactions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-betting_transactions-platform_id")
                            .from(BettingTransactions::Table, BettingTransactions::PlatformId)
                            .to(BettingPlatforms::Table, BettingPlatforms::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-betting_transactions-user_id-created_at")
                    .table(BettingTransactions::Table)
                    .col(BettingTransactions::UserId)
                    .col(BettingTransactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GameTopupOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameTopupOrders::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameTopupOrders::UserId).string().not_null())
                    .col(ColumnDef::new(GameTopupOrders::PlatformId).string())
                    .col(ColumnDef::new(GameTopupOrders::Amount).decimal_len(14, 2))
                    .col(ColumnDef::new(GameTopupOrders::Status).string().not_null())
                    .col(
                        ColumnDef::new(GameTopupOrders::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-game_topup_orders-platform_id")
                            .from(GameTopupOrders::Table, GameTopupOrders::PlatformId)
                            .to(GamePlatforms::Table, GamePlatforms::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-game_topup_orders-user_id-created_at")
                    .table(GameTopupOrders::Table)
                    .col(GameTopupOrders::UserId)
                    .col(GameTopupOrders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DigitalCardOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DigitalCardOrders::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DigitalCardOrders::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DigitalCardOrders::CardTypeId).string())
                    .col(ColumnDef::new(DigitalCardOrders::AmountUsd).decimal_len(14, 2))
                    .col(ColumnDef::new(DigitalCardOrders::TotalDzd).decimal_len(14, 2))
                    .col(
                        ColumnDef::new(DigitalCardOrders::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DigitalCardOrders::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-digital_card_orders-card_type_id")
                            .from(DigitalCardOrders::Table, DigitalCardOrders::CardTypeId)
                            .to(DigitalCardTypes::Table, DigitalCardTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-digital_card_orders-user_id-created_at")
                    .table(DigitalCardOrders::Table)
                    .col(DigitalCardOrders::UserId)
                    .col(DigitalCardOrders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DigitalCardOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameTopupOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BettingTransactions::Table).to_owned())
            .await?;
        Ok(())
    }
}
