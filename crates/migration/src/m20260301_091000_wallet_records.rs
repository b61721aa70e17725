use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Deposits {
    Table,
    Id,
    UserId,
    PaymentMethod,
    Amount,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Withdrawals {
    Table,
    Id,
    UserId,
    WithdrawalMethod,
    Amount,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Transfers {
    Table,
    Id,
    SenderId,
    RecipientId,
    SenderPhone,
    RecipientPhone,
    TransactionNumber,
    Amount,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum GiftCards {
    Table,
    Id,
    CardCode,
    Amount,
    IsUsed,
    UsedBy,
    UsedAt,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deposits::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Deposits::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Deposits::UserId).string().not_null())
                    .col(ColumnDef::new(Deposits::PaymentMethod).string())
                    .col(ColumnDef::new(Deposits::Amount).decimal_len(14, 2))
                    .col(ColumnDef::new(Deposits::Status).string().not_null())
                    .col(ColumnDef::new(Deposits::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-deposits-user_id-created_at")
                    .table(Deposits::Table)
                    .col(Deposits::UserId)
                    .col(Deposits::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Withdrawals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Withdrawals::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Withdrawals::UserId).string().not_null())
                    .col(ColumnDef::new(Withdrawals::WithdrawalMethod).string())
                    .col(ColumnDef::new(Withdrawals::Amount).decimal_len(14, 2))
                    .col(ColumnDef::new(Withdrawals::Status).string().not_null())
                    .col(
                        ColumnDef::new(Withdrawals::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-withdrawals-user_id-created_at")
                    .table(Withdrawals::Table)
                    .col(Withdrawals::UserId)
                    .col(Withdrawals::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transfers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Transfers::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Transfers::SenderId).string().not_null())
                    .col(ColumnDef::new(Transfers::RecipientId).string().not_null())
                    .col(ColumnDef::new(Transfers::SenderPhone).string())
                    .col(ColumnDef::new(Transfers::RecipientPhone).string())
                    .col(ColumnDef::new(Transfers::TransactionNumber).string())
                    .col(ColumnDef::new(Transfers::Amount).decimal_len(14, 2))
                    .col(ColumnDef::new(Transfers::Status).string().not_null())
                    .col(ColumnDef::new(Transfers::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transfers-sender_id")
                    .table(Transfers::Table)
                    .col(Transfers::SenderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transfers-recipient_id")
                    .table(Transfers::Table)
                    .col(Transfers::RecipientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GiftCards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GiftCards::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(GiftCards::CardCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GiftCards::Amount).decimal_len(14, 2))
                    .col(
                        ColumnDef::new(GiftCards::IsUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(GiftCards::UsedBy).string())
                    .col(ColumnDef::new(GiftCards::UsedAt).timestamp())
                    .col(ColumnDef::new(GiftCards::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-gift_cards-used_by")
                    .table(GiftCards::Table)
                    .col(GiftCards::UsedBy)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GiftCards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transfers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Withdrawals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Deposits::Table).to_owned())
            .await?;
        Ok(())
    }
}
