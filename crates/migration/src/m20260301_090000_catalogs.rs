use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BettingPlatforms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BettingPlatforms::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BettingPlatforms::Name).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GamePlatforms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GamePlatforms::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GamePlatforms::Name).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DigitalCardTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DigitalCardTypes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DigitalCardTypes::Name).string())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DigitalCardTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GamePlatforms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BettingPlatforms::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
pub enum BettingPlatforms {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum GamePlatforms {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
pub enum DigitalCardTypes {
    Table,
    Id,
    Name,
}
