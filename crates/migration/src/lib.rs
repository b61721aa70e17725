pub use sea_orm_migration::prelude::*;

mod m20260301_090000_catalogs;
mod m20260301_091000_wallet_records;
mod m20260301_092000_platform_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_090000_catalogs::Migration),
            Box::new(m20260301_091000_wallet_records::Migration),
            Box::new(m20260301_092000_platform_orders::Migration),
        ]
    }
}
