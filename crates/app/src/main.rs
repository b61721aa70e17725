use std::sync::Arc;

use clap::Parser;
use history::{Aggregator, HistorySnapshot, LoadOptions, TransactionHistory};
use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = settings::Args::parse();
    let settings = settings::Settings::new(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "wallet_history={level},history={level}",
            level = settings.app.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let db = sea_orm::Database::connect(settings.database.url()).await?;
    if args.migrate || settings.database.needs_migration() {
        tracing::info!("running migrations...");
        Migrator::up(&db, None).await?;
    }

    let aggregator = Aggregator::from_database(&db, settings.history)?;
    tracing::debug!(?aggregator, "aggregator ready");
    let history = TransactionHistory::new(Arc::new(aggregator));

    if args.user.is_none() {
        tracing::warn!("no --user given, history is empty");
    }
    let options = LoadOptions {
        display_limit: args.limit,
        max_rows_per_source: args.max_rows,
    };
    let snapshot = history.load(args.user.as_deref(), options).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }

    match snapshot.error {
        Some(err) => Err(err.to_string().into()),
        None => Ok(()),
    }
}

fn print_snapshot(snapshot: &HistorySnapshot) {
    for tx in &snapshot.transactions {
        let amount = tx.amount.to_string();
        println!(
            "{}  {amount:>12}  {:<18} {:<10} {}",
            tx.occurred_at.format("%Y-%m-%d %H:%M"),
            tx.kind.as_str(),
            tx.status,
            tx.description
        );
    }
    println!(
        "{} of {} transactions",
        snapshot.transactions.len(),
        snapshot.total_count
    );
}
