//! Settings of the `wallet_history` binary.
//!
//! Values are read from an optional `settings` file (any format supported by
//! `config`), then from `WALLET_HISTORY__*` environment variables, and finally
//! overridden by command line flags.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use history::HistoryConfig;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Parser)]
#[command(name = "wallet_history", about = "Print the unified transaction history of a wallet")]
pub struct Args {
    /// Optional config file path.
    #[arg(long)]
    pub config: Option<String>,
    /// Database URL, overrides the `database` section.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Identity whose history is loaded. Without it the history is empty.
    #[arg(long)]
    pub user: Option<String>,
    /// Show only the newest `n` transactions.
    #[arg(long)]
    pub limit: Option<usize>,
    /// Override the per-source row ceiling.
    #[arg(long)]
    pub max_rows: Option<u64>,
    /// Run pending migrations before loading.
    #[arg(long)]
    pub migrate: bool,
    /// Print the snapshot as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    Memory,
    Sqlite(String),
    Url(String),
}

impl Database {
    pub fn url(&self) -> String {
        match self {
            Self::Memory => String::from("sqlite::memory:"),
            Self::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
            Self::Url(url) => url.clone(),
        }
    }

    /// An in-memory database starts without tables.
    pub fn needs_migration(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub database: Database,
    pub history: HistoryConfig,
}

impl Settings {
    pub fn new(args: &Args) -> Result<Self, ConfigError> {
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(args.config.is_some()))
            .add_source(Environment::with_prefix("WALLET_HISTORY").separator("__"))
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        if let Some(url) = &args.database_url {
            settings.database = Database::Url(url.clone());
        }
        Ok(settings)
    }
}
