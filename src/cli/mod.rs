use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use stockreport::config::Config;
use stockreport::data::validation;

pub mod commands;

#[derive(Parser)]
#[command(
    name = "stockreport",
    about = "Daily per-client stock reports delivered by email",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter (e.g. "debug", "stockreport=trace"); overrides RUST_LOG
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate every client's report and deliver it
    Run {
        /// TOML file mapping client emails to stock lists
        mapping: PathBuf,

        /// Keep the generated reports and skip delivery
        #[arg(short, long)]
        keep: bool,

        /// Report date, YYYY-MM-DD (defaults to today)
        #[arg(short, long, value_parser = parse_report_date)]
        date: Option<NaiveDate>,
    },

    /// Resolve and print one company profile
    Profile {
        #[arg(short, long)]
        symbol: String,
    },

    /// Score recent company news for one symbol
    Sentiment {
        #[arg(short, long)]
        symbol: String,
    },

    /// Top headlines from NewsAPI for a category or free-text query
    Headlines {
        #[arg(short, long, default_value = "business")]
        category: String,
    },

    /// Finnhub market news (general, forex, crypto, merger)
    MarketNews {
        #[arg(short, long, default_value = "general")]
        category: String,
    },
}

fn parse_report_date(raw: &str) -> Result<NaiveDate, String> {
    validation::parse_date(raw).map_err(|e| e.to_string())
}

/// Execute CLI command with loaded configuration
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Run { mapping, keep, date } => {
            info!("Running report pipeline for {}", mapping.display());
            commands::run(config, mapping, keep, date).await?;
        }
        Commands::Profile { symbol } => {
            info!("Resolving profile for {}", symbol);
            commands::profile(config, symbol).await?;
        }
        Commands::Sentiment { symbol } => {
            info!("Scoring news sentiment for {}", symbol);
            commands::sentiment(config, symbol).await?;
        }
        Commands::Headlines { category } => {
            info!("Fetching top headlines for {}", category);
            commands::headlines(config, category).await?;
        }
        Commands::MarketNews { category } => {
            info!("Fetching {} market news", category);
            commands::market_news(config, category).await?;
        }
    }
    Ok(())
}
