// stockreport - daily per-client stock reports
// Pulls company profiles, quotes and news from market data providers, scores
// news sentiment, renders one HTML report per client and hands it to a mailer.

#![deny(clippy::unwrap_used)]

pub mod config;
pub mod data;
pub mod delivery;
pub mod orchestrator;
pub mod pipeline;
pub mod report;

// Re-export commonly used items
pub use config::{Config, StockMapping};
pub use data::{Client, DataError, NewsItem, Profile, Quote, SentimentScore, Symbol};
pub use orchestrator::{Providers, ReportOrchestrator, RunOptions, RunSummary};
pub use report::{MarketSnapshot, ReportDocument};
