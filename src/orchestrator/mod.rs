//! Orchestrator module for the daily report run
//! Fetches per-symbol market data, assembles and stores one report per client,
//! then hands the reports to delivery

pub mod run;

pub use run::{ReportOrchestrator, RunOptions, RunSummary};

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::data::{FinnhubClient, MarketDataProvider, ProfileProvider, YahooClient};

/// The upstream sources a run reads from
#[derive(Clone)]
pub struct Providers {
    pub primary_profiles: Arc<dyn ProfileProvider>,
    pub secondary_profiles: Arc<dyn ProfileProvider>,
    pub market: Arc<dyn MarketDataProvider>,
}

impl Providers {
    /// Finnhub for profiles, quotes and news; Yahoo as the profile fallback
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.fetch.timeout();
        let finnhub = Arc::new(
            FinnhubClient::new(config.apis.finnhub_api_key.clone(), timeout)
                .context("Failed to build Finnhub client")?,
        );
        let yahoo = Arc::new(YahooClient::new(timeout).context("Failed to build Yahoo client")?);

        Ok(Self {
            primary_profiles: finnhub.clone(),
            secondary_profiles: yahoo,
            market: finnhub,
        })
    }
}
