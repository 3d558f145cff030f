use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub mod mapping;

pub use mapping::{ClientMapping, StockMapping};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub apis: ApiConfig,
    pub fetch: FetchConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub finnhub_api_key: String,
    pub news_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Deadline for a single provider call; expiry counts as an empty payload
    pub timeout_seconds: u64,
    pub max_concurrent: usize,
    /// Company news window is `today - lookback_days ..= today - 1`
    pub news_lookback_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub chart_base_url: Option<String>,
    /// When set, messages are spooled here instead of only logged
    pub outbox_dir: Option<PathBuf>,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file - this sets env vars that aren't already set
        dotenv::dotenv().ok();

        let finnhub_api_key = env::var("FINNHUB_API_KEY")
            .context("FINNHUB_API_KEY environment variable is required but not set")?;

        let config = Config {
            apis: ApiConfig {
                finnhub_api_key,
                news_api_key: env::var("NEWS_API_KEY").ok().filter(|k| !k.is_empty()),
            },
            fetch: FetchConfig {
                timeout_seconds: parse_var("FETCH_TIMEOUT_SECONDS", 10)?,
                max_concurrent: parse_var("MAX_CONCURRENT_FETCHES", 4)?,
                news_lookback_days: parse_var("NEWS_LOOKBACK_DAYS", 2)?,
            },
            report: ReportConfig {
                output_dir: env::var("REPORT_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("tmp")),
                chart_base_url: env::var("CHART_BASE_URL").ok().filter(|u| !u.is_empty()),
                outbox_dir: env::var("MAIL_OUTBOX_DIR").ok().map(PathBuf::from),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_seconds == 0 {
            anyhow::bail!("FETCH_TIMEOUT_SECONDS must be at least 1");
        }
        if self.fetch.max_concurrent == 0 {
            anyhow::bail!("MAX_CONCURRENT_FETCHES must be at least 1");
        }
        if self.fetch.news_lookback_days == 0 {
            anyhow::bail!("NEWS_LOOKBACK_DAYS must be at least 1");
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            apis: ApiConfig {
                finnhub_api_key: String::new(),
                news_api_key: None,
            },
            fetch: FetchConfig {
                timeout_seconds: 10,
                max_concurrent: 4,
                news_lookback_days: 2,
            },
            report: ReportConfig {
                output_dir: PathBuf::from("tmp"),
                chart_base_url: None,
                outbox_dir: None,
            },
        }
    }
}
