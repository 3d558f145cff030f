use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::provider::{MarketDataProvider, ProfileProvider};
use super::validation::validate_category;
use super::{DataError, DataResult, NewsItem, ProfilePayload, Quote, Symbol};

pub const FINNHUB_URL: &str = "https://finnhub.io/api/v1";

/// Categories accepted by the market news endpoint
pub const MARKET_NEWS_CATEGORIES: &[&str] = &["general", "forex", "crypto", "merger"];

/// Finnhub news API response item
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct FinnhubNews {
    #[serde(default)]
    category: String,
    /// Unix seconds
    #[serde(default)]
    datetime: i64,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    id: i64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    related: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    url: String,
}

/// Finnhub client: primary source for profiles, quotes and company news
pub struct FinnhubClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FinnhubClient {
    pub fn new(api_key: String, timeout: std::time::Duration) -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockreport/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: FINNHUB_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> DataResult<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, ?query, "Finnhub request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("token", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(%url, status_code, "Finnhub request failed: {}", error_text);
            return Err(DataError::api_error(
                status_code,
                format!("Finnhub: {}", error_text),
            ));
        }

        Ok(response.json().await?)
    }

    /// General market news for one of [`MARKET_NEWS_CATEGORIES`]
    pub async fn fetch_market_news(&self, category: &str) -> DataResult<Vec<NewsItem>> {
        let category = validate_category(category, MARKET_NEWS_CATEGORIES)?;
        tracing::debug!(%category, "Getting general news");

        let raw: Vec<FinnhubNews> = self
            .get_json("/news", &[("category", category), ("minId", "0".to_string())])
            .await?;
        Ok(news_from_finnhub(raw, None))
    }
}

#[async_trait]
impl ProfileProvider for FinnhubClient {
    async fn fetch_profile(&self, symbol: &Symbol) -> DataResult<ProfilePayload> {
        tracing::debug!(%symbol, "Getting company profile");
        let raw: Value = self
            .get_json("/stock/profile2", &[("symbol", symbol.to_string())])
            .await?;
        profile_from_finnhub(&raw)
    }

    fn name(&self) -> &str {
        "finnhub"
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubClient {
    async fn fetch_quote(&self, symbol: &Symbol) -> DataResult<Quote> {
        tracing::debug!(%symbol, "Getting stock quote");
        self.get_json("/quote", &[("symbol", symbol.to_string())])
            .await
    }

    async fn fetch_company_news(
        &self,
        symbol: &Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DataResult<Vec<NewsItem>> {
        tracing::debug!(%symbol, %from, %to, "Getting company news");
        let raw: Vec<FinnhubNews> = self
            .get_json(
                "/company-news",
                &[
                    ("symbol", symbol.to_string()),
                    ("from", from.format("%Y-%m-%d").to_string()),
                    ("to", to.format("%Y-%m-%d").to_string()),
                ],
            )
            .await?;
        Ok(news_from_finnhub(raw, Some(symbol)))
    }

    fn name(&self) -> &str {
        "finnhub"
    }
}

/// `stock/profile2` returns `{}` for unknown symbols
fn profile_from_finnhub(raw: &Value) -> DataResult<ProfilePayload> {
    let fields: &Map<String, Value> = raw
        .as_object()
        .ok_or_else(|| DataError::parse_error("Finnhub profile is not a JSON object"))?;

    Ok(ProfilePayload::new(
        fields.get("name").and_then(Value::as_str),
        fields.get("finnhubIndustry").and_then(Value::as_str),
        fields.len(),
    ))
}

/// Keeps provider order; items with an unrepresentable timestamp are dropped
fn news_from_finnhub(raw: Vec<FinnhubNews>, symbol: Option<&Symbol>) -> Vec<NewsItem> {
    raw.into_iter()
        .filter_map(|item| {
            let Some(published_at) = DateTime::from_timestamp(item.datetime, 0) else {
                tracing::warn!(timestamp = item.datetime, headline = %item.headline, "Dropping news item with invalid timestamp");
                return None;
            };
            Some(NewsItem {
                headline: item.headline,
                source: item.source,
                url: item.url,
                image: item.image,
                summary: item.summary,
                published_at,
                symbol: symbol.cloned(),
            })
        })
        .collect()
}
