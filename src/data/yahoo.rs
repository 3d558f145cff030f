use async_trait::async_trait;
use serde_json::Value;

use super::provider::ProfileProvider;
use super::{DataError, DataResult, ProfilePayload, Symbol};

pub const YAHOO_QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Yahoo Finance quote summary, the secondary profile source
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(timeout: std::time::Duration) -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockreport/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: YAHOO_QUOTE_SUMMARY_URL.to_string(),
        })
    }
}

#[async_trait]
impl ProfileProvider for YahooClient {
    async fn fetch_profile(&self, symbol: &Symbol) -> DataResult<ProfilePayload> {
        let url = format!("{}/{}", self.base_url, urlencoding::encode(symbol.as_str()));
        tracing::debug!(%symbol, "Getting Yahoo quote summary");

        let response = self
            .client
            .get(&url)
            .query(&[("modules", "price,assetProfile")])
            .send()
            .await?;

        // Unknown tickers come back as 404 with an error body
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(ProfilePayload::empty());
        }
        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            return Err(DataError::api_error(status_code, "Yahoo quote summary request failed"));
        }

        let raw: Value = response.json().await?;
        profile_from_quote_summary(&raw)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

/// Flattens the `price` and `assetProfile` modules of the first result
fn profile_from_quote_summary(raw: &Value) -> DataResult<ProfilePayload> {
    let summary = raw
        .get("quoteSummary")
        .ok_or_else(|| DataError::parse_error("Missing quoteSummary in Yahoo response"))?;

    let Some(result) = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
    else {
        return Ok(ProfilePayload::empty());
    };

    let module = |name: &str| result.get(name).and_then(Value::as_object);
    let price = module("price");
    let asset_profile = module("assetProfile");

    let field_count = price.map_or(0, |m| m.len()) + asset_profile.map_or(0, |m| m.len());
    let short_name = price.and_then(|m| m.get("shortName")).and_then(Value::as_str);
    let sector = asset_profile
        .and_then(|m| m.get("sector"))
        .and_then(Value::as_str);

    Ok(ProfilePayload::new(short_name, sector, field_count))
}
