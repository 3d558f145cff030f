//! Data layer: typed market entities and the provider adapters that produce them
//! Raw provider payloads are converted into these types at one boundary per provider

pub mod errors;
pub mod market;
pub mod news;
pub mod provider;
pub mod sentiment;
pub mod yahoo;

// Re-export commonly used types
pub use errors::{DataError, DataResult};
pub use market::FinnhubClient;
pub use news::NewsApiClient;
pub use provider::{MarketDataProvider, ProfileProvider};
pub use sentiment::{LexiconPolarity, Polarity};
pub use yahoo::YahooClient;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Uppercase ticker, the key of every per-stock map
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> DataResult<Self> {
        let normalized = raw.trim().to_uppercase();
        validation::validate_symbol(&normalized)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DataError;

    fn try_from(value: String) -> DataResult<Self> {
        Symbol::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// Display profile of a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub industry: String,
}

impl Profile {
    /// Both fields fall back to the raw ticker
    pub fn placeholder(symbol: &Symbol) -> Self {
        Self {
            name: symbol.to_string(),
            industry: symbol.to_string(),
        }
    }
}

/// One provider's profile response, reduced to the fields the report needs.
///
/// `field_count` is how many fields the provider actually returned; a payload
/// with zero fields is "empty" and triggers fallback to the next provider.
/// Blank strings are stored as `None` so they never reach a report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePayload {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub field_count: usize,
}

impl ProfilePayload {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(name: Option<&str>, industry: Option<&str>, field_count: usize) -> Self {
        Self {
            name: non_blank(name),
            industry: non_blank(industry),
            field_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field_count == 0
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Latest quote. Serialized with the provider's short keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "o", default)]
    pub open: f64,
    #[serde(rename = "h", default)]
    pub high: f64,
    #[serde(rename = "l", default)]
    pub low: f64,
    #[serde(rename = "c", default)]
    pub close: f64,
    #[serde(rename = "pc", default)]
    pub previous_close: f64,
}

/// News article in provider (relevance) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub source: String,
    pub url: String,
    pub image: String,
    pub summary: String,
    pub published_at: DateTime<Utc>,
    /// Owning company; `None` for category headlines
    pub symbol: Option<Symbol>,
}

/// Per-company sentiment. `NotAvailable` means there was no text to score,
/// which is not the same thing as a neutral `Score(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SentimentScore {
    Score(f64),
    NotAvailable,
}

impl fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentScore::Score(v) => write!(f, "{}", v),
            SentimentScore::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// Report recipient and the stocks they follow, in declared order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub email: String,
    pub stocks: Vec<Symbol>,
}

impl Client {
    /// Normalizes and de-duplicates symbols, keeping first occurrence order
    pub fn new<S: AsRef<str>>(email: &str, stocks: &[S]) -> DataResult<Self> {
        let mut symbols: Vec<Symbol> = Vec::with_capacity(stocks.len());
        for raw in stocks {
            let symbol = Symbol::new(raw.as_ref())?;
            if !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        Ok(Self {
            email: email.trim().to_string(),
            stocks: symbols,
        })
    }
}

/// Validation helpers
pub mod validation {
    use super::*;
    use chrono::NaiveDate;

    /// Validate a normalized ticker (letters, digits, `.`, `-`, `^`)
    pub fn validate_symbol(symbol: &str) -> DataResult<()> {
        if symbol.is_empty() || symbol.len() > 12 {
            return Err(DataError::InvalidSymbol(symbol.to_string()));
        }

        if !symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^'))
        {
            return Err(DataError::InvalidSymbol(symbol.to_string()));
        }

        Ok(())
    }

    /// Parse a `YYYY-MM-DD` date
    pub fn parse_date(date: &str) -> DataResult<NaiveDate> {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| DataError::InvalidDate(date.to_string()))
    }

    /// Lowercases `category` and checks it against `valid`
    pub fn validate_category(category: &str, valid: &[&str]) -> DataResult<String> {
        let category = category.trim().to_lowercase();
        if valid.contains(&category.as_str()) {
            Ok(category)
        } else {
            Err(DataError::invalid_category(&category, valid))
        }
    }
}
