use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::charts::ChartSet;
use super::layout::{layout, NewsLayout};
use super::{ReportError, ReportResult};
use crate::data::{Client, NewsItem, Profile, Quote, SentimentScore, Symbol};

/// Everything fetched for one run, keyed by symbol. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    pub profiles: HashMap<Symbol, Profile>,
    pub quotes: HashMap<Symbol, Quote>,
    pub scores: HashMap<Symbol, SentimentScore>,
    pub news: HashMap<Symbol, Vec<NewsItem>>,
}

/// How a sentiment value is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentClass {
    Positive,
    Negative,
    Unavailable,
}

impl SentimentClass {
    pub fn css_class(&self) -> &'static str {
        match self {
            SentimentClass::Positive => "Pos-sentiment-value",
            SentimentClass::Negative => "Neg-sentiment-value",
            SentimentClass::Unavailable => "Def-sentiment-value",
        }
    }
}

impl From<SentimentScore> for SentimentClass {
    /// Only strictly negative scores are negative; zero is positive
    fn from(score: SentimentScore) -> Self {
        match score {
            SentimentScore::NotAvailable => SentimentClass::Unavailable,
            SentimentScore::Score(v) if v < 0.0 => SentimentClass::Negative,
            SentimentScore::Score(_) => SentimentClass::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSection {
    pub symbol: Symbol,
    pub profile: Profile,
    pub quote: Quote,
    pub sentiment: SentimentScore,
    pub sentiment_class: SentimentClass,
    pub news: NewsLayout,
    pub charts: Option<ChartSet>,
}

/// One client's report: sections in the client's declared stock order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub client: String,
    pub date: NaiveDate,
    pub sections: Vec<StockSection>,
}

pub struct ReportAssembler {
    chart_base_url: Option<String>,
    date: NaiveDate,
}

impl ReportAssembler {
    pub fn new(chart_base_url: Option<String>, date: NaiveDate) -> Self {
        Self {
            chart_base_url,
            date,
        }
    }

    /// Build the document for `client`. Every client symbol must already be
    /// present in every map of `snapshot`; nothing is fetched here.
    pub fn assemble(&self, client: &Client, snapshot: &MarketSnapshot) -> ReportResult<ReportDocument> {
        let sections = client
            .stocks
            .iter()
            .map(|symbol| self.section(symbol, snapshot))
            .collect::<ReportResult<Vec<_>>>()?;

        Ok(ReportDocument {
            client: client.email.clone(),
            date: self.date,
            sections,
        })
    }

    fn section(&self, symbol: &Symbol, snapshot: &MarketSnapshot) -> ReportResult<StockSection> {
        let profile = lookup(&snapshot.profiles, symbol, "profile")?;
        let quote = lookup(&snapshot.quotes, symbol, "quote")?;
        let sentiment = *lookup(&snapshot.scores, symbol, "sentiment")?;
        let news = layout(lookup(&snapshot.news, symbol, "news")?);
        debug!(%symbol, articles = news.article_count(), "Section assembled");

        Ok(StockSection {
            symbol: symbol.clone(),
            profile: profile.clone(),
            quote: *quote,
            sentiment,
            sentiment_class: SentimentClass::from(sentiment),
            news,
            charts: self
                .chart_base_url
                .as_deref()
                .map(|base| ChartSet::for_symbol(base, self.date, symbol)),
        })
    }
}

fn lookup<'a, T>(
    map: &'a HashMap<Symbol, T>,
    symbol: &Symbol,
    entry: &'static str,
) -> ReportResult<&'a T> {
    map.get(symbol).ok_or_else(|| ReportError::MissingEntry {
        symbol: symbol.clone(),
        entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(symbols: &[&str]) -> MarketSnapshot {
        let mut snapshot = MarketSnapshot::default();
        // Insert in reverse to make sure order comes from the client, not the maps
        for (i, raw) in symbols.iter().enumerate().rev() {
            let symbol = Symbol::new(raw).unwrap();
            snapshot.profiles.insert(symbol.clone(), Profile::placeholder(&symbol));
            snapshot.quotes.insert(
                symbol.clone(),
                Quote {
                    close: i as f64,
                    ..Quote::default()
                },
            );
            snapshot.scores.insert(symbol.clone(), SentimentScore::Score(0.0));
            snapshot.news.insert(symbol, Vec::new());
        }
        snapshot
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_sentiment_classification() {
        assert_eq!(SentimentClass::from(SentimentScore::Score(-0.01)), SentimentClass::Negative);
        assert_eq!(SentimentClass::from(SentimentScore::Score(0.0)), SentimentClass::Positive);
        assert_eq!(SentimentClass::from(SentimentScore::Score(0.5)), SentimentClass::Positive);
        assert_eq!(SentimentClass::from(SentimentScore::NotAvailable), SentimentClass::Unavailable);
        assert_eq!(SentimentClass::Unavailable.css_class(), "Def-sentiment-value");
    }

    #[test]
    fn test_sections_follow_client_order() {
        let snapshot = snapshot(&["AAA", "BBB", "CCC"]);
        let client = Client::new("x@example.com", &["ccc", "aaa", "bbb"]).unwrap();

        let document = ReportAssembler::new(None, date()).assemble(&client, &snapshot).unwrap();
        let order: Vec<&str> = document.sections.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(order, vec!["CCC", "AAA", "BBB"]);
        assert_eq!(document.client, "x@example.com");
        assert!(document.sections.iter().all(|s| s.charts.is_none()));
        assert!(document.sections.iter().all(|s| s.news.is_empty()));
    }

    #[test]
    fn test_missing_entry_is_an_error() {
        let mut snapshot = snapshot(&["AAA", "BBB"]);
        snapshot.quotes.remove(&Symbol::new("BBB").unwrap());
        let client = Client::new("x@example.com", &["AAA", "BBB"]).unwrap();

        let err = ReportAssembler::new(None, date())
            .assemble(&client, &snapshot)
            .unwrap_err();
        match err {
            ReportError::MissingEntry { symbol, entry } => {
                assert_eq!(symbol.as_str(), "BBB");
                assert_eq!(entry, "quote");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_charts_attached_when_configured() {
        let snapshot = snapshot(&["AAA"]);
        let client = Client::new("x@example.com", &["AAA"]).unwrap();

        let document = ReportAssembler::new(Some("https://charts.example".to_string()), date())
            .assemble(&client, &snapshot)
            .unwrap();
        let charts = document.sections[0].charts.as_ref().unwrap();
        assert_eq!(charts.one_week, "https://charts.example/20240301/AAA_1wk.png");
    }
}
