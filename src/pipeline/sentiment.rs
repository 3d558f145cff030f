//! Per-company sentiment from company news

use std::collections::HashMap;
use tracing::{debug, info};

use crate::data::{NewsItem, Polarity, SentimentScore, Symbol};

/// Reduces a company's news list to a single polarity score
pub struct SentimentAggregator {
    polarity: Box<dyn Polarity>,
}

impl SentimentAggregator {
    pub fn new(polarity: impl Polarity + 'static) -> Self {
        Self {
            polarity: Box::new(polarity),
        }
    }

    /// Mean polarity of every summary and headline, rounded to 2 decimals.
    /// No text at all gives `NotAvailable`, never a numeric zero.
    pub fn score(&self, news: &[NewsItem]) -> SentimentScore {
        let mut total = 0.0;
        let mut scored = 0usize;

        for fragment in fragments(news) {
            match self.polarity.polarity(fragment) {
                Some(value) => {
                    total += value;
                    scored += 1;
                }
                None => debug!(fragment, "Skipping fragment that could not be scored"),
            }
        }

        if scored == 0 {
            return SentimentScore::NotAvailable;
        }
        SentimentScore::Score(round2(total / scored as f64))
    }

    pub fn score_all(
        &self,
        news_by_symbol: &HashMap<Symbol, Vec<NewsItem>>,
    ) -> HashMap<Symbol, SentimentScore> {
        info!("Getting sentiment scores for {} companies", news_by_symbol.len());
        news_by_symbol
            .iter()
            .map(|(symbol, news)| {
                let score = self.score(news);
                debug!(%symbol, %score, "Sentiment scored");
                (symbol.clone(), score)
            })
            .collect()
    }
}

/// Summary then headline for each item, in news order
fn fragments(news: &[NewsItem]) -> impl Iterator<Item = &str> {
    news.iter()
        .flat_map(|item| [item.summary.as_str(), item.headline.as_str()])
}

/// Half away from zero; never returns negative zero
fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Looks the text up in a fixed table; unknown text cannot be scored
    struct TablePolarity(Vec<(&'static str, f64)>);

    impl Polarity for TablePolarity {
        fn polarity(&self, text: &str) -> Option<f64> {
            self.0.iter().find(|(t, _)| *t == text).map(|(_, v)| *v)
        }
    }

    fn item(summary: &str, headline: &str) -> NewsItem {
        NewsItem {
            headline: headline.to_string(),
            source: "Wire".to_string(),
            url: String::new(),
            image: String::new(),
            summary: summary.to_string(),
            published_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            symbol: None,
        }
    }

    #[test]
    fn test_empty_news_is_not_available() {
        let aggregator = SentimentAggregator::new(TablePolarity(vec![]));
        assert_eq!(aggregator.score(&[]), SentimentScore::NotAvailable);
    }

    #[test]
    fn test_mean_over_summary_and_headline() {
        let aggregator = SentimentAggregator::new(TablePolarity(vec![
            ("s1", 0.5),
            ("h1", 0.1),
            ("s2", -0.2),
            ("h2", 0.0),
        ]));
        let news = vec![item("s1", "h1"), item("s2", "h2")];
        // (0.5 + 0.1 - 0.2 + 0.0) / 4 = 0.1
        assert_eq!(aggregator.score(&news), SentimentScore::Score(0.1));
    }

    #[test]
    fn test_fragment_order_is_summary_first() {
        let news = vec![item("s1", "h1"), item("s2", "h2")];
        let order: Vec<&str> = fragments(&news).collect();
        assert_eq!(order, vec!["s1", "h1", "s2", "h2"]);
    }

    #[test]
    fn test_rounding() {
        let aggregator = SentimentAggregator::new(TablePolarity(vec![("a", 1.0), ("b", 1.0), ("c", -1.0)]));
        // (1 + 1 - 1) / 3 = 0.333.. -> 0.33
        let news = vec![item("a", "b"), item("c", "missing")];
        assert_eq!(aggregator.score(&news), SentimentScore::Score(0.33));

        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.126), -0.13);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(-0.001).is_sign_positive());
    }

    #[test]
    fn test_unscorable_fragments_are_skipped() {
        let aggregator = SentimentAggregator::new(TablePolarity(vec![("good", 0.8)]));
        let news = vec![item("good", "???")];
        assert_eq!(aggregator.score(&news), SentimentScore::Score(0.8));

        let nothing_scored = vec![item("???", "!!!")];
        assert_eq!(aggregator.score(&nothing_scored), SentimentScore::NotAvailable);
    }

    #[test]
    fn test_zero_is_a_score_not_sentinel() {
        let aggregator = SentimentAggregator::new(crate::data::LexiconPolarity);
        let news = vec![item("", "")];
        assert_eq!(aggregator.score(&news), SentimentScore::Score(0.0));
    }

    #[test]
    fn test_deterministic() {
        let aggregator = SentimentAggregator::new(crate::data::LexiconPolarity);
        let news = vec![
            item("Shares surge on record profit", "Acme beats estimates"),
            item("Analysts concerned about weak guidance", "Acme falls"),
        ];
        let first = aggregator.score(&news);
        for _ in 0..10 {
            assert_eq!(aggregator.score(&news), first);
        }
    }

    #[test]
    fn test_score_all_keys() {
        let aggregator = SentimentAggregator::new(crate::data::LexiconPolarity);
        let mut news = HashMap::new();
        news.insert(Symbol::new("AAA").unwrap(), vec![item("rally", "gain")]);
        news.insert(Symbol::new("BBB").unwrap(), vec![]);

        let scores = aggregator.score_all(&news);
        assert_eq!(scores[&Symbol::new("AAA").unwrap()], SentimentScore::Score(1.0));
        assert_eq!(scores[&Symbol::new("BBB").unwrap()], SentimentScore::NotAvailable);
    }
}
