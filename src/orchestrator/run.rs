//! Daily report run
//! Coordinates the pipeline: fetch per symbol → score → assemble per client → store → deliver

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{error, info, warn};

use super::Providers;
use crate::{
    config::{Config, StockMapping},
    data::{
        provider::best_effort, DataResult, LexiconPolarity, NewsItem, Polarity, Profile, Quote,
        Symbol,
    },
    delivery::{deliver_all, DeliverySummary, Mailer},
    pipeline::{ProfileResolver, SentimentAggregator},
    report::{MarketSnapshot, ReportAssembler, ReportStore},
};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Leave the rendered reports on disk and skip delivery
    pub keep_files: bool,
    pub today: NaiveDate,
}

impl RunOptions {
    pub fn for_today(keep_files: bool) -> Self {
        Self {
            keep_files,
            today: Local::now().date_naive(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports_written: Vec<String>,
    pub report_failures: Vec<String>,
    /// `None` when delivery was skipped
    pub delivery: Option<DeliverySummary>,
}

/// Everything fetched for one symbol
struct SymbolData {
    symbol: Symbol,
    profile: Profile,
    quote: Quote,
    news: Vec<NewsItem>,
}

/// Report orchestrator
pub struct ReportOrchestrator {
    config: Config,
    providers: Providers,
    resolver: ProfileResolver,
    aggregator: SentimentAggregator,
}

impl ReportOrchestrator {
    pub fn new(config: Config, providers: Providers) -> Self {
        info!("Initializing Report Orchestrator");

        let resolver = ProfileResolver::new(
            providers.primary_profiles.clone(),
            providers.secondary_profiles.clone(),
            config.fetch.timeout(),
        );

        Self {
            config,
            providers,
            resolver,
            aggregator: SentimentAggregator::new(LexiconPolarity),
        }
    }

    /// Replace the default lexicon scorer
    pub fn with_polarity(mut self, polarity: impl Polarity + 'static) -> Self {
        self.aggregator = SentimentAggregator::new(polarity);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &ProfileResolver {
        &self.resolver
    }

    /// Fetch profile, quote and news for every symbol, then score sentiment.
    /// Each symbol is fetched once no matter how many clients follow it.
    pub async fn collect(&self, symbols: &[Symbol], today: NaiveDate) -> Result<MarketSnapshot> {
        let (from, to) = news_window(today, self.config.fetch.news_lookback_days)?;

        let mut seen = HashSet::new();
        let unique: Vec<Symbol> = symbols
            .iter()
            .filter(|s| seen.insert((*s).clone()))
            .cloned()
            .collect();

        info!(
            symbols = unique.len(),
            %from,
            %to,
            max_concurrent = self.config.fetch.max_concurrent,
            "Fetching market data"
        );

        let fetched: Vec<DataResult<SymbolData>> = stream::iter(unique)
            .map(|symbol| self.fetch_symbol(symbol, from, to))
            .buffer_unordered(self.config.fetch.max_concurrent)
            .collect()
            .await;

        let mut snapshot = MarketSnapshot::default();
        for result in fetched {
            let data = result.context("Market data fetch rejected its input")?;
            snapshot.profiles.insert(data.symbol.clone(), data.profile);
            snapshot.quotes.insert(data.symbol.clone(), data.quote);
            snapshot.news.insert(data.symbol, data.news);
        }
        info!("Got company profiles for {} companies", snapshot.profiles.len());

        snapshot.scores = self.aggregator.score_all(&snapshot.news);
        Ok(snapshot)
    }

    /// One symbol's profile, quote and news, fetched concurrently
    async fn fetch_symbol(
        &self,
        symbol: Symbol,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DataResult<SymbolData> {
        let timeout = self.config.fetch.timeout();
        let market = self.providers.market.as_ref();
        let quote_op = format!("{} quote for {}", market.name(), symbol);
        let news_op = format!("{} news for {}", market.name(), symbol);

        let (resolved, quote, news) = tokio::join!(
            self.resolver.resolve(&symbol),
            best_effort(&quote_op, timeout, market.fetch_quote(&symbol), Quote::default()),
            best_effort(
                &news_op,
                timeout,
                market.fetch_company_news(&symbol, from, to),
                Vec::new()
            ),
        );

        Ok(SymbolData {
            profile: resolved.profile,
            quote: quote?,
            news: news?,
            symbol,
        })
    }

    /// Full run: collect, write one report per client, then deliver and clean
    /// up unless `options.keep_files` is set
    pub async fn run(
        &self,
        mapping: &StockMapping,
        mailer: &dyn Mailer,
        options: RunOptions,
    ) -> Result<RunSummary> {
        info!(date = %options.today, "🗞️ Starting report run");

        let clients = mapping.clients()?;
        let symbols = StockMapping::all_symbols(&clients);
        let snapshot = self.collect(&symbols, options.today).await?;

        let store = ReportStore::prepare(self.config.report.output_dir.clone())
            .await
            .context("Failed to prepare report directory")?;
        let assembler =
            ReportAssembler::new(self.config.report.chart_base_url.clone(), options.today);

        let mut summary = RunSummary::default();
        for client in &clients {
            let document = match assembler.assemble(client, &snapshot) {
                Ok(document) => document,
                Err(e) => {
                    error!(client = %client.email, error = %e, "Failed to assemble report");
                    summary.report_failures.push(client.email.clone());
                    continue;
                }
            };
            match store.write(&document).await {
                Ok(path) => {
                    info!(client = %client.email, path = %path.display(), "Report generated");
                    summary.reports_written.push(client.email.clone());
                }
                Err(e) => {
                    error!(client = %client.email, error = %e, "Failed to write report");
                    summary.report_failures.push(client.email.clone());
                }
            }
        }

        if options.keep_files {
            info!(path = %store.root().display(), "Keeping reports, delivery skipped");
            return Ok(summary);
        }

        let delivery = deliver_all(&store, &clients, &mapping.sender, options.today, mailer)
            .await
            .context("Failed to read generated reports")?;
        if !delivery.all_delivered() {
            warn!(failed = delivery.failed.len(), "Some reports were not delivered");
        }
        summary.delivery = Some(delivery);

        store
            .cleanup()
            .await
            .context("Failed to remove report directory")?;

        info!(
            reports = summary.reports_written.len(),
            failures = summary.report_failures.len(),
            "✅ Report run complete"
        );
        Ok(summary)
    }
}

/// Company news window: `today - lookback_days ..= today - 1`
pub fn news_window(today: NaiveDate, lookback_days: u32) -> Result<(NaiveDate, NaiveDate)> {
    let from = today
        .checked_sub_days(Days::new(u64::from(lookback_days)))
        .context("News window start is out of range")?;
    let to = today
        .checked_sub_days(Days::new(1))
        .context("News window end is out of range")?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_window_default() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (from, to) = news_window(today, 2).unwrap();
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(to, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_news_window_single_day() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let (from, to) = news_window(today, 1).unwrap();
        assert_eq!(from, to);
        assert_eq!(to, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }
}
