use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use tracing::{info, warn};

use stockreport::config::{Config, StockMapping};
use stockreport::data::{FinnhubClient, NewsApiClient, NewsItem, SentimentScore, Symbol};
use stockreport::delivery::{DryRunMailer, Mailer, OutboxMailer};
use stockreport::orchestrator::{Providers, ReportOrchestrator, RunOptions};

fn orchestrator(config: Config) -> Result<ReportOrchestrator> {
    let providers = Providers::from_config(&config)?;
    Ok(ReportOrchestrator::new(config, providers))
}

/// Outbox when configured, otherwise log only
fn mailer(config: &Config) -> Box<dyn Mailer> {
    match &config.report.outbox_dir {
        Some(dir) => Box::new(OutboxMailer::new(dir.clone())),
        None => {
            warn!("MAIL_OUTBOX_DIR is not set, messages will only be logged");
            Box::new(DryRunMailer)
        }
    }
}

/// Generate and deliver every client's report
pub async fn run(
    config: Config,
    mapping_path: PathBuf,
    keep: bool,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mapping = StockMapping::from_path(&mapping_path)?;
    let mailer = mailer(&config);
    let orchestrator = orchestrator(config)?;

    let mut options = RunOptions::for_today(keep);
    if let Some(date) = date {
        options.today = date;
    }

    let summary = orchestrator.run(&mapping, mailer.as_ref(), options).await?;

    println!("\n✅ Report run finished");
    println!("   Reports written: {}", summary.reports_written.len());
    for client in &summary.report_failures {
        println!("   ❌ No report for {}", client);
    }
    match &summary.delivery {
        Some(delivery) => {
            println!("   Delivered: {}", delivery.delivered.len());
            for (client, error) in &delivery.failed {
                println!("   ❌ {}: {}", client, error);
            }
        }
        None => println!(
            "   Delivery skipped, reports kept in {}",
            orchestrator.config().report.output_dir.display()
        ),
    }

    Ok(())
}

/// Resolve and print one company profile
pub async fn profile(config: Config, symbol: String) -> Result<()> {
    let symbol = Symbol::new(&symbol)?;
    let orchestrator = orchestrator(config)?;

    let resolved = orchestrator.resolver().resolve(&symbol).await;
    info!(%symbol, origin = ?resolved.origin, "Profile resolved");

    println!("\n📇 {}", symbol);
    println!("   Name:     {}", resolved.profile.name);
    println!("   Industry: {}", resolved.profile.industry);
    println!("   Source:   {:?}", resolved.origin);
    Ok(())
}

/// Fetch recent company news for one symbol and print its sentiment
pub async fn sentiment(config: Config, symbol: String) -> Result<()> {
    let symbol = Symbol::new(&symbol)?;
    let orchestrator = orchestrator(config)?;

    let snapshot = orchestrator
        .collect(std::slice::from_ref(&symbol), Local::now().date_naive())
        .await?;
    let articles = snapshot.news.get(&symbol).map_or(0, Vec::len);
    let score = snapshot
        .scores
        .get(&symbol)
        .copied()
        .unwrap_or(SentimentScore::NotAvailable);

    println!("\n📰 {} sentiment: {} ({} articles)", symbol, score, articles);
    Ok(())
}

/// Print NewsAPI top headlines
pub async fn headlines(config: Config, category: String) -> Result<()> {
    let api_key = config
        .apis
        .news_api_key
        .clone()
        .context("NEWS_API_KEY environment variable is required for headlines")?;
    let client = NewsApiClient::new(api_key, config.fetch.timeout())?;

    let items = client.top_headlines(&category).await?;
    print_news(&format!("Top headlines: {}", category), &items);
    Ok(())
}

/// Print Finnhub market news for a category
pub async fn market_news(config: Config, category: String) -> Result<()> {
    let client = FinnhubClient::new(config.apis.finnhub_api_key.clone(), config.fetch.timeout())?;

    let items = client.fetch_market_news(&category).await?;
    print_news(&format!("Market news: {}", category), &items);
    Ok(())
}

fn print_news(title: &str, items: &[NewsItem]) {
    println!("\n🗞️  {} ({} articles)", title, items.len());
    for item in items {
        println!(
            "   [{}] {} ({})",
            item.published_at.format("%Y-%m-%d %H:%M"),
            item.headline,
            item.source
        );
    }
}
