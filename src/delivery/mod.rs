//! Report delivery: locate each client's rendered report and mail it.
//! A failure for one client is recorded and never stops the others.

pub mod locator;
pub mod mail;

pub use locator::{client_prefix, find_report, sort_report_files};
pub use mail::{DryRunMailer, EmailMessage, Mailer, OutboxMailer};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info};

use crate::data::Client;
use crate::report::{client_file_id, ReportError, ReportStore};

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("No report found for client {0}")]
    ReportNotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Per-client outcome of a delivery pass
#[derive(Debug, Default)]
pub struct DeliverySummary {
    pub delivered: Vec<String>,
    pub failed: Vec<(String, DeliveryError)>,
}

impl DeliverySummary {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Mail every client's report from `store`
pub async fn deliver_all(
    store: &ReportStore,
    clients: &[Client],
    sender: &str,
    date: NaiveDate,
    mailer: &dyn Mailer,
) -> DeliveryResult<DeliverySummary> {
    let mut files = store.list_reports().await?;
    sort_report_files(&mut files);

    let mut summary = DeliverySummary::default();
    for client in clients {
        match deliver_one(store, &files, client, sender, date, mailer).await {
            Ok(()) => {
                info!(client = %client.email, mailer = mailer.name(), "Message sent");
                summary.delivered.push(client.email.clone());
            }
            Err(e) => {
                error!(client = %client.email, error = %e, "Failed to deliver report");
                summary.failed.push((client.email.clone(), e));
            }
        }
    }

    info!(
        delivered = summary.delivered.len(),
        failed = summary.failed.len(),
        "Delivery finished"
    );
    Ok(summary)
}

async fn deliver_one(
    store: &ReportStore,
    files: &[String],
    client: &Client,
    sender: &str,
    date: NaiveDate,
    mailer: &dyn Mailer,
) -> DeliveryResult<()> {
    let file_name = find_report(&client_file_id(&client.email), files)
        .ok_or_else(|| DeliveryError::ReportNotFound(client.email.clone()))?;
    let html = store.read(file_name).await?;
    let message = EmailMessage::compose(sender, &client.email, date, &html);
    mailer.send(&message).await
}
