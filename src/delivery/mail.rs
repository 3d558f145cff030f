use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::DeliveryResult;

/// A composed report email with plain-text and HTML alternatives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailMessage {
    pub fn compose(sender: &str, to: &str, date: NaiveDate, report_html: &str) -> Self {
        let date = date.format("%Y-%m-%d");
        Self {
            from: sender.to_string(),
            to: to.to_string(),
            subject: format!("Stock Report for {}", date),
            text: format!("Hi {},\nPlease find your stock report for {} below.", to, date),
            html: report_html.replace('\n', ""),
        }
    }
}

/// Hands a composed message to a transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> DeliveryResult<()>;

    fn name(&self) -> &str;
}

/// Logs messages instead of sending them
#[derive(Debug, Default)]
pub struct DryRunMailer;

#[async_trait]
impl Mailer for DryRunMailer {
    async fn send(&self, message: &EmailMessage) -> DeliveryResult<()> {
        tracing::info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            html_bytes = message.html.len(),
            "Dry run: message not sent"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}

/// Spools each message as JSON into a directory for an external sender
#[derive(Debug)]
pub struct OutboxMailer {
    dir: PathBuf,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, message: &EmailMessage) -> DeliveryResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = format!("{}.json", message.to.replace(['/', '\\'], "-"));
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, serde_json::to_vec_pretty(message)?).await?;
        tracing::info!(to = %message.to, path = %path.display(), "Message written to outbox");
        Ok(())
    }

    fn name(&self) -> &str {
        "outbox"
    }
}
