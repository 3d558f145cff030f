use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::assembler::ReportDocument;
use super::html::render;
use super::ReportResult;

/// Separates the client id from the rest of a report file name
pub const REPORT_DELIMITER: &str = "_report";

/// The client id as it appears in a file name: path separators become `-`.
/// Writers and the delivery lookup must both go through this.
pub fn client_file_id(client: &str) -> String {
    client
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

/// `<client>_report.html`
pub fn report_file_name(client: &str) -> String {
    format!("{}{}.html", client_file_id(client), REPORT_DELIMITER)
}

/// Working directory for one run's rendered reports
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Create a fresh run directory, replacing whatever a previous run left
    pub async fn prepare(root: impl Into<PathBuf>) -> ReportResult<Self> {
        let root = root.into();
        if fs::try_exists(&root).await? {
            info!(path = %root.display(), "Run directory already exists, removing");
            fs::remove_dir_all(&root).await?;
        }
        fs::create_dir_all(root.join("reports")).await?;
        info!(path = %root.display(), "Created run directory");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    /// Render and write one client's report
    pub async fn write(&self, document: &ReportDocument) -> ReportResult<PathBuf> {
        let path = self.reports_dir().join(report_file_name(&document.client));
        fs::write(&path, render(document)).await?;
        debug!(path = %path.display(), sections = document.sections.len(), "Report written");
        Ok(path)
    }

    /// File names in the reports directory, sorted
    pub async fn list_reports(&self) -> ReportResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(self.reports_dir()).await?;
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub async fn read(&self, file_name: &str) -> ReportResult<String> {
        Ok(fs::read_to_string(self.reports_dir().join(file_name)).await?)
    }

    pub async fn cleanup(self) -> ReportResult<()> {
        info!(path = %self.root.display(), "Removing run directory");
        fs::remove_dir_all(&self.root).await?;
        Ok(())
    }
}
