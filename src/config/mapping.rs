//! Client-to-stocks mapping file
//!
//! ```toml
//! sender = "reports@example.com"
//!
//! [[mappings]]
//! email = "ann@example.com"
//! stocks = ["AAPL", "msft"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::data::{Client, Symbol};
use crate::report::client_file_id;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientMapping {
    pub email: String,
    pub stocks: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockMapping {
    pub sender: String,
    pub mappings: Vec<ClientMapping>,
}

impl StockMapping {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid mapping file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mapping: StockMapping = toml::from_str(raw)?;
        if mapping.sender.trim().is_empty() {
            anyhow::bail!("sender must not be empty");
        }
        Ok(mapping)
    }

    /// Clients in file order with normalized symbol lists.
    /// Each email may appear once: every client owns exactly one report file.
    pub fn clients(&self) -> Result<Vec<Client>> {
        let mut clients: Vec<Client> = Vec::with_capacity(self.mappings.len());
        for m in &self.mappings {
            if m.email.trim().is_empty() {
                anyhow::bail!("mapping entry with empty email");
            }
            let client = Client::new(&m.email, m.stocks.as_slice())
                .with_context(|| format!("Invalid stock list for {}", m.email))?;
            let file_id = client_file_id(&client.email);
            if clients.iter().any(|c| client_file_id(&c.email) == file_id) {
                anyhow::bail!("duplicate mapping entry for {}", client.email);
            }
            clients.push(client);
        }
        Ok(clients)
    }

    /// Every symbol any client follows, each once, in first-seen order
    pub fn all_symbols(clients: &[Client]) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = Vec::new();
        for symbol in clients.iter().flat_map(|c| c.stocks.iter()) {
            if !symbols.contains(symbol) {
                symbols.push(symbol.clone());
            }
        }
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAPPING: &str = r#"
        sender = "reports@example.com"

        [[mappings]]
        email = "ann@example.com"
        stocks = ["aapl", "MSFT"]

        [[mappings]]
        email = "bob@example.com"
        stocks = ["msft", "TSLA", "aapl"]
    "#;

    #[test]
    fn test_parse_and_clients() {
        let mapping = StockMapping::parse(MAPPING).unwrap();
        assert_eq!(mapping.sender, "reports@example.com");

        let clients = mapping.clients().unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[1].email, "bob@example.com");
        let bob: Vec<&str> = clients[1].stocks.iter().map(Symbol::as_str).collect();
        assert_eq!(bob, vec!["MSFT", "TSLA", "AAPL"]);
    }

    #[test]
    fn test_all_symbols_unique() {
        let clients = StockMapping::parse(MAPPING).unwrap().clients().unwrap();
        let symbols: Vec<String> = StockMapping::all_symbols(&clients)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn test_bad_symbol_is_rejected() {
        let raw = r#"
            sender = "s@example.com"
            [[mappings]]
            email = "ann@example.com"
            stocks = ["AA PL"]
        "#;
        let err = StockMapping::parse(raw).unwrap().clients().unwrap_err();
        assert!(err.to_string().contains("ann@example.com"));
    }

    #[test]
    fn test_missing_sender() {
        assert!(StockMapping::parse("[[mappings]]\nemail = \"a\"\nstocks = []").is_err());
        assert!(StockMapping::parse("sender = \"\"\nmappings = []").is_err());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let raw = r#"
            sender = "s@example.com"
            [[mappings]]
            email = "ann@example.com"
            stocks = ["AAPL"]
            [[mappings]]
            email = " ann@example.com "
            stocks = ["MSFT"]
        "#;
        let err = StockMapping::parse(raw).unwrap().clients().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_ids_sharing_a_file_name_rejected() {
        let raw = r#"
            sender = "s@example.com"
            [[mappings]]
            email = "a/b@example.com"
            stocks = ["AAPL"]
            [[mappings]]
            email = "a-b@example.com"
            stocks = ["MSFT"]
        "#;
        assert!(StockMapping::parse(raw).unwrap().clients().is_err());
    }
}
