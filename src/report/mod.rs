//! Report assembly and rendering
//! Turns the run's market snapshot into one document per client, lays out
//! news, renders HTML and stores the files for delivery

pub mod assembler;
pub mod charts;
pub mod html;
pub mod layout;
pub mod store;

pub use assembler::{MarketSnapshot, ReportAssembler, ReportDocument, SentimentClass, StockSection};
pub use charts::ChartSet;
pub use layout::{layout, layout_in, ArticleSlot, NewsLayout, SidebarGroup};
pub use store::{client_file_id, report_file_name, ReportStore, REPORT_DELIMITER};

use thiserror::Error;

use crate::data::Symbol;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The caller did not populate a map for a requested symbol
    #[error("No {entry} entry for {symbol}; every requested symbol must be fetched before assembly")]
    MissingEntry { symbol: Symbol, entry: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
