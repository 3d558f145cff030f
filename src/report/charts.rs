use chrono::NaiveDate;
use serde::Serialize;

use crate::data::Symbol;

/// Public URLs of the price charts for one stock. The images themselves are
/// produced and uploaded elsewhere; the report only links to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub three_month: String,
    pub one_month: String,
    pub one_week: String,
}

impl ChartSet {
    /// `<base>/<YYYYMMDD>/<SYMBOL>_<period>.png`
    pub fn for_symbol(base_url: &str, date: NaiveDate, symbol: &Symbol) -> Self {
        let prefix = format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            date.format("%Y%m%d"),
            symbol
        );
        Self {
            three_month: format!("{}_3mo.png", prefix),
            one_month: format!("{}_1mo.png", prefix),
            one_week: format!("{}_1wk.png", prefix),
        }
    }
}
