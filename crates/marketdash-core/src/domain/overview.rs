use serde::{Deserialize, Serialize};

use crate::domain::HasContent;

/// `OVERVIEW` success payload: company profile and key ratios.
///
/// Numeric fields stay as strings because the API mixes numbers with
/// placeholders such as `"None"` and `"-"`; formatting decides what to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyOverview {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "AssetType")]
    pub asset_type: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Exchange")]
    pub exchange: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "MarketCapitalization")]
    pub market_capitalization: String,
    #[serde(rename = "PERatio")]
    pub pe_ratio: String,
    #[serde(rename = "EPS")]
    pub eps: String,
    #[serde(rename = "DividendYield")]
    pub dividend_yield: String,
    #[serde(rename = "Beta")]
    pub beta: String,
    #[serde(rename = "52WeekHigh")]
    pub week_52_high: String,
    #[serde(rename = "52WeekLow")]
    pub week_52_low: String,
    #[serde(rename = "50DayMovingAverage")]
    pub moving_average_50_day: String,
    #[serde(rename = "200DayMovingAverage")]
    pub moving_average_200_day: String,
}

impl CompanyOverview {
    /// Best-effort homepage derived from the company name.
    pub fn website_guess(&self) -> Option<String> {
        let host = self
            .name
            .to_lowercase()
            .split_whitespace()
            .collect::<String>();
        if host.is_empty() {
            return None;
        }
        Some(format!("https://{host}.com"))
    }

    /// Exchange, sector and industry tags, skipping blanks.
    pub fn tags(&self) -> Vec<&str> {
        [&self.exchange, &self.sector, &self.industry]
            .into_iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

impl HasContent for CompanyOverview {
    /// The API answers `{}` for symbols it has no profile for.
    fn has_content(&self) -> bool {
        !self.symbol.trim().is_empty() || !self.name.trim().is_empty()
    }
}
