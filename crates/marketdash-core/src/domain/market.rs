use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::HasContent;
use crate::format::{classify_change, classify_market_status, ChangeDirection, MarketPhase};

/// Number of rows shown per movers table.
pub const MOVERS_TABLE_ROWS: usize = 10;

/// `MARKET_STATUS` success payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketStatusResponse {
    pub endpoint: String,
    pub markets: Vec<MarketSession>,
}

impl HasContent for MarketStatusResponse {
    fn has_content(&self) -> bool {
        !self.markets.is_empty()
    }
}

/// Trading session status for one market region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSession {
    pub market_type: String,
    pub region: String,
    pub primary_exchanges: String,
    pub local_open: String,
    pub local_close: String,
    pub current_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MarketSession {
    pub fn phase(&self) -> MarketPhase {
        classify_market_status(&self.current_status)
    }

    /// Notes line, or `None` when the API sent nothing worth showing.
    pub fn notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }
}

/// `TOP_GAINERS_LOSERS` success payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopMovers {
    pub metadata: String,
    pub last_updated: String,
    pub top_gainers: Vec<Mover>,
    pub top_losers: Vec<Mover>,
    pub most_actively_traded: Vec<Mover>,
}

impl TopMovers {
    pub fn list(&self, tab: MoverTab) -> &[Mover] {
        match tab {
            MoverTab::Gainers => &self.top_gainers,
            MoverTab::Losers => &self.top_losers,
            MoverTab::MostActive => &self.most_actively_traded,
        }
    }

    /// The first `limit` rows of `tab`, in API order.
    pub fn rows(&self, tab: MoverTab, limit: usize) -> &[Mover] {
        let list = self.list(tab);
        &list[..list.len().min(limit)]
    }
}

impl HasContent for TopMovers {
    fn has_content(&self) -> bool {
        !(self.top_gainers.is_empty()
            && self.top_losers.is_empty()
            && self.most_actively_traded.is_empty())
    }
}

/// One row of a movers table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mover {
    pub ticker: String,
    pub price: String,
    pub change_amount: String,
    pub change_percentage: String,
    pub volume: String,
}

impl Mover {
    pub fn direction(&self) -> ChangeDirection {
        classify_change(&self.change_percentage)
    }
}

/// Movers table selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoverTab {
    #[default]
    Gainers,
    Losers,
    MostActive,
}

impl MoverTab {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Gainers => "Top Gainers",
            Self::Losers => "Top Losers",
            Self::MostActive => "Most Active",
        }
    }
}

impl Display for MoverTab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
