//! # Domain Models
//!
//! Typed payloads for the four Alpha Vantage functions the dashboard uses.
//!
//! | Type | Selector |
//! |------|----------|
//! | [`GlobalQuoteResponse`] | `GLOBAL_QUOTE` |
//! | [`CompanyOverview`] | `OVERVIEW` |
//! | [`MarketStatusResponse`] | `MARKET_STATUS` |
//! | [`TopMovers`] | `TOP_GAINERS_LOSERS` |
//!
//! Payloads decode leniently: every field defaults when missing, so a
//! well-formed but empty answer becomes a value whose [`HasContent`] check
//! fails rather than a decode error.

mod market;
mod overview;
mod quote;
mod symbol;

pub use market::{
    MarketSession, MarketStatusResponse, Mover, MoverTab, TopMovers, MOVERS_TABLE_ROWS,
};
pub use overview::CompanyOverview;
pub use quote::{GlobalQuote, GlobalQuoteResponse};
pub use symbol::Symbol;

/// Whether a successful payload actually carries something to display.
pub trait HasContent {
    fn has_content(&self) -> bool;
}
