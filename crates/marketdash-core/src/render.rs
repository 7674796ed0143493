//! Plain-text panels for the four dashboard views.
//!
//! Each panel applies [`ViewState::presentation`] and the formatting helpers,
//! so the same text backs one-shot commands, the live dashboard and tests.

use std::fmt::Write as _;

use crate::domain::{
    CompanyOverview, GlobalQuoteResponse, MarketStatusResponse, MoverTab, TopMovers,
};
use crate::format::{
    format_currency, format_dividend_yield, format_fixed, format_market_cap, format_price,
    format_ratio, format_volume, MarketPhase, NOT_AVAILABLE,
};
use crate::polling::{Presentation, ViewKind, ViewState};

pub const LOADING_TEXT: &str = "Loading...";
pub const QUOTE_PROMPT: &str = "Search for a stock symbol to see its latest quote";
pub const OVERVIEW_PROMPT: &str = "Search for a stock symbol to see its company overview";
pub const NO_SYMBOL_DATA: &str = "No data available for this symbol";
pub const NO_DATA: &str = "No data available";

pub fn quote_panel(state: &ViewState<GlobalQuoteResponse>) -> String {
    let mut out = String::new();
    let symbol = state.symbol.as_ref().map(|symbol| symbol.as_str());

    match state.presentation() {
        Presentation::Prompt => placeholder(&mut out, ViewKind::Quote, None, QUOTE_PROMPT),
        Presentation::Skeleton => placeholder(&mut out, ViewKind::Quote, None, LOADING_TEXT),
        Presentation::Error(message) => failure(&mut out, ViewKind::Quote, symbol, message),
        Presentation::NoData => placeholder(&mut out, ViewKind::Quote, symbol, NO_SYMBOL_DATA),
        Presentation::Ready {
            data,
            busy,
            stale_error,
        } => {
            let Some(quote) = data.quote() else {
                placeholder(&mut out, ViewKind::Quote, symbol, NO_SYMBOL_DATA);
                return out;
            };
            heading(&mut out, ViewKind::Quote, Some(quote.symbol.as_str()), busy);
            let direction = quote.direction();
            let _ = writeln!(
                out,
                "{}  {} {} ({})",
                format_currency(&quote.price),
                direction.arrow(),
                quote.change,
                quote.change_percent
            );
            let _ = writeln!(out, "As of {}", quote.latest_trading_day);
            metric(
                &mut out,
                "Previous Close",
                &format_currency(&quote.previous_close),
            );
            metric(&mut out, "Open", &format_currency(&quote.open));
            metric(&mut out, "High", &format_currency(&quote.high));
            metric(&mut out, "Low", &format_currency(&quote.low));
            metric(&mut out, "Volume", &format_volume(&quote.volume));
            stale(&mut out, stale_error);
        }
    }
    out
}

pub fn overview_panel(state: &ViewState<CompanyOverview>) -> String {
    let mut out = String::new();
    let symbol = state.symbol.as_ref().map(|symbol| symbol.as_str());

    match state.presentation() {
        Presentation::Prompt => placeholder(&mut out, ViewKind::Overview, None, OVERVIEW_PROMPT),
        Presentation::Skeleton => placeholder(&mut out, ViewKind::Overview, None, LOADING_TEXT),
        Presentation::Error(message) => failure(&mut out, ViewKind::Overview, symbol, message),
        Presentation::NoData => placeholder(&mut out, ViewKind::Overview, symbol, NO_SYMBOL_DATA),
        Presentation::Ready {
            data: overview,
            busy,
            stale_error,
        } => {
            let name = overview.name.as_str();
            heading(&mut out, ViewKind::Overview, Some(name), busy);
            let tags = overview.tags();
            if !tags.is_empty() {
                let _ = writeln!(out, "[{}]", tags.join("] ["));
            }
            if !overview.description.trim().is_empty() {
                let _ = writeln!(out, "{}", overview.description.trim());
            }
            metric(
                &mut out,
                "Market Cap",
                &format_market_cap(&overview.market_capitalization),
            );
            metric(&mut out, "P/E Ratio", &format_ratio(&overview.pe_ratio));
            metric(
                &mut out,
                "Dividend Yield",
                &format_dividend_yield(&overview.dividend_yield),
            );
            metric(
                &mut out,
                "52 Week High",
                &format_price(&overview.week_52_high),
            );
            metric(
                &mut out,
                "52 Week Low",
                &format_price(&overview.week_52_low),
            );
            metric(
                &mut out,
                "50 Day Avg",
                &format_price(&overview.moving_average_50_day),
            );
            metric(
                &mut out,
                "200 Day Avg",
                &format_price(&overview.moving_average_200_day),
            );
            metric(&mut out, "EPS", &format_fixed(&overview.eps));
            metric(&mut out, "Beta", &format_fixed(&overview.beta));
            if let Some(website) = overview.website_guess() {
                metric(&mut out, "Website", &website);
            }
            stale(&mut out, stale_error);
        }
    }
    out
}

pub fn market_status_panel(state: &ViewState<MarketStatusResponse>) -> String {
    let mut out = String::new();

    match state.presentation() {
        Presentation::Prompt | Presentation::Skeleton => {
            placeholder(&mut out, ViewKind::MarketStatus, None, LOADING_TEXT)
        }
        Presentation::Error(message) => failure(&mut out, ViewKind::MarketStatus, None, message),
        Presentation::NoData => placeholder(&mut out, ViewKind::MarketStatus, None, NO_DATA),
        Presentation::Ready {
            data,
            busy,
            stale_error,
        } => {
            heading(&mut out, ViewKind::MarketStatus, None, busy);
            for market in &data.markets {
                let marker = match market.phase() {
                    MarketPhase::Open => "●",
                    MarketPhase::Closed => "○",
                    MarketPhase::Other => "◐",
                };
                let _ = writeln!(
                    out,
                    "{} ({})  {} {}",
                    market.market_type, market.region, marker, market.current_status
                );
                let _ = writeln!(
                    out,
                    "  Trading Hours: {} - {}",
                    market.local_open, market.local_close
                );
                if let Some(notes) = market.notes() {
                    let _ = writeln!(out, "  {notes}");
                }
            }
            stale(&mut out, stale_error);
        }
    }
    out
}

/// Movers table for `tab`, at most `limit` rows.
pub fn movers_panel(state: &ViewState<TopMovers>, tab: MoverTab, limit: usize) -> String {
    let mut out = String::new();

    match state.presentation() {
        Presentation::Prompt | Presentation::Skeleton => {
            placeholder(&mut out, ViewKind::TopMovers, None, LOADING_TEXT)
        }
        Presentation::Error(message) => failure(&mut out, ViewKind::TopMovers, None, message),
        Presentation::NoData => placeholder(&mut out, ViewKind::TopMovers, None, NO_DATA),
        Presentation::Ready {
            data,
            busy,
            stale_error,
        } => {
            heading(&mut out, ViewKind::TopMovers, Some(tab.title()), busy);
            let _ = writeln!(
                out,
                "{:<8} {:>10} {:>10} {:>11} {:>14}",
                "Symbol", "Price", "Change", "% Change", "Volume"
            );
            for mover in data.rows(tab, limit) {
                let _ = writeln!(
                    out,
                    "{:<8} {:>10} {:>10} {:>11} {:>14} {}",
                    mover.ticker,
                    format_price(&mover.price),
                    mover.change_amount,
                    mover.change_percentage,
                    format_volume(&mover.volume),
                    mover.direction().arrow()
                );
            }
            if !data.last_updated.is_empty() {
                let _ = writeln!(out, "Last updated: {}", data.last_updated);
            }
            stale(&mut out, stale_error);
        }
    }
    out
}

fn heading(out: &mut String, kind: ViewKind, subject: Option<&str>, busy: bool) {
    let _ = match subject.filter(|subject| !subject.is_empty()) {
        Some(subject) => write!(out, "== {}: {subject} ==", kind.title()),
        None => write!(out, "== {} ==", kind.title()),
    };
    if busy {
        out.push_str(" (refreshing)");
    }
    out.push('\n');
}

fn placeholder(out: &mut String, kind: ViewKind, subject: Option<&str>, text: &str) {
    heading(out, kind, subject, false);
    let _ = writeln!(out, "{text}");
}

fn failure(out: &mut String, kind: ViewKind, subject: Option<&str>, message: &str) {
    placeholder(out, kind, subject, &format!("! {message}"));
}

fn metric(out: &mut String, label: &str, value: &str) {
    let value = if value.is_empty() {
        NOT_AVAILABLE
    } else {
        value
    };
    let _ = writeln!(out, "  {label:<15} {value}");
}

fn stale(out: &mut String, error: Option<&str>) {
    if let Some(error) = error {
        let _ = writeln!(out, "! last refresh failed: {error}");
    }
}
