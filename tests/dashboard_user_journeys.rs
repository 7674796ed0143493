//! Behavior-driven tests for dashboard user journeys
//!
//! These tests verify WHAT the user sees while searching symbols on the live
//! dashboard, through the rendered panels rather than internal state.

use std::sync::Arc;
use std::time::Duration;

use marketdash_core::render::{
    market_status_panel, movers_panel, overview_panel, quote_panel, LOADING_TEXT, NO_SYMBOL_DATA,
    OVERVIEW_PROMPT, QUOTE_PROMPT,
};
use marketdash_core::{
    fixtures, ApiConfig, Dashboard, FixtureHttpClient, HttpError, MoverTab, PollSchedule, Selector,
    Symbol, VantageClient, ViewState, MOVERS_TABLE_ROWS,
};

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

fn start(fixture: FixtureHttpClient, searched: Option<&str>) -> Dashboard {
    let client = VantageClient::new(Arc::new(fixture), ApiConfig::default());
    Dashboard::start(client, &PollSchedule::default(), searched.map(symbol))
}

async fn settle(dashboard: &Dashboard) {
    dashboard
        .quote
        .wait_for(ViewState::is_settled)
        .await
        .expect("quote settles");
    dashboard
        .overview
        .wait_for(ViewState::is_settled)
        .await
        .expect("overview settles");
}

// =============================================================================
// Dashboard Journey: First Visit
// =============================================================================

#[tokio::test(start_paused = true)]
async fn user_opening_dashboard_without_search_sees_prompts_and_market_panels() {
    // Given: A fresh dashboard with nothing searched
    let dashboard = start(fixtures::sample_http_client(), None);

    // When: The market views have answered
    dashboard
        .market_status
        .wait_for(ViewState::is_settled)
        .await
        .expect("market status settles");
    dashboard
        .top_movers
        .wait_for(ViewState::is_settled)
        .await
        .expect("movers settle");
    let snapshot = dashboard.snapshot();

    // Then: Symbol panels invite a search, market panels show data
    assert!(quote_panel(&snapshot.quote).contains(QUOTE_PROMPT));
    assert!(overview_panel(&snapshot.overview).contains(OVERVIEW_PROMPT));

    let markets = market_status_panel(&snapshot.market_status);
    assert!(markets.contains("Equity (United States)  ● open"));
    assert!(markets.contains("○ closed"));
    assert!(markets.contains("Forex markets trade 24 hours on weekdays."));

    let losers = movers_panel(&snapshot.top_movers, MoverTab::Losers, MOVERS_TABLE_ROWS);
    let acxp = losers.find("ACXP").expect("first loser listed");
    let hubc = losers.find("HUBC").expect("second loser listed");
    assert!(acxp < hubc, "losers keep API order");
    assert!(losers.contains("Last updated: 2024-05-10 16:15:59 US/Eastern"));
}

#[tokio::test(start_paused = true)]
async fn user_sees_loading_text_before_first_answer() {
    let fixture = fixtures::sample_http_client().with_latency(
        Selector::GlobalQuote,
        Some(&symbol("AAPL")),
        Duration::from_secs(3),
    );
    let dashboard = start(fixture, Some("AAPL"));

    let loading = dashboard
        .quote
        .wait_for(|state| state.is_loading)
        .await
        .expect("loading published");

    assert!(quote_panel(&loading).contains(LOADING_TEXT));
}

// =============================================================================
// Dashboard Journey: Searching Symbols
// =============================================================================

#[tokio::test(start_paused = true)]
async fn user_searching_aapl_sees_formatted_quote_and_overview() {
    // Given: The user searched AAPL
    let dashboard = start(fixtures::sample_http_client(), Some("AAPL"));

    // When: Both symbol views settle
    settle(&dashboard).await;
    let snapshot = dashboard.snapshot();

    // Then: The quote is formatted for display
    let quote = quote_panel(&snapshot.quote);
    assert!(quote.contains("== Stock Details: AAPL =="));
    assert!(quote.contains("$191.04"));
    assert!(quote.contains("▲ 1.2000 (0.6321%)"));
    assert!(quote.contains("As of 2024-05-10"));
    assert!(quote.contains("52,164,535"));

    // And: The overview shows company metrics
    let overview = overview_panel(&snapshot.overview);
    assert!(overview.contains("== Company Overview: Apple Inc =="));
    assert!(overview.contains("$2.95T"));
    assert!(overview.contains("29.68"));
}

#[tokio::test(start_paused = true)]
async fn user_switching_to_falling_stock_sees_down_arrow() {
    // Given: The user is looking at AAPL
    let dashboard = start(fixtures::sample_http_client(), Some("AAPL"));
    settle(&dashboard).await;

    // When: They search IBM
    dashboard.select_symbol(Some(symbol("IBM")));
    let state = dashboard
        .quote
        .wait_for(|state| state.is_settled() && state.symbol == Some(symbol("IBM")))
        .await
        .expect("IBM settles");

    // Then: The quote shows IBM falling
    let panel = quote_panel(&state);
    assert!(panel.contains("== Stock Details: IBM =="));
    assert!(panel.contains("▼ -0.2600 (-0.1553%)"));
    assert!(!panel.contains("AAPL"));
}

#[tokio::test(start_paused = true)]
async fn user_searching_unknown_symbol_sees_no_data_message() {
    let dashboard = start(fixtures::sample_http_client(), Some("ZZZZ"));
    settle(&dashboard).await;
    let snapshot = dashboard.snapshot();

    assert!(quote_panel(&snapshot.quote).contains(NO_SYMBOL_DATA));
    assert!(overview_panel(&snapshot.overview).contains(NO_SYMBOL_DATA));
}

// =============================================================================
// Dashboard Journey: Failures
// =============================================================================

#[tokio::test(start_paused = true)]
async fn user_hitting_rate_limit_sees_api_message() {
    // Given: The API answers MSFT with a rate-limit notice
    let notice =
        "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day.";
    let fixture = fixtures::sample_http_client().with_json(
        Selector::GlobalQuote,
        Some(&symbol("MSFT")),
        &format!(r#"{{"Note": "{notice}"}}"#),
    );
    let dashboard = start(fixture, Some("MSFT"));

    // When: The quote settles
    let state = dashboard
        .quote
        .wait_for(ViewState::is_settled)
        .await
        .expect("settles");

    // Then: The notice is shown as-is
    assert!(quote_panel(&state).contains(notice));
}

#[tokio::test(start_paused = true)]
async fn user_losing_network_sees_error_instead_of_stale_panel() {
    let fixture = fixtures::sample_http_client().with_transport_error(
        Selector::MarketStatus,
        None,
        HttpError::new("connection refused"),
    );
    let dashboard = start(fixture, None);

    let state = dashboard
        .market_status
        .wait_for(ViewState::is_settled)
        .await
        .expect("settles");

    let panel = market_status_panel(&state);
    assert!(panel.contains("connection refused"));
    assert!(!panel.contains(LOADING_TEXT));
}
