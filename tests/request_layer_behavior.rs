//! Behavior-driven tests for the request layer
//!
//! These tests verify HOW the client turns Alpha Vantage answers into either
//! a typed payload or a structured failure, over the real reqwest transport.

use marketdash_core::{
    fixtures, ApiConfig, ApiErrorKind, GlobalQuoteResponse, HasContent, Symbol, VantageClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> VantageClient {
    let config = ApiConfig::new(format!("{}/query", server.uri()), "test-key")
        .expect("valid config")
        .with_timeout_ms(2_000);
    VantageClient::with_reqwest(config)
}

fn aapl() -> Symbol {
    Symbol::parse("AAPL").expect("valid")
}

// =============================================================================
// Request Layer: Success Path
// =============================================================================

#[tokio::test]
async fn when_quote_is_requested_system_sends_function_symbol_and_key() {
    // Given: An API that only answers a correctly parameterized quote request
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/query"))
        .and(query_param("function", "GLOBAL_QUOTE"))
        .and(query_param("symbol", "AAPL"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixtures::AAPL_QUOTE))
        .expect(1)
        .mount(&server)
        .await;

    // When: The client fetches the quote
    let response = client_for(&server)
        .await
        .global_quote(&aapl())
        .await
        .expect("quote should decode");

    // Then: The typed payload carries the quote fields
    let quote = response.quote().expect("quote present");
    assert_eq!(quote.price, "191.0400");
    assert_eq!(quote.latest_trading_day, "2024-05-10");
}

#[tokio::test]
async fn when_market_status_is_requested_system_omits_symbol() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("function", "MARKET_STATUS"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixtures::MARKET_STATUS))
        .mount(&server)
        .await;

    let status = client_for(&server)
        .await
        .market_status()
        .await
        .expect("market status should decode");
    assert_eq!(status.markets.len(), 3);

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests[0]
        .url
        .query_pairs()
        .all(|(name, _)| name != "symbol"));
}

#[tokio::test]
async fn when_api_knows_nothing_about_symbol_result_is_success_without_content() {
    // Given: The empty shape returned for unknown tickers
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixtures::EMPTY_QUOTE))
        .mount(&server)
        .await;

    // When / Then: It is not an error, just nothing to show
    let response: GlobalQuoteResponse = client_for(&server)
        .await
        .global_quote(&Symbol::parse("NOPE").expect("valid"))
        .await
        .expect("empty answer is not a failure");
    assert!(!response.has_content());
}

// =============================================================================
// Request Layer: Failure Normalization
// =============================================================================

#[tokio::test]
async fn when_body_has_error_message_and_note_error_message_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"Note": "Thank you for using Alpha Vantage!", "Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        ))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .await
        .global_quote(&aapl())
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ApiErrorKind::InvalidInput);
    assert_eq!(
        error.message(),
        "Invalid API call. Please retry or visit the documentation."
    );
}

#[tokio::test]
async fn when_rate_limited_system_surfaces_information_text_verbatim() {
    let notice = "We have detected your API key as test-key. The rate limit is 25 per day.";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!(r#"{{"Information": "{notice}", "Note": "ignored"}}"#)),
        )
        .mount(&server)
        .await;

    let error = client_for(&server)
        .await
        .top_movers()
        .await
        .expect_err("must fail");

    assert_eq!(error.kind(), ApiErrorKind::Information);
    assert_eq!(error.message(), notice);
    assert!(error.is_application());
}

#[tokio::test]
async fn when_status_is_not_success_valid_body_is_ignored() {
    // Given: A 500 whose body would otherwise decode fine
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fixtures::AAPL_QUOTE))
        .mount(&server)
        .await;

    // When: The client fetches
    let error = client_for(&server)
        .await
        .global_quote(&aapl())
        .await
        .expect_err("must fail");

    // Then: The failure names the status
    assert_eq!(error.kind(), ApiErrorKind::HttpStatus);
    assert_eq!(error.message(), "API error: 500");
}

#[tokio::test]
async fn when_gateway_returns_html_system_reports_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>Bad Gateway</body></html>"),
        )
        .mount(&server)
        .await;

    let error = client_for(&server)
        .await
        .company_overview(&aapl())
        .await
        .expect_err("must fail");
    assert_eq!(error.kind(), ApiErrorKind::Parse);
}

#[tokio::test]
async fn when_server_is_unreachable_failure_is_returned_not_raised() {
    // Given: An endpoint nothing listens on
    let config = ApiConfig::new("http://127.0.0.1:1/query", "test-key")
        .expect("valid config")
        .with_timeout_ms(2_000);
    let client = VantageClient::with_reqwest(config);

    // When: The client fetches
    let error = client.market_status().await.expect_err("must fail");

    // Then: The transport failure is a value, and the key never leaks into it
    assert_eq!(error.kind(), ApiErrorKind::Transport);
    assert!(!error.message().contains("test-key"));
}

#[tokio::test]
async fn when_server_is_slow_timeout_becomes_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(fixtures::MARKET_STATUS)
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = ApiConfig::new(format!("{}/query", server.uri()), "test-key")
        .expect("valid config")
        .with_timeout_ms(50);
    let error = VantageClient::with_reqwest(config)
        .market_status()
        .await
        .expect_err("must time out");

    assert_eq!(error.kind(), ApiErrorKind::Transport);
    assert!(error.message().contains("timeout"));
}
