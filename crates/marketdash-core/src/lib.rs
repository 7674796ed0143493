//! # marketdash core
//!
//! Request layer, polling views and formatting for an Alpha Vantage stock
//! dashboard.
//!
//! ## Overview
//!
//! - **Request layer** that folds transport, HTTP status, in-body failure
//!   keys and parse faults into one [`ApiError`]
//! - **Typed payloads** for quotes, company overviews, market status and top movers
//! - **Polling views** that refresh on a schedule and never apply a stale result
//! - **Formatting** of the API's numeric strings for display
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | [`VantageClient`], one call per query function |
//! | [`config`] | Endpoint, credential and polling schedule |
//! | [`domain`] | Payload types and [`Symbol`] |
//! | [`error`] | Validation and configuration errors |
//! | [`fixtures`] | Bundled sample payloads for offline runs |
//! | [`format`] | Number and change formatting |
//! | [`http_client`] | Transport abstraction, reqwest and fixture backends |
//! | [`polling`] | Consumers, view state and the dashboard |
//! | [`render`] | Plain-text panels |
//! | [`request`] | Query selectors and URL building |
//! | [`response`] | Response normalization and [`ApiError`] |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marketdash_core::{ApiConfig, Symbol, VantageClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VantageClient::with_reqwest(ApiConfig::from_env()?);
//!     let response = client.global_quote(&Symbol::parse("AAPL")?).await?;
//!
//!     if let Some(quote) = response.quote() {
//!         println!("AAPL: {}", quote.price);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod http_client;
pub mod polling;
pub mod render;
pub mod request;
pub mod response;

pub use client::VantageClient;
pub use config::{ApiConfig, DashboardConfig, PollSchedule};
pub use domain::{
    CompanyOverview, GlobalQuote, GlobalQuoteResponse, HasContent, MarketSession,
    MarketStatusResponse, Mover, MoverTab, Symbol, TopMovers, MOVERS_TABLE_ROWS,
};
pub use error::{ConfigError, ValidationError};
pub use format::{ChangeDirection, MarketPhase, NOT_AVAILABLE};
pub use http_client::{
    FixtureHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use polling::{
    spawn_consumer, ConsumerHandle, Dashboard, DashboardSnapshot, Feed, FetchReason, PollPolicy,
    Presentation, ViewKind, ViewState,
};
pub use request::{QueryRequest, Selector};
pub use response::{ApiError, ApiErrorKind};
