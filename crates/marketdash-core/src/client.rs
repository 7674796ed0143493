use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::{CompanyOverview, GlobalQuoteResponse, MarketStatusResponse, TopMovers};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::request::{QueryRequest, Selector};
use crate::response::{normalize, ApiError};
use crate::Symbol;

/// Request layer for the Alpha Vantage query endpoint.
///
/// Every call returns `Ok(payload)` or `Err(ApiError)`; transport faults,
/// HTTP status failures, in-body failure keys and parse faults are all folded
/// into [`ApiError`]. No retry, caching or client-side rate limiting.
#[derive(Clone)]
pub struct VantageClient {
    http_client: Arc<dyn HttpClient>,
    config: ApiConfig,
}

impl VantageClient {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ApiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Client backed by reqwest.
    pub fn with_reqwest(config: ApiConfig) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Issue `request` and decode the body as `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, request: &QueryRequest) -> Result<T, ApiError> {
        let selector = request.selector();
        debug!(
            %selector,
            url = %request.redacted_url(self.config.base_url()),
            "issuing alphavantage request"
        );

        let url = request.to_url(self.config.base_url(), self.config.api_key());
        let http_request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms());

        let outcome = self.http_client.execute(http_request).await;
        let result = normalize::<T>(outcome);

        if let Err(error) = &result {
            warn!(
                %selector,
                symbol = request.symbol().unwrap_or(""),
                code = error.code(),
                message = error.message(),
                "alphavantage request failed"
            );
        }
        result
    }

    pub async fn global_quote(&self, symbol: &Symbol) -> Result<GlobalQuoteResponse, ApiError> {
        self.fetch(&QueryRequest::for_symbol(Selector::GlobalQuote, symbol))
            .await
    }

    pub async fn market_status(&self) -> Result<MarketStatusResponse, ApiError> {
        self.fetch(&QueryRequest::new(Selector::MarketStatus)).await
    }

    pub async fn top_movers(&self) -> Result<TopMovers, ApiError> {
        self.fetch(&QueryRequest::new(Selector::TopGainersLosers))
            .await
    }

    pub async fn company_overview(&self, symbol: &Symbol) -> Result<CompanyOverview, ApiError> {
        self.fetch(&QueryRequest::for_symbol(Selector::Overview, symbol))
            .await
    }
}
