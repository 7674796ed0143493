use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::client::VantageClient;
use crate::config::PollSchedule;
use crate::domain::{
    CompanyOverview, GlobalQuoteResponse, HasContent, MarketStatusResponse, TopMovers,
};
use crate::response::{ApiError, ApiErrorKind};
use crate::Symbol;

/// Owned fetch future, spawnable on the runtime.
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'static>>;

/// The four dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Quote,
    Overview,
    MarketStatus,
    TopMovers,
}

impl ViewKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Quote => "Stock Details",
            Self::Overview => "Company Overview",
            Self::MarketStatus => "Market Status",
            Self::TopMovers => "Market Movers",
        }
    }

    /// Views driven by a searched symbol; without one they stay idle.
    pub const fn requires_symbol(self) -> bool {
        matches!(self, Self::Quote | Self::Overview)
    }

    /// Only the quote view offers a manual refresh.
    pub const fn supports_manual_refresh(self) -> bool {
        matches!(self, Self::Quote)
    }

    pub const fn period(self, schedule: &PollSchedule) -> Option<Duration> {
        match self {
            Self::Quote => schedule.quote,
            Self::Overview => schedule.overview,
            Self::MarketStatus => schedule.market_status,
            Self::TopMovers => schedule.top_movers,
        }
    }
}

impl Display for ViewKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Data source behind one polling view.
pub trait Feed: Send + Sync + 'static {
    type Data: HasContent + Clone + Send + Sync + 'static;

    fn kind(&self) -> ViewKind;

    /// Start a fetch. `symbol` is `None` only for views that ignore it.
    fn fetch(&self, symbol: Option<&Symbol>) -> FetchFuture<Self::Data>;
}

/// Refresh behavior of a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub period: Option<Duration>,
    pub manual_refresh: bool,
}

impl PollPolicy {
    pub const fn for_view(kind: ViewKind, schedule: &PollSchedule) -> Self {
        Self {
            period: kind.period(schedule),
            manual_refresh: kind.supports_manual_refresh(),
        }
    }
}

macro_rules! symbol_feed {
    ($name:ident, $kind:expr, $data:ty, $method:ident) => {
        #[derive(Clone)]
        pub struct $name {
            client: VantageClient,
        }

        impl $name {
            pub fn new(client: VantageClient) -> Self {
                Self { client }
            }
        }

        impl Feed for $name {
            type Data = $data;

            fn kind(&self) -> ViewKind {
                $kind
            }

            fn fetch(&self, symbol: Option<&Symbol>) -> FetchFuture<Self::Data> {
                let client = self.client.clone();
                let symbol = symbol.cloned();
                Box::pin(async move {
                    match symbol {
                        Some(symbol) => client.$method(&symbol).await,
                        None => Err(missing_symbol()),
                    }
                })
            }
        }
    };
}

macro_rules! market_feed {
    ($name:ident, $kind:expr, $data:ty, $method:ident) => {
        #[derive(Clone)]
        pub struct $name {
            client: VantageClient,
        }

        impl $name {
            pub fn new(client: VantageClient) -> Self {
                Self { client }
            }
        }

        impl Feed for $name {
            type Data = $data;

            fn kind(&self) -> ViewKind {
                $kind
            }

            fn fetch(&self, _symbol: Option<&Symbol>) -> FetchFuture<Self::Data> {
                let client = self.client.clone();
                Box::pin(async move { client.$method().await })
            }
        }
    };
}

symbol_feed!(QuoteFeed, ViewKind::Quote, GlobalQuoteResponse, global_quote);
symbol_feed!(OverviewFeed, ViewKind::Overview, CompanyOverview, company_overview);
market_feed!(MarketStatusFeed, ViewKind::MarketStatus, MarketStatusResponse, market_status);
market_feed!(TopMoversFeed, ViewKind::TopMovers, TopMovers, top_movers);

fn missing_symbol() -> ApiError {
    ApiError::application(ApiErrorKind::InvalidInput, "a stock symbol is required")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_view_policies() {
        let schedule = PollSchedule::default();

        let quote = PollPolicy::for_view(ViewKind::Quote, &schedule);
        assert_eq!(quote.period, Some(Duration::from_secs(60)));
        assert!(quote.manual_refresh);

        let overview = PollPolicy::for_view(ViewKind::Overview, &schedule);
        assert_eq!(overview.period, None);
        assert!(!overview.manual_refresh);

        for kind in [ViewKind::MarketStatus, ViewKind::TopMovers] {
            let policy = PollPolicy::for_view(kind, &schedule);
            assert_eq!(policy.period, Some(Duration::from_secs(300)));
            assert!(!policy.manual_refresh);
            assert!(!kind.requires_symbol());
        }
    }

    #[tokio::test]
    async fn symbol_feed_without_symbol_fails_cleanly() {
        let feed = QuoteFeed::new(VantageClient::new(
            std::sync::Arc::new(crate::http_client::FixtureHttpClient::new()),
            crate::config::ApiConfig::default(),
        ));
        let error = feed.fetch(None).await.expect_err("must fail");
        assert_eq!(error.kind(), ApiErrorKind::InvalidInput);
    }
}
