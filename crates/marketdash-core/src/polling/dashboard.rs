use tracing::info;

use super::consumer::{spawn_consumer, ConsumerHandle};
use super::feed::{MarketStatusFeed, OverviewFeed, PollPolicy, QuoteFeed, TopMoversFeed, ViewKind};
use super::state::ViewState;
use crate::client::VantageClient;
use crate::config::PollSchedule;
use crate::domain::{CompanyOverview, GlobalQuoteResponse, MarketStatusResponse, TopMovers};
use crate::Symbol;

/// The four views of one dashboard session, sharing a single client.
///
/// The searched symbol drives the quote and overview views; market status
/// and top movers poll on their own schedule.
pub struct Dashboard {
    pub quote: ConsumerHandle<GlobalQuoteResponse>,
    pub overview: ConsumerHandle<CompanyOverview>,
    pub market_status: ConsumerHandle<MarketStatusResponse>,
    pub top_movers: ConsumerHandle<TopMovers>,
}

/// Point-in-time copy of every view.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub quote: ViewState<GlobalQuoteResponse>,
    pub overview: ViewState<CompanyOverview>,
    pub market_status: ViewState<MarketStatusResponse>,
    pub top_movers: ViewState<TopMovers>,
}

impl Dashboard {
    /// Spawn all views on the current runtime.
    pub fn start(client: VantageClient, schedule: &PollSchedule, symbol: Option<Symbol>) -> Self {
        info!(
            symbol = symbol.as_ref().map(Symbol::as_str).unwrap_or(""),
            "starting dashboard"
        );
        Self {
            quote: spawn_consumer(
                QuoteFeed::new(client.clone()),
                PollPolicy::for_view(ViewKind::Quote, schedule),
                symbol.clone(),
            ),
            overview: spawn_consumer(
                OverviewFeed::new(client.clone()),
                PollPolicy::for_view(ViewKind::Overview, schedule),
                symbol,
            ),
            market_status: spawn_consumer(
                MarketStatusFeed::new(client.clone()),
                PollPolicy::for_view(ViewKind::MarketStatus, schedule),
                None,
            ),
            top_movers: spawn_consumer(
                TopMoversFeed::new(client),
                PollPolicy::for_view(ViewKind::TopMovers, schedule),
                None,
            ),
        }
    }

    /// Point the symbol-driven views at `symbol`, or clear them with `None`.
    pub fn select_symbol(&self, symbol: Option<Symbol>) {
        info!(
            symbol = symbol.as_ref().map(Symbol::as_str).unwrap_or(""),
            "symbol selected"
        );
        self.quote.set_symbol(symbol.clone());
        self.overview.set_symbol(symbol);
    }

    pub fn refresh_quote(&self) -> bool {
        self.quote.refresh()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            quote: self.quote.state(),
            overview: self.overview.state(),
            market_status: self.market_status.state(),
            top_movers: self.top_movers.state(),
        }
    }

    /// Stop every view; no further fetches are issued or applied.
    pub async fn shutdown(self) {
        let Self {
            quote,
            overview,
            market_status,
            top_movers,
        } = self;
        tokio::join!(
            quote.shutdown(),
            overview.shutdown(),
            market_status.shutdown(),
            top_movers.shutdown()
        );
    }
}
