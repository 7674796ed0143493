//! # Polling Views
//!
//! Each view runs as one task that owns its [`ViewState`] and publishes
//! snapshots over a `watch` channel.
//!
//! | View | Driven by | Default period | Manual refresh |
//! |------|-----------|----------------|----------------|
//! | Quote | symbol | 60 s | yes |
//! | Overview | symbol | none | no |
//! | Market status | nothing | 300 s | no |
//! | Top movers | nothing | 300 s | no |
//!
//! Every fetch is tagged with a token. A result is applied only when its token
//! is still the latest one issued, so a slow answer for a previous symbol never
//! overwrites the current one.

mod consumer;
mod dashboard;
mod feed;
mod state;

pub use consumer::{spawn_consumer, ConsumerHandle};
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use feed::{
    Feed, FetchFuture, MarketStatusFeed, OverviewFeed, PollPolicy, QuoteFeed, TopMoversFeed,
    ViewKind,
};
pub use state::{FetchReason, Presentation, ViewState};
