use marketdash_core::render::market_status_panel;
use marketdash_core::{VantageClient, ViewKind, ViewState};

use crate::error::CliError;

use super::CommandOutcome;

pub async fn run(client: &VantageClient) -> Result<CommandOutcome, CliError> {
    let state = ViewState::settled(None, client.market_status().await);
    CommandOutcome::from_view(ViewKind::MarketStatus, &state, market_status_panel(&state))
}
