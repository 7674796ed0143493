use marketdash_core::render::overview_panel;
use marketdash_core::{Symbol, VantageClient, ViewKind, ViewState};

use crate::cli::SymbolArgs;
use crate::error::CliError;

use super::CommandOutcome;

pub async fn run(args: &SymbolArgs, client: &VantageClient) -> Result<CommandOutcome, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let result = client.company_overview(&symbol).await;
    let state = ViewState::settled(Some(symbol), result);

    CommandOutcome::from_view(ViewKind::Overview, &state, overview_panel(&state))
}
