use marketdash_core::render::movers_panel;
use marketdash_core::{HasContent, Mover, MoverTab, TopMovers, VantageClient, ViewKind, ViewState};
use serde::Serialize;

use crate::cli::MoversArgs;
use crate::error::CliError;
use crate::output::ViewReport;

use super::CommandOutcome;

/// JSON shape of one movers table.
#[derive(Debug, Serialize)]
struct MoversTable<'a> {
    tab: MoverTab,
    last_updated: &'a str,
    rows: &'a [Mover],
}

pub async fn run(args: &MoversArgs, client: &VantageClient) -> Result<CommandOutcome, CliError> {
    let tab = MoverTab::from(args.tab);
    let state = ViewState::settled(None, client.top_movers().await);

    let mut report = ViewReport::from_state(ViewKind::TopMovers, &state)?;
    report.data = table(&state, tab, args.limit)
        .map(serde_json::to_value)
        .transpose()?;

    CommandOutcome::from_report(report, movers_panel(&state, tab, args.limit))
}

fn table(state: &ViewState<TopMovers>, tab: MoverTab, limit: usize) -> Option<MoversTable<'_>> {
    let movers = state.data.as_ref().filter(|movers| movers.has_content())?;
    Some(MoversTable {
        tab,
        last_updated: &movers.last_updated,
        rows: movers.rows(tab, limit),
    })
}
