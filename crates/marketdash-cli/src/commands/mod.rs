mod market_status;
mod movers;
mod overview;
mod quote;
mod watch;

use std::sync::Arc;

use marketdash_core::{
    fixtures, ApiConfig, DashboardConfig, HasContent, VantageClient, ViewKind, ViewState,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::{Report, ViewReport};

pub struct CommandOutcome {
    /// `None` when the command already wrote its own output.
    pub report: Option<Report>,
    /// A view settled on a failure.
    pub failed: bool,
}

impl CommandOutcome {
    pub fn from_view<T: Serialize + HasContent>(
        kind: ViewKind,
        state: &ViewState<T>,
        text: String,
    ) -> Result<Self, CliError> {
        Self::from_report(ViewReport::from_state(kind, state)?, text)
    }

    pub fn from_report(view: ViewReport, text: String) -> Result<Self, CliError> {
        Ok(Self {
            failed: view.is_failure(),
            report: Some(Report {
                text,
                json: serde_json::to_value(view)?,
            }),
        })
    }

    pub const fn finished(failed: bool) -> Self {
        Self {
            report: None,
            failed,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutcome, CliError> {
    let config = load_config(cli)?;
    let client = build_client(cli, config.api.clone());

    match &cli.command {
        Command::Quote(args) => quote::run(args, &client).await,
        Command::Overview(args) => overview::run(args, &client).await,
        Command::MarketStatus => market_status::run(&client).await,
        Command::Movers(args) => movers::run(args, &client).await,
        Command::Watch(args) => watch::run(args, client, &config, cli.format).await,
    }
}

/// Environment first, then command-line overrides.
fn load_config(cli: &Cli) -> Result<DashboardConfig, CliError> {
    let mut config = DashboardConfig::from_env()?;

    if let Some(base_url) = &cli.base_url {
        let timeout_ms = config.api.timeout_ms();
        config.api = ApiConfig::new(base_url.as_str(), config.api.api_key())?
            .with_timeout_ms(timeout_ms);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.api = config.api.with_timeout_ms(timeout_ms);
    }
    Ok(config)
}

fn build_client(cli: &Cli, config: ApiConfig) -> VantageClient {
    debug!(mock = cli.mock, config = ?config, "building client");
    if cli.mock {
        VantageClient::new(Arc::new(fixtures::sample_http_client()), config)
    } else {
        VantageClient::with_reqwest(config)
    }
}
