use std::future::Future;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use marketdash_core::render::{market_status_panel, movers_panel, overview_panel, quote_panel};
use marketdash_core::{
    Dashboard, DashboardConfig, DashboardSnapshot, MoverTab, Symbol, ValidationError, VantageClient,
    ViewKind, MOVERS_TABLE_ROWS,
};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output::ViewReport;

use super::CommandOutcome;

/// One line typed into the live dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Quit,
    Refresh,
    Select(Option<Symbol>),
    Ignore,
}

fn parse_input(line: &str) -> Result<Input, ValidationError> {
    match line.trim() {
        "" => Ok(Input::Ignore),
        "q" | "quit" => Ok(Input::Quit),
        "r" | "refresh" => Ok(Input::Refresh),
        "clear" => Ok(Input::Select(None)),
        symbol => Symbol::parse(symbol).map(|symbol| Input::Select(Some(symbol))),
    }
}

const KEY_HINTS: &str = "symbol + enter to search | r refresh | clear | q quit";

/// Why the dashboard loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Interrupted,
    Quit,
    InputClosed,
}

pub async fn run(
    args: &WatchArgs,
    client: VantageClient,
    config: &DashboardConfig,
    format: OutputFormat,
) -> Result<CommandOutcome, CliError> {
    let symbol = args
        .symbol
        .as_deref()
        .map(Symbol::parse_optional)
        .transpose()?
        .flatten();
    let tab = MoverTab::from(args.tab);

    let mut lines = spawn_line_reader(BufReader::new(io::stdin()))?;
    let interrupt = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    let dashboard = Dashboard::start(client, &config.polling, symbol);
    let exit = drive(&dashboard, &mut lines, interrupt, |snapshot| {
        draw(snapshot, tab, format)
    })
    .await;
    dashboard.shutdown().await;

    info!(exit = ?exit.as_ref().ok(), "dashboard closed");
    exit.map(|_| CommandOutcome::finished(false))
}

/// Forward lines from `reader` over a channel.
///
/// The read runs on a plain thread, never on the runtime's blocking pool, so a
/// read parked in the OS does not hold up runtime shutdown.
fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::UnboundedReceiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name(String::from("marketdash-input"))
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if sender.send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(receiver)
}

/// Run the dashboard until the user quits, input ends or `interrupt` fires.
async fn drive<I, D>(
    dashboard: &Dashboard,
    lines: &mut mpsc::UnboundedReceiver<io::Result<String>>,
    interrupt: I,
    mut redraw: D,
) -> Result<Exit, CliError>
where
    I: Future<Output = ()>,
    D: FnMut(&DashboardSnapshot) -> Result<(), CliError>,
{
    let mut quote = dashboard.quote.subscribe();
    let mut overview = dashboard.overview.subscribe();
    let mut market_status = dashboard.market_status.subscribe();
    let mut top_movers = dashboard.top_movers.subscribe();
    tokio::pin!(interrupt);

    redraw(&dashboard.snapshot())?;
    loop {
        tokio::select! {
            biased;
            () = &mut interrupt => {
                info!("interrupted");
                return Ok(Exit::Interrupted);
            }
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("input closed");
                    return Ok(Exit::InputClosed);
                };
                match parse_input(&line?) {
                    Ok(Input::Quit) => return Ok(Exit::Quit),
                    Ok(Input::Refresh) => {
                        dashboard.refresh_quote();
                    }
                    Ok(Input::Select(symbol)) => dashboard.select_symbol(symbol),
                    Ok(Input::Ignore) => {}
                    Err(error) => eprintln!("invalid symbol: {error}"),
                }
                continue;
            }
            Ok(()) = quote.changed() => {}
            Ok(()) = overview.changed() => {}
            Ok(()) = market_status.changed() => {}
            Ok(()) = top_movers.changed() => {}
        }
        redraw(&dashboard.snapshot())?;
    }
}

/// One NDJSON line per redraw in `--format json`.
#[derive(Debug, Serialize)]
struct Frame {
    quote: ViewReport,
    overview: ViewReport,
    market_status: ViewReport,
    top_movers: ViewReport,
}

fn draw(snapshot: &DashboardSnapshot, tab: MoverTab, format: OutputFormat) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            if stdout.is_terminal() {
                write!(stdout, "\x1b[2J\x1b[H")?;
            }
            writeln!(stdout, "{}", quote_panel(&snapshot.quote))?;
            writeln!(stdout, "{}", overview_panel(&snapshot.overview))?;
            writeln!(stdout, "{}", market_status_panel(&snapshot.market_status))?;
            let movers = movers_panel(&snapshot.top_movers, tab, MOVERS_TABLE_ROWS);
            writeln!(stdout, "{movers}")?;
            writeln!(stdout, "{KEY_HINTS}")?;
        }
        OutputFormat::Json => {
            let frame = Frame {
                quote: ViewReport::from_state(ViewKind::Quote, &snapshot.quote)?,
                overview: ViewReport::from_state(ViewKind::Overview, &snapshot.overview)?,
                market_status: ViewReport::from_state(
                    ViewKind::MarketStatus,
                    &snapshot.market_status,
                )?,
                top_movers: ViewReport::from_state(ViewKind::TopMovers, &snapshot.top_movers)?,
            };
            writeln!(stdout, "{}", serde_json::to_string(&frame)?)?;
        }
    }
    stdout.flush()?;
    Ok(())
}
