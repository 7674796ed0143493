//! CLI argument definitions for marketdash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `quote` | Latest quote for a symbol |
//! | `overview` | Company profile and key ratios |
//! | `market-status` | Open/closed state of global markets |
//! | `movers` | Top gainers, losers and most active tickers |
//! | `watch` | Live dashboard driven by stdin |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `text` | Output format (text, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--mock` | `false` | Serve bundled sample payloads offline |
//! | `--timeout-ms` | env or `5000` | Request timeout in ms |
//! | `--base-url` | env or Alpha Vantage | Query endpoint |
//! | `--log-level` | `warn` | Filter used when `MARKETDASH_LOG` is unset |
//! | `--log-format` | `text` | Log line format on stderr (text, json) |
//!
//! # Examples
//!
//! ```bash
//! marketdash quote AAPL
//! marketdash movers --tab losers --limit 5 --format json --pretty
//! marketdash watch IBM --mock
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use marketdash_core::{MoverTab, MOVERS_TABLE_ROWS};

/// Stock market dashboard for the Alpha Vantage API.
#[derive(Debug, Parser)]
#[command(
    name = "marketdash",
    author,
    version,
    about = "Stock market dashboard for the Alpha Vantage API",
    long_about = "marketdash shows quotes, company overviews, market status and top movers \
from Alpha Vantage.\n\
\n\
The API key is read from MARKETDASH_ALPHAVANTAGE_API_KEY (default: demo).\n\
\n\
Use 'marketdash <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Answer from bundled sample payloads instead of the network.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Request timeout in milliseconds; overrides MARKETDASH_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Query endpoint; overrides MARKETDASH_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log filter used when MARKETDASH_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Log line format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable panels.
    Text,
    /// JSON report objects.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the latest quote for a symbol.
    ///
    /// # Examples
    ///
    ///   marketdash quote AAPL
    ///   marketdash quote ibm --format json
    Quote(SymbolArgs),

    /// Fetch the company overview for a symbol.
    ///
    /// # Examples
    ///
    ///   marketdash overview MSFT
    Overview(SymbolArgs),

    /// Show whether global markets are open or closed.
    MarketStatus,

    /// Show top gainers, top losers or most actively traded tickers.
    ///
    /// # Examples
    ///
    ///   marketdash movers
    ///   marketdash movers --tab active --limit 5
    Movers(MoversArgs),

    /// Run the live dashboard.
    ///
    /// Type a symbol and press enter to switch, `r` to refresh the quote,
    /// `clear` to drop the symbol and `q` (or Ctrl-C) to quit.
    Watch(WatchArgs),
}

/// Arguments for the `quote` and `overview` commands.
#[derive(Debug, Args)]
pub struct SymbolArgs {
    /// Ticker symbol (e.g., AAPL, BRK.B).
    pub symbol: String,
}

/// Arguments for the `movers` command.
#[derive(Debug, Args)]
pub struct MoversArgs {
    /// Which movers table to show.
    #[arg(long, value_enum, default_value_t = TabArg::Gainers)]
    pub tab: TabArg,

    /// Maximum number of rows.
    #[arg(long, default_value_t = MOVERS_TABLE_ROWS)]
    pub limit: usize,
}

/// Arguments for the `watch` command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Symbol to start with; omit to start with an empty search.
    pub symbol: Option<String>,

    /// Movers table shown in the dashboard.
    #[arg(long, value_enum, default_value_t = TabArg::Gainers)]
    pub tab: TabArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    Gainers,
    Losers,
    Active,
}

impl From<TabArg> for MoverTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::Gainers => Self::Gainers,
            TabArg::Losers => Self::Losers,
            TabArg::Active => Self::MostActive,
        }
    }
}
