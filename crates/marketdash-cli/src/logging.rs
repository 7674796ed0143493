use tracing_subscriber::EnvFilter;

use crate::cli::LogFormat;
use crate::error::CliError;

/// Filter variable; wins over `--log-level`.
pub const LOG_ENV: &str = "MARKETDASH_LOG";

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn init_tracing(log_level: &str, log_format: LogFormat) -> Result<(), CliError> {
    let filter = std::env::var(LOG_ENV).unwrap_or_else(|_| log_level.to_owned());
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|err| CliError::Logging(format!("invalid log filter: {err}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|err| CliError::Logging(err.to_string()))
}
