mod view_report;

use serde_json::Value;

pub use self::view_report::ViewReport;
use crate::cli::OutputFormat;
use crate::error::CliError;

/// Rendered result of a one-shot command.
#[derive(Debug, Clone)]
pub struct Report {
    pub text: String,
    pub json: Value,
}

pub fn render(report: &Report, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => print!("{}", report.text),
        OutputFormat::Json => println!("{}", to_json(&report.json, pretty)?),
    }
    Ok(())
}

pub fn to_json(value: &Value, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(payload)
}
