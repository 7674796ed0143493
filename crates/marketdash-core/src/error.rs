use thiserror::Error;

/// Input validation errors exposed by `marketdash-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid selector '{value}', expected one of GLOBAL_QUOTE, MARKET_STATUS, TOP_GAINERS_LOSERS, OVERVIEW")]
    InvalidSelector { value: String },
    #[error("query argument name cannot be empty")]
    EmptyArgumentName,
}

/// Configuration errors raised while loading `ApiConfig` or `PollSchedule`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api key cannot be empty")]
    EmptyApiKey,
    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("{name} must be a positive integer: '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}
