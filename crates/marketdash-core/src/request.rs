//! Query construction for the single Alpha Vantage endpoint.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Symbol, ValidationError};

/// Query parameter carrying the selector.
pub const FUNCTION_PARAM: &str = "function";
/// Query parameter carrying the credential.
pub const API_KEY_PARAM: &str = "apikey";

/// Function selector choosing which data family the API returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Selector {
    #[serde(rename = "GLOBAL_QUOTE")]
    GlobalQuote,
    #[serde(rename = "MARKET_STATUS")]
    MarketStatus,
    #[serde(rename = "TOP_GAINERS_LOSERS")]
    TopGainersLosers,
    #[serde(rename = "OVERVIEW")]
    Overview,
}

impl Selector {
    pub const ALL: [Self; 4] = [
        Self::GlobalQuote,
        Self::MarketStatus,
        Self::TopGainersLosers,
        Self::Overview,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GlobalQuote => "GLOBAL_QUOTE",
            Self::MarketStatus => "MARKET_STATUS",
            Self::TopGainersLosers => "TOP_GAINERS_LOSERS",
            Self::Overview => "OVERVIEW",
        }
    }

    pub const fn requires_symbol(self) -> bool {
        matches!(self, Self::GlobalQuote | Self::Overview)
    }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Selector {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|selector| selector.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::InvalidSelector {
                value: value.to_owned(),
            })
    }
}

/// Immutable query: a selector plus selector-specific arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    selector: Selector,
    arguments: BTreeMap<String, String>,
}

impl QueryRequest {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            arguments: BTreeMap::new(),
        }
    }

    pub fn for_symbol(selector: Selector, symbol: &Symbol) -> Self {
        Self::new(selector).with_symbol(symbol)
    }

    pub fn with_symbol(mut self, symbol: &Symbol) -> Self {
        self.arguments
            .insert(String::from("symbol"), symbol.as_str().to_owned());
        self
    }

    pub fn with_argument(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyArgumentName);
        }
        self.arguments.insert(name, value.into());
        Ok(self)
    }

    pub const fn selector(&self) -> Selector {
        self.selector
    }

    pub fn arguments(&self) -> &BTreeMap<String, String> {
        &self.arguments
    }

    pub fn symbol(&self) -> Option<&str> {
        self.arguments.get("symbol").map(String::as_str)
    }

    /// Full request URL. `function` and `apikey` always come from the selector
    /// and credential, never from same-named arguments.
    pub fn to_url(&self, base_url: &str, api_key: &str) -> String {
        self.url_with_key(base_url, &urlencoding::encode(api_key))
    }

    /// URL safe to log: the credential is masked.
    pub fn redacted_url(&self, base_url: &str) -> String {
        self.url_with_key(base_url, "***")
    }

    fn url_with_key(&self, base_url: &str, encoded_key: &str) -> String {
        let mut pairs = Vec::with_capacity(self.arguments.len() + 2);
        pairs.push(format!("{FUNCTION_PARAM}={}", self.selector.as_str()));
        for (name, value) in &self.arguments {
            if name == FUNCTION_PARAM || name == API_KEY_PARAM {
                continue;
            }
            pairs.push(format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            ));
        }
        pairs.push(format!("{API_KEY_PARAM}={encoded_key}"));

        let separator = if base_url.contains('?') { '&' } else { '?' };
        format!("{base_url}{separator}{}", pairs.join("&"))
    }
}
