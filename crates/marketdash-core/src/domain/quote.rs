use serde::{Deserialize, Serialize};

use crate::domain::HasContent;
use crate::format::{classify_change, ChangeDirection};

/// `GLOBAL_QUOTE` success payload.
///
/// An unknown but well-formed symbol comes back as `{"Global Quote": {}}`, so
/// the nested object is optional and an empty one is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default, skip_serializing_if = "Option::is_none")]
    pub global_quote: Option<GlobalQuote>,
}

impl GlobalQuoteResponse {
    pub fn quote(&self) -> Option<&GlobalQuote> {
        self.global_quote
            .as_ref()
            .filter(|quote| !quote.symbol.trim().is_empty())
    }
}

impl HasContent for GlobalQuoteResponse {
    fn has_content(&self) -> bool {
        self.quote().is_some()
    }
}

/// Latest quote for one symbol, fields kept as the raw strings the API sends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    pub symbol: String,
    #[serde(rename = "02. open")]
    pub open: String,
    #[serde(rename = "03. high")]
    pub high: String,
    #[serde(rename = "04. low")]
    pub low: String,
    #[serde(rename = "05. price")]
    pub price: String,
    #[serde(rename = "06. volume")]
    pub volume: String,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: String,
    #[serde(rename = "08. previous close")]
    pub previous_close: String,
    #[serde(rename = "09. change")]
    pub change: String,
    #[serde(rename = "10. change percent")]
    pub change_percent: String,
}

impl GlobalQuote {
    pub fn direction(&self) -> ChangeDirection {
        classify_change(&self.change_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_nested_quote_is_absent() {
        let response: GlobalQuoteResponse =
            serde_json::from_str(r#"{"Global Quote": {}}"#).expect("lenient decode");
        assert!(response.global_quote.is_some());
        assert!(response.quote().is_none());
        assert!(!response.has_content());
    }

    #[test]
    fn decodes_numbered_field_names() {
        let response: GlobalQuoteResponse = serde_json::from_str(
            r#"{"Global Quote": {"01. symbol": "IBM", "05. price": "170.10", "10. change percent": "-0.52%"}}"#,
        )
        .expect("decode");
        let quote = response.quote().expect("quote present");
        assert_eq!(quote.price, "170.10");
        assert_eq!(quote.direction(), ChangeDirection::Down);
    }
}
