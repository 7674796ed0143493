//! Bundled sample payloads served by `--mock` runs and tests.
//!
//! Quote and overview answers exist for `AAPL` and `IBM`; any other symbol
//! gets the empty success shape the live API returns for unknown tickers.

use crate::http_client::FixtureHttpClient;
use crate::request::Selector;
use crate::Symbol;

pub const AAPL_QUOTE: &str = r#"{
    "Global Quote": {
        "01. symbol": "AAPL",
        "02. open": "189.5100",
        "03. high": "191.9200",
        "04. low": "189.0100",
        "05. price": "191.0400",
        "06. volume": "52164535",
        "07. latest trading day": "2024-05-10",
        "08. previous close": "189.8400",
        "09. change": "1.2000",
        "10. change percent": "0.6321%"
    }
}"#;

pub const IBM_QUOTE: &str = r#"{
    "Global Quote": {
        "01. symbol": "IBM",
        "02. open": "167.5000",
        "03. high": "168.0600",
        "04. low": "166.7600",
        "05. price": "167.1500",
        "06. volume": "2958452",
        "07. latest trading day": "2024-05-10",
        "08. previous close": "167.4100",
        "09. change": "-0.2600",
        "10. change percent": "-0.1553%"
    }
}"#;

pub const EMPTY_QUOTE: &str = r#"{"Global Quote": {}}"#;

pub const AAPL_OVERVIEW: &str = r#"{
    "Symbol": "AAPL",
    "AssetType": "Common Stock",
    "Name": "Apple Inc",
    "Description": "Apple Inc. designs, manufactures and markets smartphones, personal computers, tablets, wearables and accessories worldwide.",
    "Exchange": "NASDAQ",
    "Currency": "USD",
    "Country": "USA",
    "Sector": "TECHNOLOGY",
    "Industry": "ELECTRONIC COMPUTERS",
    "MarketCapitalization": "2945836712000",
    "PERatio": "29.68",
    "EPS": "6.43",
    "DividendYield": "0.0052",
    "Beta": "1.264",
    "52WeekHigh": "199.18",
    "52WeekLow": "163.67",
    "50DayMovingAverage": "173.12",
    "200DayMovingAverage": "181.05"
}"#;

pub const IBM_OVERVIEW: &str = r#"{
    "Symbol": "IBM",
    "AssetType": "Common Stock",
    "Name": "International Business Machines",
    "Description": "International Business Machines Corporation provides integrated solutions and services worldwide.",
    "Exchange": "NYSE",
    "Currency": "USD",
    "Country": "USA",
    "Sector": "TECHNOLOGY",
    "Industry": "COMPUTER & OFFICE EQUIPMENT",
    "MarketCapitalization": "153542984000",
    "PERatio": "18.93",
    "EPS": "8.83",
    "DividendYield": "0.0398",
    "Beta": "0.717",
    "52WeekHigh": "199.18",
    "52WeekLow": "130.68",
    "50DayMovingAverage": "182.4",
    "200DayMovingAverage": "164.27"
}"#;

pub const EMPTY_OVERVIEW: &str = "{}";

pub const MARKET_STATUS: &str = r#"{
    "endpoint": "Global Market Open & Close Status",
    "markets": [
        {
            "market_type": "Equity",
            "region": "United States",
            "primary_exchanges": "NASDAQ, NYSE, AMEX, BATS",
            "local_open": "09:30",
            "local_close": "16:15",
            "current_status": "open",
            "notes": ""
        },
        {
            "market_type": "Equity",
            "region": "United Kingdom",
            "primary_exchanges": "London Stock Exchange",
            "local_open": "08:00",
            "local_close": "16:30",
            "current_status": "closed",
            "notes": ""
        },
        {
            "market_type": "Forex",
            "region": "Global",
            "primary_exchanges": "Global",
            "local_open": "N/A",
            "local_close": "N/A",
            "current_status": "open",
            "notes": "Forex markets trade 24 hours on weekdays."
        }
    ]
}"#;

pub const TOP_MOVERS: &str = r#"{
    "metadata": "Top gainers, losers, and most actively traded US tickers",
    "last_updated": "2024-05-10 16:15:59 US/Eastern",
    "top_gainers": [
        {"ticker": "NVNI", "price": "7.68", "change_amount": "4.26", "change_percentage": "124.5614%", "volume": "87061953"},
        {"ticker": "SGBX", "price": "0.171", "change_amount": "0.0881", "change_percentage": "106.1446%", "volume": "198245134"},
        {"ticker": "IMNN", "price": "5.4", "change_amount": "2.14", "change_percentage": "65.6442%", "volume": "7512301"}
    ],
    "top_losers": [
        {"ticker": "ACXP", "price": "0.3411", "change_amount": "-0.5589", "change_percentage": "-62.1%", "volume": "10593416"},
        {"ticker": "HUBC", "price": "0.064", "change_amount": "-0.0665", "change_percentage": "-50.9579%", "volume": "46710452"}
    ],
    "most_actively_traded": [
        {"ticker": "SGBX", "price": "0.171", "change_amount": "0.0881", "change_percentage": "106.1446%", "volume": "198245134"},
        {"ticker": "TSLA", "price": "168.47", "change_amount": "-3.5", "change_percentage": "-2.0352%", "volume": "93370049"},
        {"ticker": "AAPL", "price": "183.05", "change_amount": "0.65", "change_percentage": "0.3564%", "volume": "50759496"}
    ]
}"#;

/// Transport answering every dashboard selector from the bundled payloads.
pub fn sample_http_client() -> FixtureHttpClient {
    let aapl = Symbol::parse("AAPL").ok();
    let ibm = Symbol::parse("IBM").ok();

    FixtureHttpClient::new()
        .with_json(Selector::GlobalQuote, None, EMPTY_QUOTE)
        .with_json(Selector::GlobalQuote, aapl.as_ref(), AAPL_QUOTE)
        .with_json(Selector::GlobalQuote, ibm.as_ref(), IBM_QUOTE)
        .with_json(Selector::Overview, None, EMPTY_OVERVIEW)
        .with_json(Selector::Overview, aapl.as_ref(), AAPL_OVERVIEW)
        .with_json(Selector::Overview, ibm.as_ref(), IBM_OVERVIEW)
        .with_json(Selector::MarketStatus, None, MARKET_STATUS)
        .with_json(Selector::TopGainersLosers, None, TOP_MOVERS)
}
