use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::request::Selector;
use crate::Symbol;

/// HTTP GET request issued by the request layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout_ms: 3_000,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Decoded value of the first query parameter called `name`.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let (_, query) = self.url.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == name {
                urlencoding::decode(value).ok().map(Cow::into_owned)
            } else {
                None
            }
        })
    }
}

/// HTTP response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure before any status was received, or while reading the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport contract used by the request layer.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Live transport over `reqwest`; the per-request timeout bounds connect and body.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(concat!("marketdash/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }

    /// Wrap a preconfigured client (proxies, TLS roots).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .get(&request.url)
                .timeout(Duration::from_millis(request.timeout_ms));

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::new(format!("request timeout: {}", e.without_url()))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {}", e.without_url()))
                } else {
                    HttpError::new(format!("request failed: {}", e.without_url()))
                }
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                HttpError::new(format!("failed to read response body: {}", e.without_url()))
            })?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
struct FixtureRoute {
    response: Result<HttpResponse, HttpError>,
    latency: Duration,
}

/// Offline transport serving canned responses keyed by selector and symbol.
///
/// Used by `--mock` runs and tests. Every executed request is recorded.
#[derive(Debug, Default)]
pub struct FixtureHttpClient {
    routes: BTreeMap<(String, Option<String>), FixtureRoute>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FixtureHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `selector` (optionally only for `symbol`) with `response`.
    pub fn with_response(
        self,
        selector: Selector,
        symbol: Option<&Symbol>,
        response: HttpResponse,
    ) -> Self {
        self.with_route(selector, symbol, Ok(response), Duration::ZERO)
    }

    pub fn with_json(self, selector: Selector, symbol: Option<&Symbol>, body: &str) -> Self {
        self.with_response(selector, symbol, HttpResponse::ok_json(body))
    }

    /// Fail `selector` at the transport level.
    pub fn with_transport_error(
        self,
        selector: Selector,
        symbol: Option<&Symbol>,
        error: HttpError,
    ) -> Self {
        self.with_route(selector, symbol, Err(error), Duration::ZERO)
    }

    pub fn with_route(
        mut self,
        selector: Selector,
        symbol: Option<&Symbol>,
        response: Result<HttpResponse, HttpError>,
        latency: Duration,
    ) -> Self {
        self.routes.insert(
            route_key(selector.as_str(), symbol.map(Symbol::as_str)),
            FixtureRoute { response, latency },
        );
        self
    }

    /// Delay every response registered so far for `selector`/`symbol`.
    pub fn with_latency(
        mut self,
        selector: Selector,
        symbol: Option<&Symbol>,
        latency: Duration,
    ) -> Self {
        if let Some(route) = self
            .routes
            .get_mut(&route_key(selector.as_str(), symbol.map(Symbol::as_str)))
        {
            route.latency = latency;
        }
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of recorded requests for `selector`.
    pub fn request_count(&self, selector: Selector) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.query_param("function").as_deref() == Some(selector.as_str()))
            .count()
    }

    fn lookup(&self, request: &HttpRequest) -> Option<FixtureRoute> {
        let function = request.query_param("function")?;
        let symbol = request.query_param("symbol");
        self.routes
            .get(&route_key(&function, symbol.as_deref()))
            .or_else(|| self.routes.get(&route_key(&function, None)))
            .cloned()
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let route = self.lookup(&request);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        Box::pin(async move {
            let Some(route) = route else {
                return Ok(HttpResponse::with_status(404, "no fixture registered"));
            };
            if !route.latency.is_zero() {
                tokio::time::sleep(route.latency).await;
            }
            route.response
        })
    }
}

fn route_key(function: &str, symbol: Option<&str>) -> (String, Option<String>) {
    (function.to_owned(), symbol.map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_decodes_values() {
        let request = HttpRequest::get("https://x.test/query?symbol=BRK.B&x=a%20b");
        assert_eq!(request.query_param("symbol").as_deref(), Some("BRK.B"));
        assert_eq!(request.query_param("x").as_deref(), Some("a b"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn header_names_are_lowercased() {
        let request =
            HttpRequest::get("https://x.test/query").with_header("Accept", "application/json");
        assert_eq!(
            request.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn fixture_falls_back_to_selector_route() {
        let aapl = Symbol::parse("AAPL").expect("valid");
        let client = FixtureHttpClient::new()
            .with_json(Selector::GlobalQuote, None, r#"{"generic": true}"#)
            .with_json(Selector::GlobalQuote, Some(&aapl), r#"{"aapl": true}"#);

        let specific = client
            .execute(HttpRequest::get(
                "https://x.test/query?function=GLOBAL_QUOTE&symbol=AAPL",
            ))
            .await
            .expect("fixture");
        let generic = client
            .execute(HttpRequest::get(
                "https://x.test/query?function=GLOBAL_QUOTE&symbol=MSFT",
            ))
            .await
            .expect("fixture");
        let missing = client
            .execute(HttpRequest::get("https://x.test/query?function=OVERVIEW"))
            .await
            .expect("fixture");

        assert_eq!(specific.body, r#"{"aapl": true}"#);
        assert_eq!(generic.body, r#"{"generic": true}"#);
        assert_eq!(missing.status, 404);
        assert_eq!(client.request_count(Selector::GlobalQuote), 2);
    }
}
