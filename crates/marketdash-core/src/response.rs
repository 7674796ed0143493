//! Response normalization.
//!
//! Alpha Vantage reports logical failures inside 2xx bodies using one of three
//! top-level keys. Normalization decodes those failure shapes first and only
//! then decodes the selector-specific success type:
//!
//! | Key | Kind | Typical cause |
//! |-----|------|---------------|
//! | `Error Message` | [`ApiErrorKind::InvalidInput`] | unknown symbol, bad function |
//! | `Information` | [`ApiErrorKind::Information`] | rate limit or plan restriction |
//! | `Note` | [`ApiErrorKind::Note`] | legacy rate-limit notice |

use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http_client::{HttpError, HttpResponse};

/// Failure keys in priority order.
pub const FAILURE_KEYS: [(&str, ApiErrorKind); 3] = [
    ("Error Message", ApiErrorKind::InvalidInput),
    ("Information", ApiErrorKind::Information),
    ("Note", ApiErrorKind::Note),
];

/// Failure classification for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Network unreachable, DNS failure, timeout.
    Transport,
    /// Non-2xx HTTP status.
    HttpStatus,
    /// `Error Message` key in the body.
    InvalidInput,
    /// `Information` key in the body.
    Information,
    /// `Note` key in the body.
    Note,
    /// Body is not JSON or not the expected JSON type.
    Parse,
}

/// Structured failure returned by every request-layer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    status: Option<u16>,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    pub fn http_status(status: u16) -> Self {
        Self {
            kind: ApiErrorKind::HttpStatus,
            message: format!("API error: {status}"),
            status: Some(status),
        }
    }

    pub fn application(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Text shown to the user. Application failures carry the API's wording verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// True for failures the API reported inside a successful response.
    pub const fn is_application(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::InvalidInput | ApiErrorKind::Information | ApiErrorKind::Note
        )
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::Transport => "api.transport",
            ApiErrorKind::HttpStatus => "api.http_status",
            ApiErrorKind::InvalidInput => "api.invalid_input",
            ApiErrorKind::Information => "api.information",
            ApiErrorKind::Note => "api.note",
            ApiErrorKind::Parse => "api.parse",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ApiError {}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        Self::transport(error.message())
    }
}

/// Classify a transport outcome into a typed payload or an [`ApiError`].
pub fn normalize<T: DeserializeOwned>(
    outcome: Result<HttpResponse, HttpError>,
) -> Result<T, ApiError> {
    let response = outcome?;
    if !response.is_success() {
        return Err(ApiError::http_status(response.status));
    }
    decode_body(&response.body)
}

/// Decode a 2xx body: failure keys first, then the success payload.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::parse(format!("response body is not valid JSON: {e}")))?;

    if let Some(failure) = detect_failure(&value) {
        return Err(failure);
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::parse(format!("unexpected response shape: {e}")))
}

/// First failure key present in a top-level JSON object, by priority.
pub fn detect_failure(value: &Value) -> Option<ApiError> {
    let object = value.as_object()?;
    FAILURE_KEYS.iter().find_map(|(key, kind)| {
        object.get(*key).map(|message| {
            let text = match message {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            ApiError::application(*kind, text)
        })
    })
}
