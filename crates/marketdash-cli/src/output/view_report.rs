use marketdash_core::{HasContent, Presentation, ViewKind, ViewState};
use serde::Serialize;
use serde_json::Value;
use time::format_description::well_known::Rfc3339;

use crate::error::CliError;

/// JSON rendering of one view snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ViewReport {
    pub view: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub status: ViewStatus,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Prompt,
    Loading,
    Error,
    NoData,
    Ready,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: &'static str,
    pub message: String,
    /// True when the error sits next to data from an earlier success.
    pub stale: bool,
}

impl ViewReport {
    pub fn from_state<T: Serialize + HasContent>(
        kind: ViewKind,
        state: &ViewState<T>,
    ) -> Result<Self, CliError> {
        let (status, busy, data) = match state.presentation() {
            Presentation::Prompt => (ViewStatus::Prompt, false, None),
            Presentation::Skeleton => (ViewStatus::Loading, true, None),
            Presentation::Error(_) => (ViewStatus::Error, state.is_loading, None),
            Presentation::NoData => (ViewStatus::NoData, state.is_loading, None),
            Presentation::Ready { data, busy, .. } => {
                (ViewStatus::Ready, busy, Some(serde_json::to_value(data)?))
            }
        };

        let error = state.error.as_ref().map(|error| ErrorReport {
            code: error.code(),
            message: error.message().to_owned(),
            stale: status == ViewStatus::Ready,
        });

        Ok(Self {
            view: view_name(kind),
            symbol: state.symbol.as_ref().map(ToString::to_string),
            status,
            busy,
            data,
            error,
            settled_at: state
                .settled_at
                .and_then(|settled_at| settled_at.format(&Rfc3339).ok()),
        })
    }

    pub fn is_failure(&self) -> bool {
        self.status == ViewStatus::Error
    }
}

pub const fn view_name(kind: ViewKind) -> &'static str {
    match kind {
        ViewKind::Quote => "quote",
        ViewKind::Overview => "overview",
        ViewKind::MarketStatus => "market_status",
        ViewKind::TopMovers => "top_movers",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketdash_core::{ApiError, ApiErrorKind, CompanyOverview, Symbol};

    #[test]
    fn failure_report_carries_code_and_message() {
        let state = ViewState::<CompanyOverview>::settled(
            Some(Symbol::parse("ZZZZ").expect("valid")),
            Err(ApiError::application(ApiErrorKind::InvalidInput, "Invalid API call.")),
        );
        let report = ViewReport::from_state(ViewKind::Overview, &state).expect("serializable");

        assert!(report.is_failure());
        assert_eq!(report.view, "overview");
        assert_eq!(report.symbol.as_deref(), Some("ZZZZ"));
        let error = report.error.expect("error present");
        assert_eq!(error.code, "api.invalid_input");
        assert!(!error.stale);
        assert!(report.settled_at.is_some());
    }

    #[test]
    fn empty_success_is_no_data_not_failure() {
        let state = ViewState::settled(None, Ok(CompanyOverview::default()));
        let report = ViewReport::from_state(ViewKind::Overview, &state).expect("serializable");
        assert_eq!(report.status, ViewStatus::NoData);
        assert!(!report.is_failure());
        assert!(report.data.is_none());
    }
}
