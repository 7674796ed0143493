use time::OffsetDateTime;

use crate::domain::HasContent;
use crate::response::ApiError;
use crate::Symbol;

/// What started a fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// First fetch after start or after the driving symbol changed.
    Initial,
    /// Poll timer fired.
    Tick,
    /// User asked for fresh data.
    Refresh,
}

/// Snapshot of one view, published after every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<T> {
    /// Driving parameter the data belongs to.
    pub symbol: Option<Symbol>,
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<ApiError>,
    /// Results applied so far, across symbol changes.
    pub fetch_count: u64,
    pub settled_at: Option<OffsetDateTime>,
}

impl<T> ViewState<T> {
    /// Nothing requested yet: no symbol, nothing in flight.
    pub const fn idle() -> Self {
        Self {
            symbol: None,
            data: None,
            is_loading: false,
            error: None,
            fetch_count: 0,
            settled_at: None,
        }
    }

    pub const fn loading(symbol: Option<Symbol>) -> Self {
        Self {
            symbol,
            data: None,
            is_loading: true,
            error: None,
            fetch_count: 0,
            settled_at: None,
        }
    }

    /// Snapshot of a single completed fetch.
    pub fn settled(symbol: Option<Symbol>, result: Result<T, ApiError>) -> Self {
        let mut state = Self::loading(symbol);
        state.apply(result);
        state
    }

    /// Drop everything tied to the previous symbol.
    pub(crate) fn reset_for(&mut self, symbol: Option<Symbol>, loading: bool) {
        self.symbol = symbol;
        self.data = None;
        self.error = None;
        self.is_loading = loading;
        self.settled_at = None;
    }

    /// Enter loading. Data already shown for the same symbol stays visible.
    pub(crate) fn begin_fetch(&mut self, reason: FetchReason) {
        if reason == FetchReason::Initial {
            self.data = None;
            self.error = None;
        }
        self.is_loading = true;
    }

    /// Settle the current cycle. A failure keeps earlier data for this symbol.
    pub(crate) fn apply(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => self.error = Some(error),
        }
        self.is_loading = false;
        self.fetch_count += 1;
        self.settled_at = Some(OffsetDateTime::now_utc());
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(ApiError::message)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading && (self.data.is_some() || self.error.is_some())
    }
}

impl<T: HasContent> ViewState<T> {
    /// Apply the rendering policy to this snapshot.
    pub fn presentation(&self) -> Presentation<'_, T> {
        match (&self.data, &self.error) {
            (Some(data), error) if data.has_content() => Presentation::Ready {
                data,
                busy: self.is_loading,
                stale_error: error.as_ref().map(ApiError::message),
            },
            (_, Some(error)) => Presentation::Error(error.message()),
            (Some(_), None) => Presentation::NoData,
            (None, None) if self.is_loading => Presentation::Skeleton,
            (None, None) => Presentation::Prompt,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// How a view should be drawn right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Presentation<'a, T> {
    /// No driving parameter; ask the user for one.
    Prompt,
    /// Loading with nothing to show yet.
    Skeleton,
    /// Failed with nothing to show.
    Error(&'a str),
    /// Well-formed answer without the expected content.
    NoData,
    Ready {
        data: &'a T,
        /// A fetch is in flight; `data` may be replaced soon.
        busy: bool,
        /// The latest refresh failed; `data` is from an earlier success.
        stale_error: Option<&'a str>,
    },
}
