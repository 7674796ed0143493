use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::feed::{Feed, PollPolicy, ViewKind};
use super::state::{FetchReason, ViewState};
use crate::response::ApiError;
use crate::Symbol;

#[derive(Debug)]
enum Command {
    SetSymbol(Option<Symbol>),
    Refresh,
}

type Settled<T> = (u64, Result<T, ApiError>);

/// Handle to a running polling consumer.
///
/// The consumer task owns its [`ViewState`] and publishes a fresh snapshot
/// after every transition. Dropping the handle stops the task; results still
/// in flight at that point are never applied.
pub struct ConsumerHandle<T> {
    kind: ViewKind,
    manual_refresh: bool,
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ViewState<T>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<T: Clone> ConsumerHandle<T> {
    pub const fn kind(&self) -> ViewKind {
        self.kind
    }

    /// Change the driving symbol. Views that ignore symbols ignore this too.
    pub fn set_symbol(&self, symbol: Option<Symbol>) -> bool {
        self.kind.requires_symbol() && self.commands.send(Command::SetSymbol(symbol)).is_ok()
    }

    /// Ask for an immediate re-fetch. Returns `false` when the view has no manual refresh.
    pub fn refresh(&self) -> bool {
        self.manual_refresh && self.commands.send(Command::Refresh).is_ok()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.state.clone()
    }

    /// Latest published snapshot.
    pub fn state(&self) -> ViewState<T> {
        self.state.borrow().clone()
    }

    /// Wait until a published snapshot satisfies `predicate`.
    ///
    /// Returns `None` when the consumer stopped first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ViewState<T>) -> bool,
    ) -> Option<ViewState<T>> {
        let mut receiver = self.state.clone();
        receiver
            .wait_for(predicate)
            .await
            .ok()
            .map(|state| state.clone())
    }

    /// Stop the consumer and wait for its task to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<T> Drop for ConsumerHandle<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Start a consumer for `feed` on the current runtime.
///
/// Symbol-driven views start idle when `symbol` is `None`; the others ignore
/// `symbol` and fetch immediately.
pub fn spawn_consumer<F: Feed>(
    feed: F,
    policy: PollPolicy,
    symbol: Option<Symbol>,
) -> ConsumerHandle<F::Data> {
    let kind = feed.kind();
    let symbol = symbol.filter(|_| kind.requires_symbol());
    let active = !kind.requires_symbol() || symbol.is_some();

    let initial = if active {
        ViewState::loading(symbol)
    } else {
        ViewState::idle()
    };
    let (publisher, state) = watch::channel(initial.clone());
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (result_tx, result_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();

    let consumer = Consumer {
        feed,
        policy,
        state: initial,
        publisher,
        token: 0,
        results: result_tx,
        cancel: cancel.clone(),
    };
    let task = tokio::spawn(consumer.run(command_rx, result_rx));

    ConsumerHandle {
        kind,
        manual_refresh: policy.manual_refresh,
        commands: command_tx,
        state,
        cancel,
        task: Some(task),
    }
}

struct Consumer<F: Feed> {
    feed: F,
    policy: PollPolicy,
    state: ViewState<F::Data>,
    publisher: watch::Sender<ViewState<F::Data>>,
    /// Token of the latest issued fetch; only its result may be applied.
    token: u64,
    results: mpsc::UnboundedSender<Settled<F::Data>>,
    cancel: CancellationToken,
}

impl<F: Feed> Consumer<F> {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut results: mpsc::UnboundedReceiver<Settled<F::Data>>,
    ) {
        let kind = self.feed.kind();
        let mut ticker = None;
        if self.is_active() {
            self.issue(FetchReason::Initial);
            ticker = self.ticker();
        }

        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    debug!(view = %kind, "consumer stopped");
                    break;
                }
                command = commands.recv() => match command {
                    Some(Command::SetSymbol(symbol)) => {
                        if self.change_symbol(symbol) {
                            ticker = self.ticker();
                        }
                    }
                    Some(Command::Refresh) => self.refresh(),
                    None => break,
                },
                Some((token, result)) = results.recv() => self.settle(token, result),
                () = next_tick(&mut ticker) => self.tick(),
            }
        }
    }

    fn is_active(&self) -> bool {
        !self.feed.kind().requires_symbol() || self.state.symbol.is_some()
    }

    fn ticker(&self) -> Option<Interval> {
        let period = self.policy.period.filter(|_| self.is_active())?;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Some(ticker)
    }

    fn change_symbol(&mut self, symbol: Option<Symbol>) -> bool {
        if !self.feed.kind().requires_symbol() || symbol == self.state.symbol {
            return false;
        }

        debug!(
            view = %self.feed.kind(),
            from = self.state.symbol.as_ref().map(Symbol::as_str).unwrap_or(""),
            to = symbol.as_ref().map(Symbol::as_str).unwrap_or(""),
            "symbol changed"
        );
        // Invalidate whatever is still in flight for the previous symbol.
        self.token += 1;
        let loading = symbol.is_some();
        self.state.reset_for(symbol, loading);

        if loading {
            self.issue(FetchReason::Initial);
        } else {
            self.publish();
        }
        true
    }

    /// A tick never supersedes a fetch still in flight, so answers slower
    /// than the period are still applied.
    fn tick(&mut self) {
        if self.state.is_loading {
            debug!(
                view = %self.feed.kind(),
                token = self.token,
                "tick skipped, fetch in flight"
            );
            return;
        }
        self.issue(FetchReason::Tick);
    }

    fn refresh(&mut self) {
        if self.policy.manual_refresh && self.is_active() {
            self.issue(FetchReason::Refresh);
        }
    }

    fn issue(&mut self, reason: FetchReason) {
        self.token += 1;
        let token = self.token;
        self.state.begin_fetch(reason);
        self.publish();

        debug!(view = %self.feed.kind(), token, ?reason, "fetch issued");
        let fetch = self.feed.fetch(self.state.symbol.as_ref());
        let results = self.results.clone();
        // Runs to completion; once the consumer is gone the send fails and the result is dropped.
        tokio::spawn(async move {
            let _ = results.send((token, fetch.await));
        });
    }

    fn settle(&mut self, token: u64, result: Result<F::Data, ApiError>) {
        if token != self.token {
            debug!(
                view = %self.feed.kind(),
                token,
                current = self.token,
                "discarding stale result"
            );
            return;
        }
        self.state.apply(result);
        self.publish();
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
