//! Scripted test doubles for the ports.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use futures::StreamExt;
use futures::channel::{mpsc, oneshot};

use aini_domain::action::{ActionResponse, ServerAction};
use aini_domain::error::FetchError;
use aini_domain::server::ServerKind;
use aini_domain::settings::{SettingsResponse, SettingsSnapshot};
use aini_domain::status::{PollResult, ServiceFlags};

use crate::ports::{StatusApi, Ticker};

pub(crate) fn poll(output: &str, consul: bool, s3: bool) -> PollResult {
    PollResult {
        success: true,
        output: output.to_string(),
        services: ServiceFlags { consul, s3 },
    }
}

/// A reply that is either known up front or released later by the test.
pub(crate) enum Reply<T> {
    Ready(Result<T, FetchError>),
    Deferred(oneshot::Receiver<Result<T, FetchError>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T, FetchError> {
        match self {
            Self::Ready(result) => result,
            Self::Deferred(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Transport("reply dropped".to_string()))),
        }
    }
}

pub(crate) type Release<T> = oneshot::Sender<Result<T, FetchError>>;

#[derive(Default)]
struct Script {
    statuses: VecDeque<Reply<PollResult>>,
    settings: VecDeque<Reply<SettingsResponse>>,
    actions: VecDeque<Reply<ActionResponse>>,
    calls: Vec<String>,
}

/// In-memory [`StatusApi`] that replays queued replies in order.
///
/// Empty queues answer with "no servers", empty settings and a successful action.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    script: Rc<RefCell<Script>>,
}

impl FakeApi {
    pub(crate) fn push_status(&self, result: Result<PollResult, FetchError>) {
        self.script
            .borrow_mut()
            .statuses
            .push_back(Reply::Ready(result));
    }

    pub(crate) fn defer_status(&self) -> Release<PollResult> {
        let (tx, rx) = oneshot::channel();
        self.script
            .borrow_mut()
            .statuses
            .push_back(Reply::Deferred(rx));
        tx
    }

    pub(crate) fn push_settings(&self, result: Result<SettingsResponse, FetchError>) {
        self.script
            .borrow_mut()
            .settings
            .push_back(Reply::Ready(result));
    }

    pub(crate) fn push_action(&self, result: Result<ActionResponse, FetchError>) {
        self.script
            .borrow_mut()
            .actions
            .push_back(Reply::Ready(result));
    }

    pub(crate) fn defer_action(&self) -> Release<ActionResponse> {
        let (tx, rx) = oneshot::channel();
        self.script
            .borrow_mut()
            .actions
            .push_back(Reply::Deferred(rx));
        tx
    }

    /// Requests issued so far, e.g. `GET /api/status`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.script.borrow().calls.clone()
    }

    fn record(&self, call: String) {
        self.script.borrow_mut().calls.push(call);
    }
}

impl StatusApi for FakeApi {
    fn fetch_status(&self) -> impl Future<Output = Result<PollResult, FetchError>> {
        self.record("GET /api/status".to_string());
        let reply = self
            .script
            .borrow_mut()
            .statuses
            .pop_front()
            .unwrap_or_else(|| Reply::Ready(Ok(poll("no servers", false, false))));
        reply.resolve()
    }

    fn fetch_settings(&self) -> impl Future<Output = Result<SettingsResponse, FetchError>> {
        self.record("GET /api/settings".to_string());
        let reply = self
            .script
            .borrow_mut()
            .settings
            .pop_front()
            .unwrap_or_else(|| {
                Reply::Ready(Ok(SettingsResponse {
                    success: true,
                    settings: Some(SettingsSnapshot::default()),
                }))
            });
        reply.resolve()
    }

    fn post_action(
        &self,
        server: ServerKind,
        action: ServerAction,
    ) -> impl Future<Output = Result<ActionResponse, FetchError>> {
        self.record(format!("POST {}", action.path(server)));
        let reply = self
            .script
            .borrow_mut()
            .actions
            .pop_front()
            .unwrap_or_else(|| {
                Reply::Ready(Ok(ActionResponse {
                    success: true,
                    output: None,
                }))
            });
        reply.resolve()
    }
}

/// Ticker driven by the test: every message sent on the paired sender is one tick.
pub(crate) struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

impl ManualTicker {
    pub(crate) fn new() -> (mpsc::UnboundedSender<()>, Self) {
        let (tx, rx) = mpsc::unbounded();
        (tx, Self { rx })
    }
}

impl Ticker for ManualTicker {
    async fn tick(&mut self) {
        if self.rx.next().await.is_none() {
            futures::future::pending::<()>().await;
        }
    }
}

/// Give spawned local tasks a chance to run to their next suspension point.
pub(crate) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
