//! Poll scheduler — keeps the session in sync with the backend while a view is mounted.
//!
//! [`PollScheduler::activate`] returns the polling task together with a
//! [`ViewHandle`]. The caller spawns the task on its local executor and keeps
//! the handle for as long as the view lives. Dropping the handle aborts the
//! task (so no further tick can fire a fetch) and closes the session (so
//! requests that were already in flight resolve into no-ops).

use std::time::Duration;

use futures::FutureExt;
use futures::future::{AbortHandle, LocalBoxFuture, abortable};

use aini_domain::error::FetchError;
use aini_domain::status::StatusSnapshot;

use crate::ports::{StatusApi, Ticker};
use crate::services::status_client::{RefreshMode, StatusClient};
use crate::session::DashboardSession;

/// Period of the background refresh.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Future driving the initial load and the periodic refresh.
pub type PollTask = LocalBoxFuture<'static, ()>;

/// Application service scheduling status refreshes for one session.
pub struct PollScheduler<A> {
    client: StatusClient<A>,
    session: DashboardSession,
}

impl<A> Clone for PollScheduler<A> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            session: self.session.clone(),
        }
    }
}

impl<A: StatusApi + 'static> PollScheduler<A> {
    pub fn new(client: StatusClient<A>, session: DashboardSession) -> Self {
        Self { client, session }
    }

    #[must_use]
    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    /// Start polling for the view that owns this scheduler's session.
    ///
    /// The returned task performs a visible status fetch, then loads the settings
    /// snapshot once. In parallel it refreshes silently on every tick of `ticker`.
    /// A session supports a single activation: once its handle is dropped the
    /// session stays closed.
    pub fn activate<T: Ticker + 'static>(&self, mut ticker: T) -> (ViewHandle, PollTask) {
        let client = self.client.clone();
        let session = self.session.clone();

        let task = async move {
            let initial = async {
                let _ = client.refresh(&session, RefreshMode::Visible).await;
                let _ = client.load_settings(&session).await;
            };
            let periodic = async {
                loop {
                    ticker.tick().await;
                    if !session.is_open() {
                        break;
                    }
                    let _ = client.refresh(&session, RefreshMode::Silent).await;
                }
            };
            futures::join!(initial, periodic);
        };

        let (task, abort) = abortable(task);
        tracing::debug!("dashboard view activated");
        let handle = ViewHandle {
            abort,
            session: self.session.clone(),
        };
        (handle, task.map(|_| ()).boxed_local())
    }

    /// User-triggered refresh; always shows the loading indicator.
    ///
    /// Runs outside the polling task, so it is not cancelled by teardown;
    /// its result is discarded if the view is gone by the time it resolves.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after recording it in the session, or
    /// [`FetchError::ViewClosed`] once the view has been deactivated.
    pub async fn refresh_now(&self) -> Result<StatusSnapshot, FetchError> {
        self.client
            .refresh(&self.session, RefreshMode::Visible)
            .await
    }
}

/// Lifetime guard of a mounted dashboard view.
///
/// Dropping it stops polling and closes the session.
#[must_use = "dropping the handle deactivates the view immediately"]
#[derive(Debug)]
pub struct ViewHandle {
    abort: AbortHandle,
    session: DashboardSession,
}

impl ViewHandle {
    /// Whether polling is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.abort.is_aborted()
    }

    /// Explicitly deactivate the view. Equivalent to dropping the handle.
    pub fn deactivate(self) {}
}

impl Drop for ViewHandle {
    fn drop(&mut self) {
        self.abort.abort();
        self.session.close();
        tracing::debug!("dashboard view deactivated");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::testing::{FakeApi, ManualTicker, poll, settle};
    use aini_domain::server::ServerStatus;
    use aini_domain::settings::{SettingsResponse, SettingsSnapshot};
    use tokio::task::{LocalSet, spawn_local};

    fn make_scheduler() -> (FakeApi, PollScheduler<FakeApi>) {
        let api = FakeApi::default();
        let scheduler = PollScheduler::new(StatusClient::new(api.clone()), DashboardSession::new());
        (api, scheduler)
    }

    #[tokio::test]
    async fn should_load_status_with_spinner_then_settings_on_activation() {
        LocalSet::new()
            .run_until(async {
                let (api, scheduler) = make_scheduler();
                let release = api.defer_status();
                let mut env = SettingsSnapshot::default();
                env.env.insert("DEBUG".to_string(), "false".to_string());
                api.push_settings(Ok(SettingsResponse {
                    success: true,
                    settings: Some(env.clone()),
                }));
                let (_tick, ticker) = ManualTicker::new();

                let (_handle, task) = scheduler.activate(ticker);
                spawn_local(task);
                settle().await;
                assert!(scheduler.session().state().is_loading());

                release.send(Ok(poll("app-server", true, false))).unwrap();
                settle().await;

                let state = scheduler.session().state();
                assert!(!state.is_loading());
                assert_eq!(state.status.app.status, ServerStatus::Running);
                assert_eq!(state.settings, Some(env));
                assert_eq!(api.calls(), ["GET /api/status", "GET /api/settings"]);
            })
            .await;
    }

    #[tokio::test]
    async fn should_refresh_silently_on_each_tick() {
        LocalSet::new()
            .run_until(async {
                let (api, scheduler) = make_scheduler();
                let (tick, ticker) = ManualTicker::new();
                let (_handle, task) = scheduler.activate(ticker);
                spawn_local(task);
                settle().await;

                let seen = Rc::new(RefCell::new(Vec::new()));
                let sink = Rc::clone(&seen);
                scheduler
                    .session()
                    .on_change(move |state| sink.borrow_mut().push(state.is_loading()));

                api.push_status(Ok(poll("gpu-server", false, false)));
                tick.unbounded_send(()).unwrap();
                settle().await;

                let state = scheduler.session().state();
                assert!(state.status.gpu.is_running());
                assert!(!state.status.app.is_running());
                assert_eq!(*seen.borrow(), [false]);
                assert_eq!(
                    api.calls(),
                    ["GET /api/status", "GET /api/settings", "GET /api/status"]
                );
            })
            .await;
    }

    #[tokio::test]
    async fn should_not_fetch_after_deactivation() {
        LocalSet::new()
            .run_until(async {
                let (api, scheduler) = make_scheduler();
                let (tick, ticker) = ManualTicker::new();
                let (handle, task) = scheduler.activate(ticker);
                spawn_local(task);
                settle().await;
                let calls_before = api.calls().len();

                handle.deactivate();
                let _ = tick.unbounded_send(());
                settle().await;

                assert_eq!(api.calls().len(), calls_before);
                assert!(!scheduler.session().is_open());
            })
            .await;
    }

    #[tokio::test]
    async fn should_not_fetch_on_manual_refresh_after_deactivation() {
        LocalSet::new()
            .run_until(async {
                let (api, scheduler) = make_scheduler();
                let (_tick, ticker) = ManualTicker::new();
                let (handle, task) = scheduler.activate(ticker);
                spawn_local(task);
                settle().await;
                let calls_before = api.calls().len();

                handle.deactivate();
                let result = scheduler.refresh_now().await;

                assert_eq!(result, Err(FetchError::ViewClosed));
                assert_eq!(api.calls().len(), calls_before);
            })
            .await;
    }

    #[tokio::test]
    async fn should_ignore_response_resolving_after_teardown() {
        LocalSet::new()
            .run_until(async {
                let (api, scheduler) = make_scheduler();
                let (_tick, ticker) = ManualTicker::new();
                let (handle, task) = scheduler.activate(ticker);
                spawn_local(task);
                settle().await;

                let updates = Rc::new(RefCell::new(0_u32));
                let counter = Rc::clone(&updates);
                scheduler
                    .session()
                    .on_change(move |_| *counter.borrow_mut() += 1);

                let release = api.defer_status();
                let manual = scheduler.clone();
                let pending = spawn_local(async move { manual.refresh_now().await });
                settle().await;
                let before = scheduler.session().state();
                let updates_before = *updates.borrow();

                drop(handle);
                release
                    .send(Ok(poll("app-server, gpu-server", true, true)))
                    .unwrap();
                let result = pending.await.unwrap();

                assert_eq!(result, Err(FetchError::ViewClosed));
                assert_eq!(scheduler.session().state(), before);
                assert_eq!(*updates.borrow(), updates_before);
            })
            .await;
    }

    #[tokio::test]
    async fn should_keep_polling_after_a_failed_tick() {
        LocalSet::new()
            .run_until(async {
                let (api, scheduler) = make_scheduler();
                api.push_status(Ok(poll("app-server", true, true)));
                let (tick, ticker) = ManualTicker::new();
                let (_handle, task) = scheduler.activate(ticker);
                spawn_local(task);
                settle().await;

                api.push_status(Err(FetchError::Transport("timed out".to_string())));
                tick.unbounded_send(()).unwrap();
                settle().await;

                let state = scheduler.session().state();
                assert!(state.status.app.is_running());
                assert_eq!(state.last_error.as_deref(), Some("request failed: timed out"));

                api.push_status(Ok(poll("", false, false)));
                tick.unbounded_send(()).unwrap();
                settle().await;

                let state = scheduler.session().state();
                assert!(!state.status.app.is_running());
                assert!(state.last_error.is_none());
            })
            .await;
    }

    #[tokio::test]
    async fn should_let_last_resolved_refresh_win() {
        LocalSet::new()
            .run_until(async {
                let (api, scheduler) = make_scheduler();
                let (_tick, ticker) = ManualTicker::new();
                let (_handle, task) = scheduler.activate(ticker);
                spawn_local(task);
                settle().await;

                let first = api.defer_status();
                let second = api.defer_status();
                let a = scheduler.clone();
                let b = scheduler.clone();
                spawn_local(async move { a.refresh_now().await });
                spawn_local(async move { b.refresh_now().await });
                settle().await;
                assert!(scheduler.session().state().is_loading());

                second.send(Ok(poll("gpu-server", false, false))).unwrap();
                settle().await;
                assert!(scheduler.session().state().is_loading());

                first.send(Ok(poll("app-server", true, false))).unwrap();
                settle().await;

                let state = scheduler.session().state();
                assert!(!state.is_loading());
                assert!(state.status.app.is_running());
                assert!(!state.status.gpu.is_running());
            })
            .await;
    }

    #[test]
    fn should_poll_every_thirty_seconds() {
        assert_eq!(POLL_INTERVAL, Duration::from_millis(30_000));
    }
}
