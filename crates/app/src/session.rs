//! Per-view state container.
//!
//! A [`DashboardSession`] is created when the dashboard view mounts and closed
//! when it unmounts (see [`ViewHandle`](crate::services::poll_scheduler::ViewHandle)).
//! All writes go through [`DashboardSession::update`], which turns into a no-op
//! once the session is closed. Requests that resolve after teardown therefore
//! cannot touch the state of a view that no longer exists.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use aini_domain::action::ServerAction;
use aini_domain::server::ServerKind;
use aini_domain::settings::SettingsSnapshot;
use aini_domain::status::StatusSnapshot;
use aini_domain::time::Timestamp;

/// The start/stop command currently awaiting a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub server: ServerKind,
    pub action: ServerAction,
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// Derived server and service state from the latest successful poll.
    pub status: StatusSnapshot,
    /// Settings snapshot, once loaded.
    pub settings: Option<SettingsSnapshot>,
    /// Message of the most recent failure, cleared by the next successful poll.
    pub last_error: Option<String>,
    /// When the status was last refreshed successfully.
    pub last_updated: Option<Timestamp>,
    /// The action in flight, if any. Action triggers are disabled while set.
    pub pending_action: Option<PendingAction>,
    visible_loads: u32,
}

impl DashboardState {
    /// Whether a loading indicator should be shown: a visible refresh or an
    /// action is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_refreshing() || self.pending_action.is_some()
    }

    /// Whether a visible status refresh is in flight. Background polls and
    /// actions do not count, so a manual refresh stays available during them.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.visible_loads > 0
    }

    /// Whether start/stop buttons accept clicks.
    #[must_use]
    pub fn actions_enabled(&self) -> bool {
        self.pending_action.is_none()
    }

    pub(crate) fn begin_load(&mut self) {
        self.visible_loads += 1;
    }

    pub(crate) fn end_load(&mut self) {
        self.visible_loads = self.visible_loads.saturating_sub(1);
    }

    pub(crate) fn apply_status(&mut self, status: StatusSnapshot, at: Timestamp) {
        self.status = status;
        self.last_updated = Some(at);
        self.last_error = None;
    }

    pub(crate) fn record_error(&mut self, err: &impl fmt::Display) {
        self.last_error = Some(err.to_string());
    }
}

type Observer = Rc<dyn Fn(&DashboardState)>;

#[derive(Default)]
struct Inner {
    state: RefCell<DashboardState>,
    closed: Cell<bool>,
    observer: RefCell<Option<Observer>>,
}

/// Shared handle to the state of one dashboard view.
///
/// Cloning is cheap; all clones refer to the same state.
#[derive(Clone, Default)]
pub struct DashboardSession {
    inner: Rc<Inner>,
}

impl DashboardSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the current state.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    /// Whether the view owning this session is still mounted.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.inner.closed.get()
    }

    /// Register the callback invoked after every state change.
    ///
    /// Replaces any previous observer. The callback receives the state after
    /// the change and may read the session again, but must not update it.
    pub fn on_change(&self, observer: impl Fn(&DashboardState) + 'static) {
        *self.inner.observer.borrow_mut() = Some(Rc::new(observer));
    }

    /// Apply `f` to the state and notify the observer.
    ///
    /// Returns `None` without running `f` when the session is closed.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> Option<R> {
        if self.inner.closed.get() {
            tracing::trace!("dropping state update for closed dashboard session");
            return None;
        }
        let (result, snapshot) = {
            let mut state = self.inner.state.borrow_mut();
            let result = f(&mut state);
            (result, state.clone())
        };
        let observer = self.inner.observer.borrow().clone();
        if let Some(observer) = observer {
            observer(&snapshot);
        }
        Some(result)
    }

    /// Close the session. Later updates are discarded and the observer is released.
    pub(crate) fn close(&self) {
        self.inner.closed.set(true);
        self.inner.observer.borrow_mut().take();
    }
}

impl fmt::Debug for DashboardSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardSession")
            .field("state", &self.inner.state.borrow())
            .field("closed", &self.inner.closed.get())
            .finish_non_exhaustive()
    }
}
