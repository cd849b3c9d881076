//! Status client — fetches backend status and derives dashboard state from it.

use std::rc::Rc;

use aini_domain::action::ServerAction;
use aini_domain::error::FetchError;
use aini_domain::server::ServerKind;
use aini_domain::settings::SettingsSnapshot;
use aini_domain::status::{PollResult, StatusSnapshot};
use aini_domain::time;

use crate::ports::StatusApi;
use crate::ports::status_api::{SETTINGS_PATH, STATUS_PATH};
use crate::session::{DashboardSession, DashboardState};

/// Whether a refresh shows the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Initial load and user-triggered refreshes.
    Visible,
    /// Background polling; avoids flicker.
    Silent,
}

/// Application service wrapping a [`StatusApi`].
pub struct StatusClient<A> {
    api: Rc<A>,
}

impl<A> Clone for StatusClient<A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
        }
    }
}

impl<A: StatusApi> StatusClient<A> {
    /// Create a new client backed by the given API adapter.
    pub fn new(api: A) -> Self {
        Self { api: Rc::new(api) }
    }

    /// Fetch the raw status.
    ///
    /// # Errors
    ///
    /// Returns the adapter's transport/decode error, or
    /// [`FetchError::Application`] when the body carries `success: false`.
    pub async fn fetch_status(&self) -> Result<PollResult, FetchError> {
        let result = self.api.fetch_status().await?;
        if !result.success {
            return Err(FetchError::rejected(STATUS_PATH));
        }
        Ok(result)
    }

    /// Fetch the settings snapshot.
    ///
    /// # Errors
    ///
    /// Same contract as [`fetch_status`](Self::fetch_status).
    pub async fn fetch_settings(&self) -> Result<SettingsSnapshot, FetchError> {
        let response = self.api.fetch_settings().await?;
        if !response.success {
            return Err(FetchError::rejected(SETTINGS_PATH));
        }
        Ok(response.settings.unwrap_or_default())
    }

    /// Send a start/stop command.
    ///
    /// # Errors
    ///
    /// Returns the adapter's transport/decode error, or
    /// [`FetchError::Application`] when the backend answers `success: false`.
    pub async fn send_action(
        &self,
        server: ServerKind,
        action: ServerAction,
    ) -> Result<(), FetchError> {
        let response = self.api.post_action(server, action).await?;
        if !response.success {
            return Err(FetchError::rejected(&action.path(server)));
        }
        Ok(())
    }

    /// Fetch the status and replace the session's derived state with it.
    ///
    /// On failure the previous state is kept and the error message is recorded.
    /// Overlapping refreshes are not ordered: whichever resolves last wins.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after recording it in the session, or
    /// [`FetchError::ViewClosed`] when the session is closed before the request
    /// is sent or before its response could be applied.
    #[tracing::instrument(skip(self, session))]
    pub async fn refresh(
        &self,
        session: &DashboardSession,
        mode: RefreshMode,
    ) -> Result<StatusSnapshot, FetchError> {
        if !session.is_open() {
            return Err(FetchError::ViewClosed);
        }
        let visible = mode == RefreshMode::Visible;
        if visible {
            session.update(DashboardState::begin_load);
        }

        let outcome = self
            .fetch_status()
            .await
            .map(|result| StatusSnapshot::derive(&result));

        let applied = session.update(|state| {
            match &outcome {
                Ok(snapshot) => state.apply_status(snapshot.clone(), time::now()),
                Err(err) => state.record_error(err),
            }
            if visible {
                state.end_load();
            }
        });
        if applied.is_none() {
            tracing::debug!("view closed during refresh, response discarded");
            return Err(FetchError::ViewClosed);
        }

        match &outcome {
            Ok(snapshot) => tracing::debug!(
                app = %snapshot.app.status,
                gpu = %snapshot.gpu.status,
                consul = snapshot.consul.available,
                s3 = snapshot.s3.available,
                "status refreshed"
            ),
            Err(err) => tracing::warn!(%err, "status refresh failed"),
        }
        outcome
    }

    /// Fetch the settings snapshot into the session.
    ///
    /// # Errors
    ///
    /// Returns the fetch error after recording it in the session, or
    /// [`FetchError::ViewClosed`] when the session is closed.
    #[tracing::instrument(skip(self, session))]
    pub async fn load_settings(&self, session: &DashboardSession) -> Result<(), FetchError> {
        if !session.is_open() {
            return Err(FetchError::ViewClosed);
        }
        match self.fetch_settings().await {
            Ok(settings) => session
                .update(|state| state.settings = Some(settings))
                .ok_or(FetchError::ViewClosed),
            Err(err) => {
                tracing::warn!(%err, "failed to load settings");
                session.update(|state| state.record_error(&err));
                Err(err)
            }
        }
    }
}
