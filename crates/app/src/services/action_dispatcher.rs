//! Action dispatcher — starts and stops servers, then re-derives state from the backend.

use aini_domain::action::ServerAction;
use aini_domain::error::ActionError;
use aini_domain::server::ServerKind;

use crate::ports::StatusApi;
use crate::services::status_client::{RefreshMode, StatusClient};
use crate::session::{DashboardSession, PendingAction};

/// Application service for start/stop commands.
pub struct ActionDispatcher<A> {
    client: StatusClient<A>,
    session: DashboardSession,
}

impl<A> Clone for ActionDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            session: self.session.clone(),
        }
    }
}

impl<A: StatusApi> ActionDispatcher<A> {
    pub fn new(client: StatusClient<A>, session: DashboardSession) -> Self {
        Self { client, session }
    }

    /// Send `action` for `server`.
    ///
    /// Only one action runs at a time; the loading indicator stays on until it
    /// completes. On success the status is fetched again instead of assuming the
    /// outcome, since the backend may not have done what was asked. On failure the
    /// message is recorded and the derived state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Busy`] if another action is pending,
    /// [`ActionError::ViewClosed`] if the view was torn down, or
    /// [`ActionError::Request`] if the command failed.
    #[tracing::instrument(skip(self))]
    pub async fn perform_action(
        &self,
        server: ServerKind,
        action: ServerAction,
    ) -> Result<(), ActionError> {
        self.session
            .update(|state| match state.pending_action {
                Some(pending) => Err(ActionError::Busy {
                    server,
                    action,
                    pending_server: pending.server,
                    pending: pending.action,
                }),
                None => {
                    state.pending_action = Some(PendingAction { server, action });
                    Ok(())
                }
            })
            .ok_or(ActionError::ViewClosed)??;

        let outcome = self
            .client
            .send_action(server, action)
            .await
            .map_err(|source| ActionError::Request {
                server,
                action,
                source,
            });

        if outcome.is_ok() {
            tracing::info!("action accepted, resynchronizing status");
            let _ = self.client.refresh(&self.session, RefreshMode::Silent).await;
        }

        self.session.update(|state| {
            state.pending_action = None;
            if let Err(err) = &outcome {
                state.record_error(err);
            }
        });

        if let Err(err) = &outcome {
            tracing::warn!(%err, "action failed");
        }
        outcome
    }
}
