//! Plain-text rendering of the dashboard state.

use std::fmt::Write as _;

use aini_app::session::DashboardState;
use aini_domain::action::ServerAction;
use aini_domain::server::ServerKind;
use aini_domain::service::ServiceKind;
use aini_domain::settings::{STATIC_ENDPOINTS, SettingsSnapshot};
use aini_domain::time::clock_label;

/// The parts of the state a terminal reader cares about.
///
/// Loading toggles are left out so background polls that change nothing print nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(String);

impl Frame {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Render server cards, service badges, and the last error.
#[must_use]
pub fn dashboard(state: &DashboardState) -> Frame {
    let mut out = String::new();
    let updated = state
        .last_updated
        .map_or_else(|| "never".to_string(), clock_label);
    let _ = writeln!(out, "AINI Dashboard (last updated: {updated})");

    for kind in ServerKind::ALL {
        let server = state.status.server(kind);
        let label = server.connection_label.as_deref().unwrap_or("Not running");
        let pending = match state.pending_action {
            Some(p) if p.server == kind => match p.action {
                ServerAction::Start => "  [starting…]",
                ServerAction::Stop => "  [stopping…]",
            },
            _ => "",
        };
        let _ = writeln!(
            out,
            "  {:<12} {:<8} {label}{pending}",
            format!("{} Server", kind.as_str().to_uppercase()),
            server.status.to_string(),
        );
    }

    for kind in ServiceKind::ALL {
        let service = state.status.service(kind);
        let _ = writeln!(out, "  {:<12} {}", kind.title(), service.label());
    }

    if let Some(err) = &state.last_error {
        let _ = writeln!(out, "  Error: {err}");
    }
    Frame(out)
}

/// Render the settings viewer; secrets are masked unless `reveal` is set.
#[must_use]
pub fn settings(settings: &SettingsSnapshot, reveal: bool) -> String {
    let mut out = String::from("Environment Variables\n");
    for entry in settings.entries() {
        let _ = writeln!(out, "  {:<20} {}", entry.key, entry.display_value(reveal));
    }

    out.push_str("Service Configuration\n");
    for endpoint in STATIC_ENDPOINTS {
        let _ = writeln!(out, "  {:<20} {}", endpoint.label, endpoint.value);
    }
    for (name, endpoint) in &settings.services {
        let connected = if endpoint.connected {
            "connected"
        } else {
            "disconnected"
        };
        let _ = writeln!(out, "  {name:<20} {} ({connected})", endpoint.url);
    }
    out
}
