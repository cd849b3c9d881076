//! Managed servers and their derived running state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label shown under a running server.
pub const CONNECTED_LABEL: &str = "Connected";

/// One of the two servers the dashboard can start and stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerKind {
    App,
    Gpu,
}

impl ServerKind {
    /// Every managed server, in display order.
    pub const ALL: [Self; 2] = [Self::App, Self::Gpu];

    /// Path segment and wire name (`app`, `gpu`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Gpu => "gpu",
        }
    }

    /// Token whose presence in the status output marks this server as running.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::App => "app-server",
            Self::Gpu => "gpu-server",
        }
    }
}

impl fmt::Display for ServerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown server name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown server `{0}` (expected `app` or `gpu`)")]
pub struct UnknownServer(pub String);

impl FromStr for ServerKind {
    type Err = UnknownServer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(Self::App),
            "gpu" => Ok(Self::Gpu),
            other => Err(UnknownServer(other.to_string())),
        }
    }
}

/// Whether a server process is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Running,
    #[default]
    Stopped,
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("running"),
            Self::Stopped => f.write_str("stopped"),
        }
    }
}

/// Derived state of one server, rebuilt from every status response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerState {
    pub name: ServerKind,
    pub status: ServerStatus,
    pub connection_label: Option<String>,
}

impl ServerState {
    /// State shown before the first successful poll.
    #[must_use]
    pub fn stopped(name: ServerKind) -> Self {
        Self {
            name,
            status: ServerStatus::Stopped,
            connection_label: None,
        }
    }

    /// Derive the state of `name` from the raw status output.
    ///
    /// The server counts as running when the output contains its marker
    /// (`app-server`, `gpu-server`) anywhere, including inside a longer token.
    /// The backend's log format relies on plain substring containment.
    #[must_use]
    pub fn from_output(name: ServerKind, output: &str) -> Self {
        if output.contains(name.marker()) {
            Self {
                name,
                status: ServerStatus::Running,
                connection_label: Some(CONNECTED_LABEL.to_string()),
            }
        } else {
            Self::stopped(name)
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == ServerStatus::Running
    }
}
