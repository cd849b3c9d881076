//! Status endpoint payload and the state derived from it.

use serde::{Deserialize, Serialize};

use crate::server::{ServerKind, ServerState};
use crate::service::{ServiceAvailability, ServiceKind};

/// Raw body of `GET /api/status`.
///
/// `output` is the unstructured stdout of the backend's status command.
/// Fields default so that a bare `{"success": false}` still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResult {
    pub success: bool,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub services: ServiceFlags,
}

/// Per-service booleans reported by the backend.
///
/// The backend may send `null` (or an empty string) instead of `false` when a
/// check short-circuits, so both are read as "unavailable".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlags {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub consul: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub s3: bool,
}

impl ServiceFlags {
    #[must_use]
    pub fn get(&self, kind: ServiceKind) -> bool {
        match kind {
            ServiceKind::Consul => self.consul,
            ServiceKind::S3 => self.s3,
        }
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(text)) => !text.is_empty(),
        None => false,
    })
}

/// Everything the dashboard shows about servers and services, taken from one response.
///
/// Always replaced as a whole so the view never mixes two different responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub app: ServerState,
    pub gpu: ServerState,
    pub consul: ServiceAvailability,
    pub s3: ServiceAvailability,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            app: ServerState::stopped(ServerKind::App),
            gpu: ServerState::stopped(ServerKind::Gpu),
            consul: ServiceAvailability::unavailable(ServiceKind::Consul),
            s3: ServiceAvailability::unavailable(ServiceKind::S3),
        }
    }
}

impl StatusSnapshot {
    /// Derive server and service state from a decoded status response.
    #[must_use]
    pub fn derive(result: &PollResult) -> Self {
        let service = |name| ServiceAvailability {
            name,
            available: result.services.get(name),
        };
        Self {
            app: ServerState::from_output(ServerKind::App, &result.output),
            gpu: ServerState::from_output(ServerKind::Gpu, &result.output),
            consul: service(ServiceKind::Consul),
            s3: service(ServiceKind::S3),
        }
    }

    #[must_use]
    pub fn server(&self, kind: ServerKind) -> &ServerState {
        match kind {
            ServerKind::App => &self.app,
            ServerKind::Gpu => &self.gpu,
        }
    }

    #[must_use]
    pub fn service(&self, kind: ServiceKind) -> &ServiceAvailability {
        match kind {
            ServiceKind::Consul => &self.consul,
            ServiceKind::S3 => &self.s3,
        }
    }
}
