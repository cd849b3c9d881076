//! Read-only settings snapshot shown in the settings viewer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder rendered instead of a hidden secret value.
pub const SECRET_MASK: &str = "••••••••";

/// Endpoints the dashboard always lists, regardless of what the backend reports.
pub const STATIC_ENDPOINTS: [EndpointDescriptor; 2] = [
    EndpointDescriptor {
        label: "Consul URL",
        value: "http://consul:8500",
        link: true,
    },
    EndpointDescriptor {
        label: "API Port",
        value: "3000",
        link: false,
    },
];

/// A fixed label/value row in the "Service Configuration" section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub label: &'static str,
    pub value: &'static str,
    /// Whether `value` is a URL worth rendering as a link.
    pub link: bool,
}

/// Body of `GET /api/settings`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub success: bool,
    #[serde(default)]
    pub settings: Option<SettingsSnapshot>,
}

/// Backend environment and service endpoints, fetched once per view session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceEndpoint>,
}

/// A backend-reported service endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub url: String,
}

/// One environment variable as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub secret: bool,
}

impl EnvEntry<'_> {
    /// Value to render, masked unless the secret has been revealed.
    #[must_use]
    pub fn display_value(&self, revealed: bool) -> &str {
        if self.secret && !revealed {
            SECRET_MASK
        } else {
            self.value
        }
    }
}

/// Whether an environment variable holds a credential.
#[must_use]
pub fn is_secret_key(key: &str) -> bool {
    key.contains("KEY") || key.contains("TOKEN")
}

impl SettingsSnapshot {
    /// Environment variables in key order, flagged when secret.
    pub fn entries(&self) -> impl Iterator<Item = EnvEntry<'_>> {
        self.env.iter().map(|(key, value)| EnvEntry {
            key,
            value,
            secret: is_secret_key(key),
        })
    }
}
