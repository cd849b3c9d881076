//! External dependency services whose availability the dashboard reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two services the backend checks on every status call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Consul,
    S3,
}

impl ServiceKind {
    pub const ALL: [Self; 2] = [Self::Consul, Self::S3];

    /// Human-readable name used in the dashboard.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Consul => "Consul",
            Self::S3 => "S3 Storage",
        }
    }

    /// Label shown for the given availability.
    ///
    /// S3 is optional on the backend, so "unavailable" means it was never configured.
    #[must_use]
    pub fn availability_label(self, available: bool) -> &'static str {
        match (self, available) {
            (_, true) => "Connected",
            (Self::Consul, false) => "Disconnected",
            (Self::S3, false) => "Not Configured",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consul => f.write_str("consul"),
            Self::S3 => f.write_str("s3"),
        }
    }
}

/// Availability of one service, copied from the latest status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAvailability {
    pub name: ServiceKind,
    pub available: bool,
}

impl ServiceAvailability {
    #[must_use]
    pub fn unavailable(name: ServiceKind) -> Self {
        Self {
            name,
            available: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.name.availability_label(self.available)
    }
}
