//! Response body of `GET /health`.

use serde::Serialize;

/// Overall state reported to load balancers and probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: StoreCheck,
}

/// Result of pinging the link store.
///
/// Serialized as `{"status": "ok"}` or `{"status": "error", "message": "..."}`.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StoreCheck {
    Ok,
    Error { message: String },
}

impl HealthResponse {
    /// The service is healthy exactly when its store answers.
    pub fn from_store_check(store: StoreCheck) -> Self {
        let status = match store {
            StoreCheck::Ok => ServiceStatus::Healthy,
            StoreCheck::Error { .. } => ServiceStatus::Degraded,
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: HealthChecks { store },
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}
