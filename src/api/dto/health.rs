//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// Health status for each store.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub link_store: CheckStatus,
    pub ranking_store: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn from_check(healthy: bool, component: &str) -> Self {
        if healthy {
            Self {
                status: "ok",
                message: None,
            }
        } else {
            Self {
                status: "error",
                message: Some(format!("{} is unreachable", component)),
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
