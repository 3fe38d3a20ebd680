//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use core_kernel::HealthCheckResult;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adapters: Vec<HealthCheckResult>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        adapters: Vec::new(),
    })
}

/// Readiness check over every storage adapter
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let ports = &state.ports;
    let adapters = vec![
        ports.clients.health_check().await,
        ports.categories.health_check().await,
        ports.products.health_check().await,
        ports.invoices.health_check().await,
        ports.users.health_check().await,
    ];

    let ready = adapters.iter().all(HealthCheckResult::is_operational);
    let (status, label) = if ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            adapters,
        }),
    )
}
