//! Health check handlers

use axum::{extract::State, Json};
use core_kernel::HealthCheckResult;
use serde::Serialize;

use crate::{error::ApiError, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<HealthCheckResult>,
}

/// Liveness
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: None,
    })
}

/// Readiness, which requires a healthy record store
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let storage = state.billing.storage_health().await;
    if !storage.is_healthy() {
        return Err(ApiError::ServiceUnavailable(
            storage
                .message
                .unwrap_or_else(|| format!("{} is not healthy", storage.adapter_id)),
        ));
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: Some(storage),
    }))
}
