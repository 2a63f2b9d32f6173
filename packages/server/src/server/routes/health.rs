use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::kernel::ServerDeps;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    provider_configured: bool,
}

/// Health check endpoint
///
/// The process is healthy whenever it is serving. A missing provider
/// configuration is reported but does not fail the check: verification
/// requests fail closed on their own.
pub async fn health_handler(
    Extension(deps): Extension<ServerDeps>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            provider_configured: deps.provider_configured(),
        }),
    )
}
