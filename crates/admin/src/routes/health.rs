//! Health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::banking::CustomerService;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable unless the customer service answers
/// the active-customer query.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.banking().list_active().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Customer service not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
