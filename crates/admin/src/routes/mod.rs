//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness (customer service reachable)
//!
//! # Dashboard
//! GET  /                            - Sorted customer table and segment counts
//!
//! # Customers
//! GET  /customers                   - Management page (?form=simple|full)
//! POST /customers/simple            - Simple registration
//! POST /customers/full              - Full registration
//! GET  /customers/{id}              - Customer detail and edit form
//! POST /customers/{id}              - Partial update
//! POST /customers/{id}/deactivate   - Deactivate
//!
//! # Reports
//! GET  /high-income                 - High-income customer report
//! ```

pub mod customers;
pub mod dashboard;
pub mod health;
pub mod high_income;

use askama::Template;
use axum::{
    Router,
    http::Uri,
    response::Html,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::state::AppState;

/// Build the console router with request tracing.
///
/// Sentry layers are added by the binary.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/", get(dashboard::index))
        .route("/customers", get(customers::index))
        .route("/customers/simple", post(customers::create_simple))
        .route("/customers/full", post(customers::create_full))
        .route(
            "/customers/{id}",
            get(customers::show).post(customers::update),
        )
        .route("/customers/{id}/deactivate", post(customers::deactivate))
        .route("/high-income", get(high_income::index))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Render a template into an HTML response.
pub(crate) fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

/// One `<option>` of a select box.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}
