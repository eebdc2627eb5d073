//! High-income report route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use super::{customers::CustomerRowView, render};
use crate::{
    error::AppError,
    filters,
    middleware::auth::CurrentSession,
    models::SessionContext,
    state::AppState,
    views::{PageState, report},
};

/// Report totals as displayed.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub count: String,
    pub total_income: String,
    pub average_income: String,
}

/// High-income report template.
#[derive(Template)]
#[template(path = "high_income.html")]
pub struct HighIncomeTemplate {
    pub session: SessionContext,
    pub current_path: String,
    pub error: Option<String>,
    pub summary: Option<ReportSummary>,
    pub rows: Vec<CustomerRowView>,
}

/// High-income report handler.
#[instrument(skip(session, state))]
pub async fn index(
    CurrentSession(session): CurrentSession,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let (summary, rows, error) = match report::load(state.banking()).await {
        PageState::Ready(report) => (
            Some(ReportSummary {
                count: report.count.to_string(),
                total_income: report.total_income.display(),
                average_income: report.average_display(),
            }),
            report.customers.iter().map(CustomerRowView::from).collect(),
            None,
        ),
        PageState::Failed { message } => (None, Vec::new(), Some(message)),
    };

    render(&HighIncomeTemplate {
        session,
        current_path: "/high-income".to_string(),
        error,
        summary,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{get, offline_router, send};

    #[tokio::test]
    async fn test_report_failure_fallback() {
        let (status, body) = send(offline_router(Some("Admin User")), get("/high-income")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Failed to load high-income customers."));
    }
}
