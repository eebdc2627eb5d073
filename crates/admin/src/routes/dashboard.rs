//! Dashboard route handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;
use tracing::instrument;

use banking_console_core::{SortField, SortOrder, group_thousands};

use super::{SelectOption, customers::CustomerRowView, render};
use crate::{
    error::AppError,
    filters,
    middleware::auth::CurrentSession,
    models::SessionContext,
    state::AppState,
    views::{
        PageState,
        dashboard::{self, DashboardQuery},
    },
};

/// Segment counts shown as cards.
#[derive(Debug, Clone)]
pub struct DashboardMetrics {
    pub total_customers: String,
    pub active_count: String,
    pub high_income_count: String,
}

impl Default for DashboardMetrics {
    fn default() -> Self {
        Self {
            total_customers: "0".to_string(),
            active_count: "0".to_string(),
            high_income_count: "0".to_string(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub session: SessionContext,
    pub current_path: String,
    pub error: Option<String>,
    pub metrics: DashboardMetrics,
    pub rows: Vec<CustomerRowView>,
    pub sort_options: Vec<SelectOption>,
    pub order_options: Vec<SelectOption>,
}

/// Raw sort parameters; unknown values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

fn sort_options(selected: SortField) -> Vec<SelectOption> {
    SortField::ALL
        .into_iter()
        .map(|field| SelectOption {
            value: field.as_str(),
            label: field.label(),
            selected: field == selected,
        })
        .collect()
}

fn order_options(selected: SortOrder) -> Vec<SelectOption> {
    SortOrder::ALL
        .into_iter()
        .map(|order| SelectOption {
            value: order.as_str(),
            label: order.label(),
            selected: order == selected,
        })
        .collect()
}

/// Count as it appears on a card.
fn count(n: usize) -> String {
    group_thousands(u64::try_from(n).unwrap_or(u64::MAX))
}

/// Dashboard page handler.
#[instrument(skip(session, state))]
pub async fn index(
    CurrentSession(session): CurrentSession,
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Html<String>, AppError> {
    let query = DashboardQuery::parse(params.sort_by.as_deref(), params.order.as_deref());

    let (metrics, rows, error) = match dashboard::load(state.banking(), query).await {
        PageState::Ready(view) => (
            DashboardMetrics {
                total_customers: count(view.total_customers),
                active_count: count(view.active_count),
                high_income_count: count(view.high_income_count),
            },
            view.rows.iter().map(CustomerRowView::from).collect(),
            None,
        ),
        PageState::Failed { message } => (DashboardMetrics::default(), Vec::new(), Some(message)),
    };

    render(&DashboardTemplate {
        session,
        current_path: "/".to_string(),
        error,
        metrics,
        rows,
        sort_options: sort_options(query.sort_by),
        order_options: order_options(query.order),
    })
}
