//! Dashboard view-model: sorted customer table plus segment counts.

use tracing::instrument;

use banking_console_core::{SortField, SortOrder};

use super::join::all_or_nothing;
use super::state::PageState;
use crate::banking::{Customer, CustomerService};

/// Shown when any of the dashboard fetches fails without a server message.
pub const LOAD_FAILED: &str = "Failed to load dashboard data.";

/// Sort selection for the dashboard table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl DashboardQuery {
    /// Parse raw query values; anything unrecognised falls back to the default.
    #[must_use]
    pub fn parse(sort_by: Option<&str>, order: Option<&str>) -> Self {
        Self {
            sort_by: sort_by.and_then(|s| s.parse().ok()).unwrap_or_default(),
            order: order.and_then(|s| s.parse().ok()).unwrap_or_default(),
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub total_customers: usize,
    /// Length of the service's active list.
    pub active_count: usize,
    /// Length of the service's high-income list.
    pub high_income_count: usize,
    /// Sorted list, in the order the service returned it.
    pub rows: Vec<Customer>,
}

/// Fetch the sorted, active, and high-income lists concurrently.
///
/// Any single failure fails the whole dashboard; no partial counts are shown.
#[instrument(skip(service), fields(sort_by = %query.sort_by, order = %query.order))]
pub async fn load<S: CustomerService>(service: &S, query: DashboardQuery) -> PageState<DashboardView> {
    let result = all_or_nothing(
        service.list_sorted(query.sort_by, query.order),
        service.list_active(),
        service.list_high_income(),
    )
    .await
    .map(|(rows, active, high_income)| DashboardView {
        total_customers: rows.len(),
        active_count: active.len(),
        high_income_count: high_income.len(),
        rows,
    });

    PageState::from_result(result, LOAD_FAILED)
}
