//! High-income report: the service's high-income list plus its totals.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::instrument;

use banking_console_core::Income;

use super::state::PageState;
use crate::banking::{Customer, CustomerService};

pub const LOAD_FAILED: &str = "Failed to load high-income customers.";

/// Summary computed over the already-filtered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighIncomeReport {
    pub customers: Vec<Customer>,
    pub count: usize,
    pub total_income: Income,
    /// `total_income / count`, or zero for an empty list.
    pub average_income: Decimal,
}

impl HighIncomeReport {
    #[must_use]
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        let count = customers.len();
        let total_income: Income = customers.iter().map(Customer::income_or_zero).sum();
        let average_income = if count == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(total_income.amount()) / Decimal::from(count)
        };

        Self {
            customers,
            count,
            total_income,
            average_income,
        }
    }

    /// Average rounded to a whole amount, formatted like other incomes.
    #[must_use]
    pub fn average_display(&self) -> String {
        let rounded = self
            .average_income
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Income::new(rounded.to_u64().unwrap_or_default()).display()
    }
}

#[instrument(skip(service))]
pub async fn load<S: CustomerService>(service: &S) -> PageState<HighIncomeReport> {
    let result = service
        .list_high_income()
        .await
        .map(HighIncomeReport::from_customers);

    PageState::from_result(result, LOAD_FAILED)
}
