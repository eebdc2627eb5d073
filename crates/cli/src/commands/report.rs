//! Report commands.

use std::fmt::Write as _;

use banking_console_admin::banking::BankingClient;
use banking_console_admin::views::{
    PageState,
    dashboard::{self, DashboardQuery},
    report,
};
use banking_console_core::{SortField, SortOrder};

use super::{CommandError, customer_table, emit};

fn ready<T>(state: PageState<T>) -> Result<T, CommandError> {
    match state {
        PageState::Ready(value) => Ok(value),
        PageState::Failed { message } => Err(CommandError::Failed(message)),
    }
}

/// Print dashboard counts and the sorted customer table.
///
/// # Errors
///
/// Returns an error if any of the dashboard fetches fails.
pub async fn dashboard(
    client: &BankingClient,
    sort_by: SortField,
    order: SortOrder,
) -> Result<(), CommandError> {
    let view = ready(dashboard::load(client, DashboardQuery { sort_by, order }).await)?;

    let mut out = String::new();
    let _ = writeln!(out, "Total customers:       {}", view.total_customers);
    let _ = writeln!(out, "Active customers:      {}", view.active_count);
    let _ = writeln!(out, "High-income customers: {}", view.high_income_count);
    out.push('\n');
    out.push_str(&customer_table(&view.rows));
    emit(&out);
    Ok(())
}

/// Print the high-income report.
///
/// # Errors
///
/// Returns an error if the high-income list cannot be fetched.
pub async fn high_income(client: &BankingClient) -> Result<(), CommandError> {
    let report = ready(report::load(client).await)?;

    let mut out = String::new();
    let _ = writeln!(out, "Customers:      {}", report.count);
    let _ = writeln!(out, "Total income:   {}", report.total_income.display());
    let _ = writeln!(out, "Average income: {}", report.average_display());
    out.push('\n');
    out.push_str(&customer_table(&report.customers));
    emit(&out);
    Ok(())
}
