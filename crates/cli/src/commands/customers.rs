//! Customer commands.

use std::fmt::Write as _;

use banking_console_admin::banking::{BankingClient, CustomerService};
use banking_console_admin::views::{PageState, detail, management};
use banking_console_core::{CustomerId, SortField, SortOrder};

use super::{CommandError, customer_table, emit};

/// List customers in the order the service sorts them.
///
/// # Errors
///
/// Returns an error if the customer service call fails.
pub async fn list(
    client: &BankingClient,
    sort_by: SortField,
    order: SortOrder,
) -> Result<(), CommandError> {
    tracing::info!("Listing customers by {} {}", sort_by, order);
    let customers = client.list_sorted(sort_by, order).await?;
    emit(&customer_table(&customers));
    Ok(())
}

/// Show one customer.
///
/// # Errors
///
/// Returns an error if the customer does not exist or cannot be loaded.
pub async fn show(client: &BankingClient, id: CustomerId) -> Result<(), CommandError> {
    let page = detail::load(client, id).await;

    let customer = match page.customer {
        PageState::Ready(customer) => customer,
        PageState::Failed { message } => return Err(CommandError::Failed(message)),
    };

    let mut out = String::new();
    let _ = writeln!(out, "ID:        {}", customer.id);
    let _ = writeln!(out, "Name:      {}", customer.name);
    let _ = writeln!(out, "Email:     {}", customer.email);
    if let Some(phone) = &customer.phone_number {
        let _ = writeln!(out, "Phone:     {}", phone.as_str());
    }
    let _ = writeln!(out, "Address:   {}", customer.address);
    let _ = writeln!(out, "Location:  {}", customer.location());
    let _ = writeln!(out, "Income:    {}", customer.income_or_zero().display());
    if let Some(age) = customer.age {
        let _ = writeln!(out, "Age:       {age}");
    }
    let _ = writeln!(out, "Status:    {}", customer.status().label());
    emit(&out);
    Ok(())
}

/// Deactivate a customer; an already-inactive customer is left alone.
///
/// # Errors
///
/// Returns an error if the deactivation fails.
pub async fn deactivate(client: &BankingClient, id: CustomerId) -> Result<(), CommandError> {
    tracing::info!("Deactivating customer {}", id);
    let page = management::deactivate(client, id).await;

    match page.notice {
        Some(notice) if notice.is_success() => {
            emit(&format!("{}\n", notice.message));
            Ok(())
        }
        Some(notice) => Err(CommandError::Failed(notice.message)),
        None => Err(CommandError::Failed(
            "Deactivation finished without a result".to_string(),
        )),
    }
}
