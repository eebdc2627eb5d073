//! Customer detail view-model and partial update flow.

use tracing::{info, instrument, warn};

use banking_console_core::CustomerId;

use super::forms::{FormErrors, UpdateForm};
use super::notice::{Notice, messages};
use super::state::{PageState, failure_message};
use crate::banking::{Customer, CustomerService};

pub const NOT_FOUND: &str = "Customer not found.";
pub const LOAD_FAILED: &str = "Failed to load customer.";

/// Everything the detail page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub id: CustomerId,
    pub customer: PageState<Customer>,
    /// The service reported no such customer.
    pub not_found: bool,
    pub form: UpdateForm,
    pub errors: FormErrors,
    pub notice: Option<Notice>,
}

impl DetailPage {
    fn new(id: CustomerId, (customer, not_found): (PageState<Customer>, bool)) -> Self {
        Self {
            id,
            customer,
            not_found,
            form: UpdateForm::default(),
            errors: FormErrors::default(),
            notice: None,
        }
    }
}

async fn fetch<S: CustomerService>(service: &S, id: CustomerId) -> (PageState<Customer>, bool) {
    match service.get_by_id(id).await {
        Err(e) if e.is_not_found() => (PageState::failed(NOT_FOUND), true),
        result => (PageState::from_result(result, LOAD_FAILED), false),
    }
}

#[instrument(skip(service), fields(customer_id = %id))]
pub async fn load<S: CustomerService>(service: &S, id: CustomerId) -> DetailPage {
    DetailPage::new(id, fetch(service, id).await)
}

/// Validate and send a partial update, then re-read the record.
#[instrument(skip(service, form), fields(customer_id = %id))]
pub async fn update<S: CustomerService>(
    service: &S,
    id: CustomerId,
    form: UpdateForm,
) -> DetailPage {
    let update = match form.to_update() {
        Ok(update) => update,
        Err(errors) => {
            return DetailPage {
                form,
                errors,
                ..DetailPage::new(id, fetch(service, id).await)
            };
        }
    };

    match service.update(id, &update).await {
        Ok(outcome) => {
            info!("Customer updated");
            let state = if outcome.invalidation.affects_customer(id) {
                fetch(service, id).await
            } else {
                (PageState::Ready(outcome.record), false)
            };
            DetailPage {
                notice: Some(Notice::success(messages::UPDATED)),
                ..DetailPage::new(id, state)
            }
        }
        Err(e) => {
            warn!(error = %e, "Customer update failed");
            DetailPage {
                form,
                notice: Some(Notice::failure(failure_message(&e, messages::UPDATE_FAILED))),
                ..DetailPage::new(id, fetch(service, id).await)
            }
        }
    }
}
