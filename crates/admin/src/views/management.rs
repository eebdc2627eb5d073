//! Customer management view-model: the full list, registration form, and
//! the create/deactivate flows.
//!
//! Mutations never edit the local list. Each successful call hands back an
//! [`Invalidation`], and the list is fetched again before the page renders.

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use banking_console_core::CustomerId;

use super::forms::{FormErrors, RegistrationForm, RegistrationMode};
use super::notice::{Notice, messages};
use super::state::{PageState, failure_message};
use crate::banking::{Customer, CustomerService, Invalidation};

pub const LOAD_FAILED: &str = "Failed to load customers.";

/// State of the registration panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPanel {
    pub visible: bool,
    pub mode: RegistrationMode,
    /// Values as typed, kept after a rejected submission.
    pub values: RegistrationForm,
    pub errors: FormErrors,
}

impl FormPanel {
    /// Closed panel.
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Empty panel open in `mode`.
    #[must_use]
    pub fn open(mode: RegistrationMode) -> Self {
        Self {
            visible: true,
            mode,
            ..Self::default()
        }
    }

    fn resubmit(mode: RegistrationMode, values: RegistrationForm, errors: FormErrors) -> Self {
        Self {
            visible: true,
            mode,
            values,
            errors,
        }
    }
}

/// Everything the management page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementPage {
    pub customers: PageState<Vec<Customer>>,
    pub form: FormPanel,
    pub notice: Option<Notice>,
}

/// Fetch the plain, unsorted list of every customer.
pub async fn load_customers<S: CustomerService>(service: &S) -> PageState<Vec<Customer>> {
    PageState::from_result(service.list_all().await, LOAD_FAILED)
}

/// Render the page with the given panel and no notice.
#[instrument(skip(service, form))]
pub async fn load<S: CustomerService>(service: &S, form: FormPanel) -> ManagementPage {
    ManagementPage {
        customers: load_customers(service).await,
        form,
        notice: None,
    }
}

/// Re-fetch what a mutation invalidated.
async fn refresh<S: CustomerService>(
    service: &S,
    invalidation: Invalidation,
) -> PageState<Vec<Customer>> {
    debug!(?invalidation, "Re-fetching after mutation");
    load_customers(service).await
}

/// Submit a simple registration; an empty date becomes `today`.
#[instrument(skip(service, values))]
pub async fn register_simple<S: CustomerService>(
    service: &S,
    values: RegistrationForm,
    today: NaiveDate,
) -> ManagementPage {
    let registration = match values.to_simple(today) {
        Ok(registration) => registration,
        Err(errors) => return rejected(service, RegistrationMode::Simple, values, errors).await,
    };

    match service.create_simple(&registration).await {
        Ok(outcome) => {
            info!(customer_id = %outcome.record.id, "Customer registered (simple)");
            created(service, outcome.invalidation).await
        }
        Err(e) => {
            warn!(error = %e, "Simple registration failed");
            let notice = Notice::failure(failure_message(&e, messages::CREATE_FAILED));
            create_failed(service, RegistrationMode::Simple, values, notice).await
        }
    }
}

/// Submit a full registration; the service enforces the minimum age.
#[instrument(skip(service, values))]
pub async fn register_full<S: CustomerService>(
    service: &S,
    values: RegistrationForm,
) -> ManagementPage {
    let registration = match values.to_full() {
        Ok(registration) => registration,
        Err(errors) => return rejected(service, RegistrationMode::Full, values, errors).await,
    };

    match service.create_full(&registration).await {
        Ok(outcome) => {
            info!(customer_id = %outcome.record.id, "Customer registered (full)");
            created(service, outcome.invalidation).await
        }
        Err(e) => {
            warn!(error = %e, "Full registration failed");
            let notice = Notice::failure(failure_message(&e, messages::CREATE_FULL_FAILED));
            create_failed(service, RegistrationMode::Full, values, notice).await
        }
    }
}

/// Deactivate a customer.
///
/// The current record is read first; an already-inactive customer is left
/// alone and no deactivation request is sent.
#[instrument(skip(service), fields(customer_id = %id))]
pub async fn deactivate<S: CustomerService>(service: &S, id: CustomerId) -> ManagementPage {
    let notice = match service.get_by_id(id).await {
        Ok(customer) if !customer.active => {
            debug!("Customer already inactive, skipping request");
            let customers = load_customers(service).await;
            return page(customers, Notice::success(messages::ALREADY_INACTIVE));
        }
        Ok(_) => match service.deactivate(id).await {
            Ok(outcome) => {
                info!("Customer deactivated");
                let customers = refresh(service, outcome.invalidation).await;
                return page(customers, Notice::success(messages::DEACTIVATED));
            }
            Err(e) => {
                warn!(error = %e, "Deactivation failed");
                Notice::failure(messages::DEACTIVATE_FAILED)
            }
        },
        Err(e) => {
            warn!(error = %e, "Could not read customer before deactivation");
            Notice::failure(messages::DEACTIVATE_FAILED)
        }
    };

    page(load_customers(service).await, notice)
}

fn page(customers: PageState<Vec<Customer>>, notice: Notice) -> ManagementPage {
    ManagementPage {
        customers,
        form: FormPanel::hidden(),
        notice: Some(notice),
    }
}

async fn created<S: CustomerService>(service: &S, invalidation: Invalidation) -> ManagementPage {
    let customers = refresh(service, invalidation).await;
    page(customers, Notice::success(messages::CREATED))
}

async fn rejected<S: CustomerService>(
    service: &S,
    mode: RegistrationMode,
    values: RegistrationForm,
    errors: FormErrors,
) -> ManagementPage {
    debug!(errors = errors.len(), "Registration form rejected");
    ManagementPage {
        customers: load_customers(service).await,
        form: FormPanel::resubmit(mode, values, errors),
        notice: None,
    }
}

async fn create_failed<S: CustomerService>(
    service: &S,
    mode: RegistrationMode,
    values: RegistrationForm,
    notice: Notice,
) -> ManagementPage {
    ManagementPage {
        customers: load_customers(service).await,
        form: FormPanel::resubmit(mode, values, FormErrors::default()),
        notice: Some(notice),
    }
}
