//! Customer management, detail, and mutation route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use banking_console_core::CustomerId;

use super::render;
use crate::{
    banking::Customer,
    error::AppError,
    filters,
    middleware::auth::{CurrentSession, RequireOperator},
    models::SessionContext,
    state::AppState,
    views::{
        FieldError, FormErrors, Notice, PageState, RegistrationForm, RegistrationMode, UpdateForm,
        detail::{self, DetailPage},
        management::{self, FormPanel, ManagementPage},
    },
};

// =============================================================================
// View Types
// =============================================================================

/// Customer table row.
#[derive(Debug, Clone)]
pub struct CustomerRowView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub income: String,
    /// Empty for simple registrations.
    pub age: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub active: bool,
}

impl From<&Customer> for CustomerRowView {
    fn from(customer: &Customer) -> Self {
        let status = customer.status();
        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer
                .phone_number
                .as_ref()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default(),
            location: customer.location(),
            income: customer.income_or_zero().display(),
            age: customer.age.map(|a| a.to_string()).unwrap_or_default(),
            status_label: status.label(),
            status_class: status.css_class(),
            active: customer.active,
        }
    }
}

/// Full record for the detail card.
#[derive(Debug, Clone)]
pub struct CustomerDetailView {
    pub row: CustomerRowView,
    pub address: String,
    pub city: String,
    pub country: String,
    /// Registration date or date of birth, whichever the record carries.
    pub date_label: &'static str,
    pub date: String,
}

impl From<&Customer> for CustomerDetailView {
    fn from(customer: &Customer) -> Self {
        let (date_label, date) = match (customer.date_of_birth, customer.date) {
            (Some(dob), _) => ("Date of birth", dob.to_string()),
            (None, Some(date)) => ("Registered", date.to_string()),
            (None, None) => ("Registered", String::new()),
        };
        Self {
            row: CustomerRowView::from(customer),
            address: customer.address.clone(),
            city: customer.city.clone(),
            country: customer.country.clone(),
            date_label,
            date,
        }
    }
}

/// Success or failure banner.
#[derive(Debug, Clone)]
pub struct NoticeView {
    pub class: &'static str,
    pub message: String,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        Self {
            class: notice.css_class(),
            message: notice.message.clone(),
        }
    }
}

pub(crate) fn field_errors(errors: &FormErrors) -> Vec<FieldError> {
    errors.iter().cloned().collect()
}

// =============================================================================
// Management Page
// =============================================================================

/// Customer management page template.
#[derive(Template)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub session: SessionContext,
    pub current_path: String,
    pub error: Option<String>,
    pub customers: Vec<CustomerRowView>,
    pub notice: Option<NoticeView>,
    pub form_visible: bool,
    pub mode: &'static str,
    pub mode_label: &'static str,
    pub is_full: bool,
    pub values: RegistrationForm,
    pub errors: Vec<FieldError>,
}

impl CustomersIndexTemplate {
    fn new(session: SessionContext, page: &ManagementPage) -> Self {
        let (customers, error) = match &page.customers {
            PageState::Ready(customers) => (customers.iter().map(CustomerRowView::from).collect(), None),
            PageState::Failed { message } => (Vec::new(), Some(message.clone())),
        };

        Self {
            session,
            current_path: "/customers".to_string(),
            error,
            customers,
            notice: page.notice.as_ref().map(NoticeView::from),
            form_visible: page.form.visible,
            mode: page.form.mode.as_str(),
            mode_label: page.form.mode.label(),
            is_full: page.form.mode.is_full(),
            values: page.form.values.clone(),
            errors: field_errors(&page.form.errors),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ManagementQuery {
    pub form: Option<String>,
}

/// Customer management page handler.
#[instrument(skip(session, state))]
pub async fn index(
    CurrentSession(session): CurrentSession,
    State(state): State<AppState>,
    Query(query): Query<ManagementQuery>,
) -> Result<Html<String>, AppError> {
    let panel = query
        .form
        .as_deref()
        .and_then(|mode| mode.parse::<RegistrationMode>().ok())
        .map_or_else(FormPanel::hidden, FormPanel::open);

    let page = management::load(state.banking(), panel).await;
    render(&CustomersIndexTemplate::new(session, &page))
}

/// Simple registration handler.
#[instrument(skip(operator, state, form), fields(operator = %operator.name))]
pub async fn create_simple(
    RequireOperator(operator): RequireOperator,
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Result<Html<String>, AppError> {
    let today = chrono::Utc::now().date_naive();
    let page = management::register_simple(state.banking(), form, today).await;
    render(&CustomersIndexTemplate::new(state.session().clone(), &page))
}

/// Full registration handler.
#[instrument(skip(operator, state, form), fields(operator = %operator.name))]
pub async fn create_full(
    RequireOperator(operator): RequireOperator,
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Result<Html<String>, AppError> {
    let page = management::register_full(state.banking(), form).await;
    render(&CustomersIndexTemplate::new(state.session().clone(), &page))
}

/// Deactivation handler.
#[instrument(skip(operator, state), fields(operator = %operator.name))]
pub async fn deactivate(
    RequireOperator(operator): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let page = management::deactivate(state.banking(), id).await;
    render(&CustomersIndexTemplate::new(state.session().clone(), &page))
}

// =============================================================================
// Detail Page
// =============================================================================

/// Customer detail page template.
#[derive(Template)]
#[template(path = "customers/show.html")]
pub struct CustomerShowTemplate {
    pub session: SessionContext,
    pub current_path: String,
    pub id: String,
    pub error: Option<String>,
    pub customer: Option<CustomerDetailView>,
    pub notice: Option<NoticeView>,
    pub values: UpdateForm,
    pub errors: Vec<FieldError>,
}

impl CustomerShowTemplate {
    fn new(session: SessionContext, page: &DetailPage) -> Self {
        Self {
            session,
            current_path: "/customers".to_string(),
            id: page.id.to_string(),
            error: page.customer.failure().map(String::from),
            customer: page.customer.ready().map(CustomerDetailView::from),
            notice: page.notice.as_ref().map(NoticeView::from),
            values: page.form.clone(),
            errors: field_errors(&page.errors),
        }
    }
}

fn detail_response(session: SessionContext, page: &DetailPage) -> Result<Response, AppError> {
    let html = render(&CustomerShowTemplate::new(session, page))?;
    let status = if page.not_found {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    Ok((status, html).into_response())
}

/// Customer detail page handler.
#[instrument(skip(session, state))]
pub async fn show(
    CurrentSession(session): CurrentSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let page = detail::load(state.banking(), id).await;
    detail_response(session, &page)
}

/// Partial update handler.
#[instrument(skip(operator, state, form), fields(operator = %operator.name))]
pub async fn update(
    RequireOperator(operator): RequireOperator,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<UpdateForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let page = detail::update(state.banking(), id, form).await;
    detail_response(state.session().clone(), &page)
}

fn parse_id(raw: &str) -> Result<CustomerId, AppError> {
    raw.parse::<CustomerId>()
        .map_err(|_| AppError::BadRequest(format!("invalid customer id: {raw}")))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::routes::test_support::{get, offline_router, post_form, send};

    #[test]
    fn test_row_view_formats_values() {
        let customer: Customer = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "B",
            "email": "b@bank.example",
            "phoneNumber": 9_876_543_210_u64,
            "city": "Pune",
            "country": "India",
            "income": 150_000,
            "active": false
        }))
        .unwrap_or_else(|e| panic!("{e}"));
        let row = CustomerRowView::from(&customer);

        assert_eq!(row.income, "$150,000");
        assert_eq!(row.phone, "9876543210");
        assert_eq!(row.location, "Pune, India");
        assert_eq!(row.age, "");
        assert_eq!(row.status_label, "Inactive");
    }

    #[tokio::test]
    async fn test_management_page_renders_failure() {
        let (status, body) = send(offline_router(Some("Admin User")), get("/customers?form=full")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Failed to load customers."));
        assert!(body.contains("Full registration"));
        assert!(body.contains("Admin User"));
    }

    #[tokio::test]
    async fn test_mutations_require_operator() {
        let (status, _) = send(
            offline_router(None),
            post_form("/customers/1/deactivate", ""),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(offline_router(None), post_form("/customers/simple", "name=x")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_anonymous_pages_hide_navigation() {
        let (status, body) = send(offline_router(None), get("/customers")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("class=\"nav\""));
    }

    #[tokio::test]
    async fn test_invalid_id_is_bad_request() {
        let (status, _) = send(offline_router(Some("Admin User")), get("/customers/abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_form_is_shown_again() {
        let (status, body) = send(
            offline_router(Some("Admin User")),
            post_form("/customers/simple", "name=Erin&phone_number=123"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("value=\"Erin\""));
        assert!(body.contains("phone number must be exactly 10 digits"));
    }
}
