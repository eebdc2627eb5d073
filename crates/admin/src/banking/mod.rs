//! Customer service client.
//!
//! The remote customer service owns every customer record. This module maps
//! each logical operation to exactly one HTTP call: no retries, no queues, no
//! caching. Mutations hand back an [`Invalidation`] so callers re-fetch the
//! views they affected.
//!
//! # Example
//!
//! ```rust,ignore
//! use banking_console_admin::banking::{BankingClient, CustomerService};
//! use banking_console_core::{SortField, SortOrder};
//!
//! let client = BankingClient::new(&config.banking)?;
//!
//! let customers = client.list_sorted(SortField::Income, SortOrder::Desc).await?;
//! let rich = client.list_high_income().await?;
//! ```

mod client;
mod types;

pub use client::BankingClient;
pub use types::*;

use std::future::Future;

use thiserror::Error;

use banking_console_core::{CustomerId, SortField, SortOrder};

/// Errors that can occur when talking to the customer service.
#[derive(Debug, Error)]
pub enum BankingError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service rejected the input (400/422). Carries the service's
    /// `message` field when it sent one.
    #[error("Validation error: {}", .0.as_deref().unwrap_or("no message"))]
    Validation(Option<String>),

    /// A 2xx response carried a body that could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An endpoint URL could not be built from the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl BankingError {
    /// Message suitable for showing to an operator, when the service supplied one.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Server {
                message: Some(message),
                ..
            }
            | Self::Validation(Some(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    /// HTTP status the service answered with, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Whether this is a not-found failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// The fixed set of operations the console performs against the customer service.
///
/// [`BankingClient`] implements this over HTTP; the view-model layer only sees
/// the trait, so tests can substitute an in-memory service.
pub trait CustomerService: Send + Sync {
    /// `GET /View`
    fn list_all(&self) -> impl Future<Output = Result<Vec<Customer>, BankingError>> + Send;

    /// `GET /?sortBy=..&order=..`; the service does the sorting.
    fn list_sorted(
        &self,
        sort_by: SortField,
        order: SortOrder,
    ) -> impl Future<Output = Result<Vec<Customer>, BankingError>> + Send;

    /// `GET /active`
    fn list_active(&self) -> impl Future<Output = Result<Vec<Customer>, BankingError>> + Send;

    /// `GET /highincome`
    fn list_high_income(
        &self,
    ) -> impl Future<Output = Result<Vec<Customer>, BankingError>> + Send;

    /// `GET /search/{id}`
    fn get_by_id(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<Customer, BankingError>> + Send;

    /// `POST /CreateAccount`
    fn create_simple(
        &self,
        registration: &SimpleRegistration,
    ) -> impl Future<Output = Result<MutationOutcome<Customer>, BankingError>> + Send;

    /// `POST /`
    fn create_full(
        &self,
        registration: &FullRegistration,
    ) -> impl Future<Output = Result<MutationOutcome<Customer>, BankingError>> + Send;

    /// `PUT /update/{id}`
    fn update(
        &self,
        id: CustomerId,
        update: &CustomerUpdate,
    ) -> impl Future<Output = Result<MutationOutcome<Customer>, BankingError>> + Send;

    /// `/deactive/{id}`; not assumed idempotent.
    fn deactivate(
        &self,
        id: CustomerId,
    ) -> impl Future<Output = Result<MutationOutcome<()>, BankingError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banking_error_display() {
        let err = BankingError::NotFound("/search/7".to_string());
        assert_eq!(err.to_string(), "Not found: /search/7");

        let err = BankingError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Server error (500): no message");

        let err = BankingError::Server {
            status: 503,
            message: Some("maintenance".to_string()),
        };
        assert_eq!(err.to_string(), "Server error (503): maintenance");
    }

    #[test]
    fn test_user_message() {
        let err = BankingError::Validation(Some("Customer must be at least 18".to_string()));
        assert_eq!(err.user_message(), Some("Customer must be at least 18"));

        let err = BankingError::Validation(None);
        assert_eq!(err.user_message(), None);
        assert_eq!(err.to_string(), "Validation error: no message");

        let err = BankingError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), None);
        assert_eq!(BankingError::NotFound("x".to_string()).user_message(), None);
    }

    #[test]
    fn test_status() {
        assert_eq!(BankingError::NotFound("x".to_string()).status(), Some(404));
        assert_eq!(BankingError::Decode("bad".to_string()).status(), None);
        assert!(BankingError::NotFound("x".to_string()).is_not_found());
    }
}
