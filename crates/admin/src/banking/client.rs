//! HTTP implementation of [`CustomerService`].

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use banking_console_core::{CustomerId, SortField, SortOrder};

use super::{
    BankingError, Customer, CustomerService, CustomerUpdate, FullRegistration, Invalidation,
    MutationOutcome, SimpleRegistration,
};
use crate::config::{BankingApiConfig, DeactivateMethod};

/// Longest raw error body written to the log.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Customer service client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct BankingClient {
    inner: Arc<BankingClientInner>,
}

struct BankingClientInner {
    client: reqwest::Client,
    base_url: Url,
    deactivate_method: DeactivateMethod,
}

impl BankingClient {
    /// Create a new customer service client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &BankingApiConfig) -> Result<Self, BankingError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(BankingClientInner {
                client,
                base_url: config.base_url.clone(),
                deactivate_method: config.deactivate_method,
            }),
        })
    }

    /// Build an endpoint URL by appending path segments to the base URL.
    ///
    /// `&[""]` yields the base path with a trailing slash (`/banking/`).
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BankingError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BankingError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, BankingError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        Self::handle_response(&url, response).await
    }

    /// Execute a request with a JSON body and decode the JSON answer.
    async fn send_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T, BankingError> {
        let response = self
            .inner
            .client
            .request(method, url.clone())
            .json(body)
            .send()
            .await?;
        Self::handle_response(&url, response).await
    }

    /// Decode a successful response or turn a failed one into an error.
    async fn handle_response<T: DeserializeOwned>(
        url: &Url,
        response: reqwest::Response,
    ) -> Result<T, BankingError> {
        if response.status().is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes).map_err(|e| {
                BankingError::Decode(format!("{} returned an unexpected body: {e}", url.path()))
            });
        }

        Err(Self::parse_error(url, response).await)
    }

    /// Map a non-2xx response to the error taxonomy.
    async fn parse_error(url: &Url, response: reqwest::Response) -> BankingError {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!(path = %url.path(), "Resource not found");
            return BankingError::NotFound(url.path().to_string());
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);
        let excerpt = log_excerpt(&body);

        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            warn!(path = %url.path(), status = status.as_u16(), body = %excerpt, "Request rejected by customer service");
            return BankingError::Validation(message);
        }

        warn!(path = %url.path(), status = status.as_u16(), body = %excerpt, "Customer service error");
        BankingError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

/// Pull an operator-facing message out of an error body.
///
/// Only a non-empty `message` field of a JSON body counts. Anything else
/// (proxy error pages, plain text) is left to the caller's fallback.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body.trim())
        .ok()?
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

/// Truncated raw body for log lines.
fn log_excerpt(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect()
}

impl CustomerService for BankingClient {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Customer>, BankingError> {
        let customers: Vec<Customer> = self.get(self.endpoint(&["View"])?).await?;
        debug!(count = customers.len(), "Fetched all customers");
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn list_sorted(
        &self,
        sort_by: SortField,
        order: SortOrder,
    ) -> Result<Vec<Customer>, BankingError> {
        let mut url = self.endpoint(&[""])?;
        url.query_pairs_mut()
            .append_pair("sortBy", sort_by.as_str())
            .append_pair("order", order.as_str());

        let customers: Vec<Customer> = self.get(url).await?;
        debug!(count = customers.len(), "Fetched sorted customers");
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn list_active(&self) -> Result<Vec<Customer>, BankingError> {
        let customers: Vec<Customer> = self.get(self.endpoint(&["active"])?).await?;
        debug!(count = customers.len(), "Fetched active customers");
        Ok(customers)
    }

    #[instrument(skip(self))]
    async fn list_high_income(&self) -> Result<Vec<Customer>, BankingError> {
        let customers: Vec<Customer> = self.get(self.endpoint(&["highincome"])?).await?;
        debug!(count = customers.len(), "Fetched high-income customers");
        Ok(customers)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn get_by_id(&self, id: CustomerId) -> Result<Customer, BankingError> {
        self.get(self.endpoint(&["search", &id.to_string()])?)
            .await
    }

    #[instrument(skip(self, registration), fields(date = %registration.date))]
    async fn create_simple(
        &self,
        registration: &SimpleRegistration,
    ) -> Result<MutationOutcome<Customer>, BankingError> {
        let customer: Customer = self
            .send_json(Method::POST, self.endpoint(&["CreateAccount"])?, registration)
            .await?;
        debug!(customer_id = %customer.id, "Customer created (simple)");
        Ok(MutationOutcome {
            record: customer,
            invalidation: Invalidation::CustomerLists,
        })
    }

    #[instrument(skip(self, registration))]
    async fn create_full(
        &self,
        registration: &FullRegistration,
    ) -> Result<MutationOutcome<Customer>, BankingError> {
        let customer: Customer = self
            .send_json(Method::POST, self.endpoint(&[""])?, registration)
            .await?;
        debug!(customer_id = %customer.id, "Customer created (full)");
        Ok(MutationOutcome {
            record: customer,
            invalidation: Invalidation::CustomerLists,
        })
    }

    #[instrument(skip(self, update), fields(customer_id = %id))]
    async fn update(
        &self,
        id: CustomerId,
        update: &CustomerUpdate,
    ) -> Result<MutationOutcome<Customer>, BankingError> {
        let customer: Customer = self
            .send_json(
                Method::PUT,
                self.endpoint(&["update", &id.to_string()])?,
                update,
            )
            .await?;
        debug!("Customer updated");
        Ok(MutationOutcome {
            record: customer,
            invalidation: Invalidation::Customer(id),
        })
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn deactivate(&self, id: CustomerId) -> Result<MutationOutcome<()>, BankingError> {
        let url = self.endpoint(&["deactive", &id.to_string()])?;
        let method = match self.inner.deactivate_method {
            DeactivateMethod::Put => Method::PUT,
            DeactivateMethod::Get => Method::GET,
        };

        // The body (empty or the updated record) is not needed.
        let response = self.inner.client.request(method, url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(Self::parse_error(&url, response).await);
        }

        debug!("Customer deactivated");
        Ok(MutationOutcome {
            record: (),
            invalidation: Invalidation::Customer(id),
        })
    }
}

impl std::fmt::Debug for BankingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BankingClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("deactivate_method", &self.inner.deactivate_method)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> BankingClient {
        BankingClient::new(&BankingApiConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_segments() {
        let client = client("http://localhost:8080/banking");
        assert_eq!(
            client.endpoint(&["View"]).unwrap().as_str(),
            "http://localhost:8080/banking/View"
        );
        assert_eq!(
            client.endpoint(&["search", "42"]).unwrap().as_str(),
            "http://localhost:8080/banking/search/42"
        );
    }

    #[test]
    fn test_endpoint_root_keeps_trailing_slash() {
        let client = client("http://localhost:8080/banking");
        assert_eq!(
            client.endpoint(&[""]).unwrap().as_str(),
            "http://localhost:8080/banking/"
        );
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash_in_base() {
        let client = client("http://localhost:8080/banking/");
        assert_eq!(
            client.endpoint(&["active"]).unwrap().as_str(),
            "http://localhost:8080/banking/active"
        );
    }

    #[test]
    fn test_extract_message_from_json() {
        let body = r#"{"status":400,"error":"Bad Request","message":"Customer must be at least 18 years old"}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("Customer must be at least 18 years old")
        );
    }

    #[test]
    fn test_extract_message_ignores_json_without_message() {
        assert_eq!(extract_message(r#"{"error":"Bad Request","message":""}"#), None);
        assert_eq!(extract_message(r#"{"error":"Bad Request"}"#), None);
    }

    #[test]
    fn test_extract_message_ignores_non_json_bodies() {
        assert_eq!(extract_message("  upstream down \n"), None);
        assert_eq!(extract_message("   "), None);
        assert_eq!(
            extract_message("<html><body><h1>502 Bad Gateway</h1></body></html>"),
            None
        );
        assert_eq!(extract_message(r#""just a string""#), None);
    }

    #[test]
    fn test_log_excerpt_truncates() {
        assert_eq!(log_excerpt("  upstream down \n"), "upstream down");
        assert_eq!(log_excerpt(&"x".repeat(1000)).len(), MAX_ERROR_BODY_CHARS);
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", client("http://localhost:8080/banking"));
        assert!(debug.contains("localhost:8080/banking"));
        assert!(debug.contains("Put"));
    }
}
