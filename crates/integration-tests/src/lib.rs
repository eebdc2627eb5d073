//! Integration test harness for the banking console.
//!
//! [`FakeBank`] is an in-process stand-in for the remote customer service.
//! It serves the same paths over real HTTP on an ephemeral port, records
//! every request it receives, and can be told to fail specific endpoints.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p banking-console-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde_json::{Value, json};

use banking_console_admin::banking::BankingClient;
use banking_console_admin::config::{BankingApiConfig, ConsoleConfig};
use banking_console_admin::routes::build_router;
use banking_console_admin::state::AppState;

/// Base path the fake service is mounted under.
pub const BASE_PATH: &str = "/banking";

/// A request the fake service received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Default)]
struct BankData {
    customers: Vec<Value>,
    requests: Vec<RecordedRequest>,
    bodies: Vec<(String, Value)>,
    failures: HashMap<(Method, String), (StatusCode, String)>,
}

/// In-process fake of the remote customer service.
#[derive(Clone, Default)]
pub struct FakeBank {
    data: Arc<Mutex<BankData>>,
}

impl FakeBank {
    /// Fake service seeded with `customers` (JSON objects with an `id`).
    #[must_use]
    pub fn with_customers(customers: Vec<Value>) -> Self {
        let bank = Self::default();
        bank.data.lock().unwrap().customers = customers;
        bank
    }

    /// Answer `method path` with `status` and a raw `body` from now on.
    pub fn fail(&self, method: Method, path: &str, status: StatusCode, body: &str) {
        self.data
            .lock()
            .unwrap()
            .failures
            .insert((method, path.to_string()), (status, body.to_string()));
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data.lock().unwrap().requests.clone()
    }

    /// Number of requests received for `method path`.
    #[must_use]
    pub fn count(&self, method: &Method, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == *method && r.path == path)
            .count()
    }

    /// JSON bodies received, tagged with their path.
    #[must_use]
    pub fn bodies(&self) -> Vec<(String, Value)> {
        self.data.lock().unwrap().bodies.clone()
    }

    /// Current record for `id`.
    #[must_use]
    pub fn customer(&self, id: i64) -> Option<Value> {
        self.data
            .lock()
            .unwrap()
            .customers
            .iter()
            .find(|c| c["id"] == id)
            .cloned()
    }

    /// Serve the fake on an ephemeral local port and return its base URL.
    pub async fn spawn(&self) -> String {
        let routes = Router::new()
            .route("/banking/View", get(list_all))
            .route("/banking/", get(list_sorted).post(create_full))
            .route("/banking/CreateAccount", post(create_simple))
            .route("/banking/active", get(list_active))
            .route("/banking/highincome", get(list_high_income))
            .route("/banking/search/{id}", get(get_by_id))
            .route("/banking/update/{id}", put(update))
            .route("/banking/deactive/{id}", put(deactivate).get(deactivate))
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone());

        let addr = serve(routes).await;
        format!("http://{addr}{BASE_PATH}")
    }

    /// Client for a fake served at `base_url`.
    #[must_use]
    pub fn client(base_url: &str) -> BankingClient {
        BankingClient::new(&BankingApiConfig::new(base_url).unwrap()).unwrap()
    }
}

/// Serve `router` on `127.0.0.1:0` in the background.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, router).await.expect("serve") });
    addr
}

/// Run the console against `bank_url` and return the console's base URL.
///
/// `operator` of `None` runs the console anonymously.
pub async fn spawn_console(bank_url: &str, operator: Option<&str>) -> String {
    let operator = operator.unwrap_or("").to_string();
    let bank_url = bank_url.to_string();
    let config = ConsoleConfig::from_source(|key| match key {
        "BANKING_API_BASE_URL" => Some(bank_url.clone()),
        "CONSOLE_OPERATOR_NAME" => Some(operator.clone()),
        _ => None,
    })
    .unwrap();

    let addr = serve(build_router(AppState::new(&config).unwrap())).await;
    format!("http://{addr}")
}

/// A customer record in the service's JSON shape.
#[must_use]
pub fn customer_json(id: i64, name: &str, income: u64, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@bank.example", name.to_lowercase()),
        "phoneNumber": 9_876_543_210_u64,
        "address": "1 Main St",
        "city": "Pune",
        "country": "India",
        "income": income,
        "age": null,
        "active": active,
        "date": "2024-03-01"
    })
}

// =============================================================================
// Handlers
// =============================================================================

async fn record(State(bank): State<FakeBank>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(String::from);

    let failure = {
        let mut data = bank.data.lock().unwrap();
        data.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query,
        });
        data.failures.get(&(method, path)).cloned()
    };

    match failure {
        Some((status, body)) => (status, body).into_response(),
        None => next.run(request).await,
    }
}

fn filtered(bank: &FakeBank, keep: impl Fn(&Value) -> bool) -> Json<Value> {
    let data = bank.data.lock().unwrap();
    Json(Value::Array(
        data.customers.iter().filter(|c| keep(c)).cloned().collect(),
    ))
}

async fn list_all(State(bank): State<FakeBank>) -> Json<Value> {
    filtered(&bank, |_| true)
}

async fn list_active(State(bank): State<FakeBank>) -> Json<Value> {
    filtered(&bank, |c| c["active"] == true)
}

async fn list_high_income(State(bank): State<FakeBank>) -> Json<Value> {
    filtered(&bank, |c| c["income"].as_u64().unwrap_or(0) > 100_000)
}

async fn list_sorted(
    State(bank): State<FakeBank>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let field = params.get("sortBy").map_or("name", String::as_str).to_string();
    let descending = params.get("order").is_some_and(|o| o == "desc");

    let mut customers = bank.data.lock().unwrap().customers.clone();
    customers.sort_by(|a, b| {
        let (a, b) = (&a[&field], &b[&field]);
        match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => a.as_str().unwrap_or("").cmp(b.as_str().unwrap_or("")),
        }
    });
    if descending {
        customers.reverse();
    }
    Json(Value::Array(customers))
}

async fn get_by_id(State(bank): State<FakeBank>, Path(id): Path<i64>) -> Response {
    match bank.customer(id) {
        Some(customer) => Json(customer).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn insert(bank: &FakeBank, path: &str, mut body: Value) -> Value {
    let mut data = bank.data.lock().unwrap();
    data.bodies.push((path.to_string(), body.clone()));

    let next = data
        .customers
        .iter()
        .filter_map(|c| c["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    body["id"] = json!(next);
    body["active"] = json!(true);
    data.customers.push(body.clone());
    body
}

async fn create_simple(State(bank): State<FakeBank>, Json(body): Json<Value>) -> Json<Value> {
    let mut created = insert(&bank, "/banking/CreateAccount", body);
    created["age"] = Value::Null;
    Json(created)
}

async fn create_full(State(bank): State<FakeBank>, Json(body): Json<Value>) -> Response {
    let dob = body["dateOfBirth"]
        .as_str()
        .and_then(|s| s.parse::<NaiveDate>().ok());
    let Some(dob) = dob else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Date of birth is required" })),
        )
            .into_response();
    };

    let today = Utc::now().date_naive();
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    if age < 18 {
        bank.data
            .lock()
            .unwrap()
            .bodies
            .push(("/banking/".to_string(), body));
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Customer must be at least 18 years old" })),
        )
            .into_response();
    }

    let mut created = insert(&bank, "/banking/", body);
    created["age"] = json!(age);
    Json(created).into_response()
}

async fn update(
    State(bank): State<FakeBank>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut data = bank.data.lock().unwrap();
    data.bodies.push((format!("/banking/update/{id}"), body.clone()));

    let Some(customer) = data.customers.iter_mut().find(|c| c["id"] == id) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(changes)) = (customer.as_object_mut(), body.as_object()) {
        for (key, value) in changes {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(customer.clone()).into_response()
}

async fn deactivate(State(bank): State<FakeBank>, Path(id): Path<i64>) -> Response {
    let mut data = bank.data.lock().unwrap();
    match data.customers.iter_mut().find(|c| c["id"] == id) {
        Some(customer) => {
            customer["active"] = json!(false);
            StatusCode::OK.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
