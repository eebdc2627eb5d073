//! Session extractors for console handlers.
//!
//! Page views run under whatever session the console was configured with;
//! mutating routes additionally require an authenticated operator.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

use crate::models::{Operator, SessionContext};
use crate::state::AppState;

/// Extractor for the current session, authenticated or not.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
///     format!("Hello, {}!", session.display_name())
/// }
/// ```
pub struct CurrentSession(pub SessionContext);

impl<S> FromRequestParts<S> for CurrentSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(AppState::from_ref(state).session().clone()))
    }
}

/// Extractor that requires an authenticated operator.
///
/// Anonymous consoles are read-only: the request is rejected with 403.
pub struct RequireOperator(pub Operator);

/// Error returned when a mutation is attempted without an operator.
#[derive(Debug)]
pub struct OperatorRequired;

impl IntoResponse for OperatorRequired {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            "An operator is required to change customer records",
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireOperator
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = OperatorRequired;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AppState::from_ref(state).session().operator() {
            Some(operator) => Ok(Self(operator.clone())),
            None => {
                tracing::warn!(path = %parts.uri.path(), "Mutation rejected for anonymous session");
                Err(OperatorRequired)
            }
        }
    }
}
