//! Application state shared across handlers.

use std::sync::Arc;

use crate::banking::{BankingClient, BankingError};
use crate::config::ConsoleConfig;
use crate::models::SessionContext;

/// Application state shared across all handlers.
///
/// Immutable after start-up; cloning only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    banking: BankingClient,
    session: SessionContext,
}

impl AppState {
    /// Build the state and the customer service client from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: &ConsoleConfig) -> Result<Self, BankingError> {
        let banking = BankingClient::new(config.banking())?;
        let session = SessionContext::from_operator_name(config.operator_name.as_deref());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                banking,
                session,
            }),
        })
    }

    /// Customer service client.
    #[must_use]
    pub fn banking(&self) -> &BankingClient {
        &self.inner.banking
    }

    /// Session every request runs under.
    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(operator: &str) -> ConsoleConfig {
        let operator = operator.to_string();
        ConsoleConfig::from_source(|key| match key {
            "CONSOLE_OPERATOR_NAME" => Some(operator.clone()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_session_follows_operator_name() {
        let state = AppState::new(&config("Grace Hopper")).unwrap();
        assert_eq!(
            state.session().operator().map(|o| o.name.as_str()),
            Some("Grace Hopper")
        );

        let state = AppState::new(&config("")).unwrap();
        assert!(!state.session().is_authenticated());
    }
}
