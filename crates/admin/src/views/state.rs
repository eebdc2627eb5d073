//! Page state shared by every loader.

use crate::banking::BankingError;

/// What a page shows once its fetch has settled: a failure banner or the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<T> {
    Failed { message: String },
    Ready(T),
}

impl<T> PageState<T> {
    /// Convert a fetch result, replacing errors with an operator-facing message.
    ///
    /// The service's own message wins; `fallback` is used when there is none.
    pub fn from_result(result: Result<T, BankingError>, fallback: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                tracing::warn!(error = %e, "Page data fetch failed");
                Self::Failed {
                    message: failure_message(&e, fallback),
                }
            }
        }
    }

    /// Build a failed state directly.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// The data, when ready.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the state and return the data, when ready.
    #[must_use]
    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, when failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Message to show for a failed call: the service's message, else `fallback`.
#[must_use]
pub fn failure_message(error: &BankingError, fallback: &str) -> String {
    error
        .user_message()
        .map_or_else(|| fallback.to_string(), String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_prefers_server_message() {
        let state: PageState<()> = PageState::from_result(
            Err(BankingError::Server {
                status: 503,
                message: Some("maintenance window".to_string()),
            }),
            "Failed to load customers.",
        );
        assert_eq!(state.failure(), Some("maintenance window"));
    }

    #[test]
    fn test_from_result_uses_fallback() {
        let state: PageState<()> = PageState::from_result(
            Err(BankingError::Server {
                status: 500,
                message: None,
            }),
            "Failed to load customers.",
        );
        assert_eq!(state.failure(), Some("Failed to load customers."));

        let state: PageState<()> =
            PageState::from_result(Err(BankingError::Decode("bad".to_string())), "fallback");
        assert_eq!(state.failure(), Some("fallback"));
    }
}
