//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CONSOLE_HOST` - Bind address (default: 127.0.0.1)
//! - `CONSOLE_PORT` - Listen port (default: 3001)
//! - `BANKING_API_BASE_URL` - Customer service base URL
//!   (default: `http://localhost:8080/banking`)
//! - `BANKING_DEACTIVATE_METHOD` - `put` (default) or `get` for services that
//!   only accept the legacy deactivation verb
//! - `CONSOLE_OPERATOR_NAME` - Name of the stub operator (default: Admin User);
//!   set it to an empty string to run the console anonymously
//! - `CONSOLE_LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Default base URL of the customer service.
pub const DEFAULT_BANKING_API_BASE_URL: &str = "http://localhost:8080/banking";

/// Default display name of the stub operator.
pub const DEFAULT_OPERATOR_NAME: &str = "Admin User";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// HTTP verb used for the deactivation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeactivateMethod {
    /// Mutating verb; used unless the service only understands GET.
    #[default]
    Put,
    /// Legacy verb kept for services that expose deactivation as GET.
    Get,
}

impl std::str::FromStr for DeactivateMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "put" => Ok(Self::Put),
            "get" => Ok(Self::Get),
            other => Err(format!("expected `put` or `get`, got `{other}`")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Customer service connection settings.
#[derive(Debug, Clone)]
pub struct BankingApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,
    /// Verb used for `/deactive/{id}`.
    pub deactivate_method: DeactivateMethod,
}

impl BankingApiConfig {
    /// Settings pointing at `base_url` with the default deactivation verb.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            deactivate_method: DeactivateMethod::default(),
        })
    }
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Customer service settings
    pub banking: BankingApiConfig,
    /// Stub operator name; `None` runs the console anonymously
    pub operator_name: Option<String>,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSource(source);

        let host = env
            .get_or_default("CONSOLE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONSOLE_HOST".to_string(), e.to_string()))?;
        let port = env
            .get_or_default("CONSOLE_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONSOLE_PORT".to_string(), e.to_string()))?;

        let base_url =
            parse_base_url(&env.get_or_default("BANKING_API_BASE_URL", DEFAULT_BANKING_API_BASE_URL))?;
        let deactivate_method = env
            .get_or_default("BANKING_DEACTIVATE_METHOD", "put")
            .parse::<DeactivateMethod>()
            .map_err(|e| ConfigError::InvalidEnvVar("BANKING_DEACTIVATE_METHOD".to_string(), e))?;

        let operator_name = match env.get("CONSOLE_OPERATOR_NAME") {
            Some(name) if name.trim().is_empty() => None,
            Some(name) => Some(name.trim().to_string()),
            None => Some(DEFAULT_OPERATOR_NAME.to_string()),
        };

        let log_format = env
            .get_or_default("CONSOLE_LOG_FORMAT", "text")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONSOLE_LOG_FORMAT".to_string(), e))?;

        let sentry_dsn = env.get("SENTRY_DSN");
        let sentry_environment = env.get("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .get("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .get("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            banking: BankingApiConfig {
                base_url,
                deactivate_method,
            },
            operator_name,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the customer service settings.
    #[must_use]
    pub const fn banking(&self) -> &BankingApiConfig {
        &self.banking
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup wrapper shared by the loaders.
struct EnvSource<F>(F);

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable; empty values count as set.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse and check the customer service base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        ConfigError::InvalidEnvVar("BANKING_API_BASE_URL".to_string(), e.to_string())
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "BANKING_API_BASE_URL".to_string(),
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ConsoleConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ConsoleConfig::from_source(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert_eq!(
            config.banking.base_url.as_str(),
            DEFAULT_BANKING_API_BASE_URL
        );
        assert_eq!(config.banking.deactivate_method, DeactivateMethod::Put);
        assert_eq!(config.operator_name.as_deref(), Some("Admin User"));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CONSOLE_HOST", "0.0.0.0"),
            ("CONSOLE_PORT", "8081"),
            ("BANKING_API_BASE_URL", "https://core.bank.example/banking"),
            ("BANKING_DEACTIVATE_METHOD", "GET"),
            ("CONSOLE_OPERATOR_NAME", "  Teller One "),
            ("CONSOLE_LOG_FORMAT", "json"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8081");
        assert_eq!(config.banking.base_url.host_str(), Some("core.bank.example"));
        assert_eq!(config.banking.deactivate_method, DeactivateMethod::Get);
        assert_eq!(config.operator_name.as_deref(), Some("Teller One"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert!((config.sentry_sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_operator_name_means_anonymous() {
        let config = load(&[("CONSOLE_OPERATOR_NAME", "")]).unwrap();
        assert!(config.operator_name.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("CONSOLE_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CONSOLE_PORT"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(load(&[("BANKING_API_BASE_URL", "not a url")]).is_err());
        assert!(load(&[("BANKING_API_BASE_URL", "ftp://files.example/banking")]).is_err());
    }

    #[test]
    fn test_invalid_deactivate_method() {
        let err = load(&[("BANKING_DEACTIVATE_METHOD", "delete")]).unwrap_err();
        assert!(err.to_string().contains("BANKING_DEACTIVATE_METHOD"));
    }
}
