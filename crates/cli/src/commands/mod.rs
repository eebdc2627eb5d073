//! CLI command implementations.

pub mod customers;
pub mod report;

use std::fmt::Write as _;

use thiserror::Error;

use banking_console_admin::banking::{BankingClient, BankingError, Customer};
use banking_console_admin::config::{ConfigError, ConsoleConfig};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The customer service client could not be created.
    #[error("Client error: {0}")]
    Client(#[from] BankingError),

    /// The command ran but the customer service reported a failure.
    #[error("{0}")]
    Failed(String),
}

/// Build a customer service client from the console configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn client() -> Result<BankingClient, CommandError> {
    let config = ConsoleConfig::from_env()?;
    tracing::debug!(base_url = %config.banking.base_url, "Using customer service");
    Ok(BankingClient::new(config.banking())?)
}

/// Print command output.
#[allow(clippy::print_stdout)]
pub fn emit(output: &str) {
    print!("{output}");
}

/// Render customers as a fixed-width text table.
pub fn customer_table(customers: &[Customer]) -> String {
    let mut out = format!(
        "{:<6} {:<24} {:<30} {:>12} {:>4} {:<8}\n",
        "ID", "NAME", "EMAIL", "INCOME", "AGE", "STATUS"
    );
    for customer in customers {
        let age = customer
            .age
            .map_or_else(|| "-".to_string(), |age| age.to_string());
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<30} {:>12} {:>4} {:<8}",
            customer.id,
            truncate(&customer.name, 24),
            truncate(&customer.email, 30),
            customer.income_or_zero().display(),
            age,
            customer.status().label(),
        );
    }
    let _ = writeln!(out, "({} customers)", customers.len());
    out
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}
