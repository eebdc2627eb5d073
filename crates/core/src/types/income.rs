//! Annual income in whole currency units.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Income above which the customer service classifies a customer as high income.
///
/// The console never filters on this value itself; it is used for labels only.
pub const HIGH_INCOME_THRESHOLD: Income = Income(100_000);

/// Errors that can occur when parsing an [`Income`] from form input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IncomeError {
    /// The input is empty.
    #[error("annual income is required")]
    Empty,
    /// The input is a negative number.
    #[error("annual income must not be negative")]
    Negative,
    /// The input is not a whole number.
    #[error("annual income must be a whole number")]
    NotWholeNumber,
}

/// A customer's annual income, a non-negative whole amount in a single currency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Income(u64);

impl Income {
    /// Zero income.
    pub const ZERO: Self = Self(0);

    /// Create an income from a whole amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Parse an income typed into a form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, negative, or not a whole number.
    pub fn parse(input: &str) -> Result<Self, IncomeError> {
        let s = input.trim();

        if s.is_empty() {
            return Err(IncomeError::Empty);
        }

        if let Some(rest) = s.strip_prefix('-') {
            return if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                Err(IncomeError::Negative)
            } else {
                Err(IncomeError::NotWholeNumber)
            };
        }

        s.parse::<u64>()
            .map(Self)
            .map_err(|_| IncomeError::NotWholeNumber)
    }

    /// Format for display with a currency sign and thousands separators
    /// (e.g. `$150,000`).
    #[must_use]
    pub fn display(self) -> String {
        format!("${}", group_thousands(self.0))
    }
}

impl fmt::Display for Income {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

impl From<u64> for Income {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl core::iter::Sum for Income {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|income| income.0).fold(0, u64::saturating_add))
    }
}

/// Insert `,` between every group of three digits.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
