//! Registration and update forms, and their validation.
//!
//! Validation runs before any request is sent. Every field is checked so the
//! operator sees all problems at once.

use chrono::NaiveDate;
use serde::Deserialize;

use banking_console_core::{Email, Income, PhoneNumber};

use crate::banking::{CustomerDetails, CustomerUpdate, FullRegistration, SimpleRegistration};

// =============================================================================
// Registration Mode
// =============================================================================

/// Which registration path the form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationMode {
    /// Registration date, no age check.
    #[default]
    Simple,
    /// Date of birth; the service enforces the minimum age.
    Full,
}

impl RegistrationMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Full => "full",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple registration",
            Self::Full => "Full registration",
        }
    }

    #[must_use]
    pub const fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl std::str::FromStr for RegistrationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "full" => Ok(Self::Full),
            _ => Err(format!("invalid registration mode: {s}")),
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// A problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field problem found in one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Record the error of a fallible field parse and keep the value on success.
    fn check<T, E: std::fmt::Display>(
        &mut self,
        field: &'static str,
        result: Result<T, E>,
    ) -> Option<T> {
        result.map_err(|e| self.push(field, e.to_string())).ok()
    }
}

// =============================================================================
// Registration Form
// =============================================================================

/// Raw registration input as posted by the browser.
///
/// Values are kept verbatim so a rejected form can be shown again as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub income: String,
    /// Registration date (simple); empty means today.
    pub date: String,
    /// Date of birth (full); required.
    pub date_of_birth: String,
}

impl RegistrationForm {
    /// Validate for the simple path, defaulting an empty date to `today`.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    pub fn to_simple(&self, today: NaiveDate) -> Result<SimpleRegistration, FormErrors> {
        let mut errors = FormErrors::default();
        let details = self.details(&mut errors);

        let date = if self.date.trim().is_empty() {
            Some(today)
        } else {
            errors.check("date", parse_date(&self.date))
        };

        match (details, date) {
            (Some(details), Some(date)) if errors.is_empty() => {
                Ok(SimpleRegistration { details, date })
            }
            _ => Err(errors),
        }
    }

    /// Validate for the full path; the date of birth is mandatory.
    ///
    /// The minimum age is not checked here; the service rejects minors.
    ///
    /// # Errors
    ///
    /// Returns every field problem found.
    pub fn to_full(&self) -> Result<FullRegistration, FormErrors> {
        let mut errors = FormErrors::default();
        let details = self.details(&mut errors);

        let date_of_birth = if self.date_of_birth.trim().is_empty() {
            errors.push("date_of_birth", "date of birth is required");
            None
        } else {
            errors.check("date_of_birth", parse_date(&self.date_of_birth))
        };

        match (details, date_of_birth) {
            (Some(details), Some(date_of_birth)) if errors.is_empty() => Ok(FullRegistration {
                details,
                date_of_birth,
            }),
            _ => Err(errors),
        }
    }

    fn details(&self, errors: &mut FormErrors) -> Option<CustomerDetails> {
        let name = required_text(errors, "name", &self.name);
        let email = errors.check("email", Email::parse(&self.email));
        let phone_number = errors.check("phone_number", PhoneNumber::parse(&self.phone_number));
        let address = required_text(errors, "address", &self.address);
        let city = required_text(errors, "city", &self.city);
        let country = required_text(errors, "country", &self.country);
        let income = errors.check("income", Income::parse(&self.income));

        Some(CustomerDetails {
            name: name?,
            email: email?,
            phone_number: phone_number?,
            address: address?,
            country: country?,
            city: city?,
            income: income?,
        })
    }
}

// =============================================================================
// Update Form
// =============================================================================

/// Raw partial-update input; empty fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub income: String,
}

impl UpdateForm {
    /// Validate the non-empty fields with the registration rules.
    ///
    /// # Errors
    ///
    /// Returns every field problem found, or a form-level error when no field
    /// was filled in.
    pub fn to_update(&self) -> Result<CustomerUpdate, FormErrors> {
        let mut errors = FormErrors::default();

        let update = CustomerUpdate {
            name: optional_text(&self.name),
            email: non_empty(&self.email).and_then(|v| errors.check("email", Email::parse(v))),
            phone_number: non_empty(&self.phone_number)
                .and_then(|v| errors.check("phone_number", PhoneNumber::parse(v))),
            address: optional_text(&self.address),
            country: optional_text(&self.country),
            city: optional_text(&self.city),
            income: non_empty(&self.income).and_then(|v| errors.check("income", Income::parse(v))),
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        if update.is_empty() {
            errors.push("form", "enter at least one field to change");
            return Err(errors);
        }
        Ok(update)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn required_text(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{} is required", field.replace('_', " ")));
        return None;
    }
    Some(trimmed.to_string())
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn optional_text(value: &str) -> Option<String> {
    non_empty(value).map(String::from)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    value
        .trim()
        .parse::<NaiveDate>()
        .map_err(|_| "date must be in YYYY-MM-DD format".to_string())
}
