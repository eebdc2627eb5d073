//! Core types for the banking console.
//!
//! This module provides type-safe wrappers for customer-record concepts.

pub mod email;
pub mod id;
pub mod income;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use income::{HIGH_INCOME_THRESHOLD, Income, IncomeError, group_thousands};
pub use phone::{PhoneNumber, PhoneNumberError};
pub use status::*;
