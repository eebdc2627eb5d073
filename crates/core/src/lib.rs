//! Banking Console Core - Shared types library.
//!
//! This crate provides common types used across the banking console components:
//! - `admin` - Server-rendered console for the customer-records service
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types and parsing rules - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for customer IDs, emails, phone numbers,
//!   incomes, and the enums used to sort and label customer lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
