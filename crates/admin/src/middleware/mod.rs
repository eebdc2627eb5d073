//! Request extractors for the console.

pub mod auth;
