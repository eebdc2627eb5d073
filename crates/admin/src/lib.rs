//! Banking Console admin library.
//!
//! Server-rendered console for a remote customer-records service. The
//! console holds no data of its own: every page is rebuilt from the service
//! on each request.
//!
//! - [`banking`]: typed client for the customer service
//! - [`views`]: aggregation and view-models (dashboard, management, report)
//! - [`routes`]: axum handlers and askama templates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod banking;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;
