//! # REST API
//!
//! axum handlers, one module per resource.

pub mod expense_apis;
pub mod health_apis;

pub use expense_apis::*;
pub use health_apis::*;
