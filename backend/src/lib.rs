//! # Expense Tracker Backend
//!
//! Non-UI logic for the expense tracker:
//! - **Storage**: key-value, local file and null backends behind one trait
//! - **Domain**: validation and the add/delete/list/total operations
//! - **IO**: REST API consumed by the presentation layer
//!
//! ```text
//! Presentation (browser form + list)
//!     ↓
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (ExpenseService)
//!     ↓
//! Storage Layer (backend chosen per call from the environment)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::ConfigSource;
use crate::domain::ExpenseService;
use crate::storage::BackendSelector;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
}

impl AppState {
    pub fn new(expense_service: ExpenseService) -> Self {
        Self { expense_service }
    }
}

/// Wire the services over a selector that reads `source` on every call
pub fn initialize_backend(source: Arc<dyn ConfigSource>) -> AppState {
    let selector = BackendSelector::new(source);
    info!("Storage backend at startup: {}", selector.current_kind().name());

    AppState::new(ExpenseService::new(Arc::new(selector)))
}

/// Create the router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/expenses", get(io::list_expenses).post(io::create_expense))
        .route("/expenses/:id", delete(io::delete_expense))
        .route("/total", get(io::get_total))
        .route("/health", get(io::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
