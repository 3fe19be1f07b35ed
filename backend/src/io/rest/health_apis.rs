use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use shared::HealthResponse;

use crate::AppState;

/// Report liveness and the backend the next request would use
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        backend: state.expense_service.backend_name().to_string(),
    };
    (StatusCode::OK, Json(response))
}
