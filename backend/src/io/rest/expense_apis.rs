//! # REST API for Expenses
//!
//! Endpoints for listing, adding and deleting expenses and for the running
//! total. Validation problems are `400`, a backend that cannot save is `503`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{
    format_currency, AddExpenseRequest, AddExpenseResponse, DeleteExpenseResponse, ErrorResponse,
    ExpenseListResponse, ExpenseTotalResponse,
};
use tracing::{error, info, warn};

use crate::domain::ExpenseError;
use crate::AppState;

fn error_response(e: ExpenseError) -> Response {
    match e {
        ExpenseError::Validation(e) => {
            warn!("Rejected expense: {}", e);
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(e.to_string()))).into_response()
        }
        ExpenseError::Storage(e) => {
            error!("Storage failure: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// List all expenses in insertion order
pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    let listing = state.expense_service.list_expenses().await;
    if let Some(cause) = &listing.degraded {
        warn!("Serving empty expense list: {}", cause);
    }

    (
        StatusCode::OK,
        Json(ExpenseListResponse {
            expenses: listing.expenses,
            total: listing.total,
        }),
    )
}

/// Add an expense from submitted form fields
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<AddExpenseRequest>,
) -> Response {
    info!("POST /api/expenses - request: {:?}", request);

    match state.expense_service.add_expense(request).await {
        Ok(expense) => (
            StatusCode::CREATED,
            Json(AddExpenseResponse {
                success: true,
                expense,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Delete an expense by id; unknown ids are not an error
pub async fn delete_expense(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    info!("DELETE /api/expenses/{}", id);

    match state.expense_service.delete_expense(&id).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(DeleteExpenseResponse {
                success: true,
                deleted,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Sum of all expense amounts
pub async fn get_total(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/total");

    let total = state.expense_service.total().await;
    (
        StatusCode::OK,
        Json(ExpenseTotalResponse {
            total,
            formatted_total: format_currency(total),
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::domain::ExpenseService;
    use crate::storage::{
        ExpenseStorage, FixedBackend, KeyValueStorage, MemoryKeyValueClient, NullStorage,
    };
    use crate::{create_router, AppState};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderValue, Method, Request, StatusCode};
    use axum::Router;
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use shared::{
        AddExpenseResponse, DeleteExpenseResponse, ErrorResponse, ExpenseListResponse,
        ExpenseTotalResponse, HealthResponse,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router_with(storage: Arc<dyn ExpenseStorage>) -> Router {
        let state = AppState::new(ExpenseService::new(Arc::new(FixedBackend::new(storage))));
        create_router(state, HeaderValue::from_static("http://localhost:8080"))
    }

    fn memory_router() -> Router {
        router_with(Arc::new(KeyValueStorage::new(MemoryKeyValueClient::new())))
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let router = memory_router();

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/expenses",
            Some(json!({"category": "Food", "description": "Lunch", "amount": "12.50"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: AddExpenseResponse = parse(&body);
        assert!(created.success);
        assert_eq!(created.expense.amount, 12.5);

        let (status, body) = send(&router, Method::GET, "/api/expenses", None).await;
        assert_eq!(status, StatusCode::OK);
        let listing: ExpenseListResponse = parse(&body);
        assert_eq!(listing.expenses, vec![created.expense]);
        assert_eq!(listing.total, 12.5);
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let router = memory_router();

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/expenses",
            Some(json!({"category": "Food", "description": "Lunch", "amount": "-1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorResponse = parse(&body);
        assert_eq!(error.error, "Amount must be greater than 0");

        let only_category = Some(json!({"category": "Food"}));
        let (status, body) = send(&router, Method::POST, "/api/expenses", only_category).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(parse::<ErrorResponse>(&body).error, "All fields are required");
    }

    #[tokio::test]
    async fn test_create_without_storage_is_unavailable() {
        let router = router_with(Arc::new(NullStorage::new()));

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/expenses",
            Some(json!({"category": "Food", "description": "Lunch", "amount": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(parse::<ErrorResponse>(&body).error, "no storage backend is configured");

        let (status, body) = send(&router, Method::GET, "/api/expenses", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(parse::<ExpenseListResponse>(&body).expenses.is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_total() {
        let router = memory_router();
        let mut ids = Vec::new();
        let forms = [("Food", "Lunch", "12.50"), ("Transit", "Bus", "2.75")];
        for (category, description, amount) in forms {
            let (_, body) = send(
                &router,
                Method::POST,
                "/api/expenses",
                Some(json!({"category": category, "description": description, "amount": amount})),
            )
            .await;
            ids.push(parse::<AddExpenseResponse>(&body).expense.id);
        }

        let (_, body) = send(&router, Method::GET, "/api/total", None).await;
        let total: ExpenseTotalResponse = parse(&body);
        assert_eq!(total.total, 15.25);
        assert_eq!(total.formatted_total, "$15.25");

        let uri = format!("/api/expenses/{}", ids[0]);
        let (status, body) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(parse::<DeleteExpenseResponse>(&body).deleted);

        let (status, body) = send(&router, Method::DELETE, "/api/expenses/unknown", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!parse::<DeleteExpenseResponse>(&body).deleted);

        let (_, body) = send(&router, Method::GET, "/api/total", None).await;
        assert_eq!(parse::<ExpenseTotalResponse>(&body).formatted_total, "$2.75");
    }

    #[tokio::test]
    async fn test_health_names_backend() {
        let router = memory_router();
        let (status, body) = send(&router, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        let health: HealthResponse = parse(&body);
        assert_eq!(health.status, "ok");
        assert_eq!(health.backend, "key-value");
    }
}
