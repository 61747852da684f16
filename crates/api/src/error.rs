//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DepotError, ShoppingListError};
use repository::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Error surfaced by the application service.
    Depot(DepotError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Depot(err) => depot_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn depot_error_to_response(err: DepotError) -> (StatusCode, String) {
    match &err {
        DepotError::ShoppingList(list_err) => match list_err {
            ShoppingListError::InvalidStateTransition { .. } => {
                (StatusCode::CONFLICT, err.to_string())
            }
            ShoppingListError::NoItems | ShoppingListError::InvalidQuantity { .. } => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
        },
        DepotError::NotFound(_)
        | DepotError::StoreNotFound(_)
        | DepotError::ProductNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        DepotError::Store(StoreError::ConcurrencyConflict { .. }) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        DepotError::Store(_) | DepotError::Publish(_) => {
            tracing::error!(error = %err, "infrastructure failure");
            (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
        }
    }
}

impl From<DepotError> for ApiError {
    fn from(err: DepotError) -> Self {
        ApiError::Depot(err)
    }
}
