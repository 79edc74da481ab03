//! Unified error handling with a stable `{ error, details? }` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::models::filters::InvalidYear;
use crate::store::StoreError;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} is required")]
    MissingParam(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Request timed out")]
    Timeout,
}

impl AppError {
    pub fn missing(field: &str) -> Self {
        Self::MissingParam(field.to_string())
    }

    pub fn invalid(name: &str) -> Self {
        Self::Validation(format!("Invalid {name}"))
    }
}

impl From<InvalidYear> for AppError {
    fn from(_: InvalidYear) -> Self {
        Self::invalid("year")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingParam(_) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new(self.to_string()))
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "Backing call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Failed to fetch analytics data").with_details(e.to_string()),
                )
            }
            AppError::Timeout => {
                tracing::warn!("Request exceeded the configured timeout");
                (StatusCode::REQUEST_TIMEOUT, ErrorBody::new(self.to_string()))
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_param_message() {
        let err = AppError::missing("Product ID");
        assert_eq!(err.to_string(), "Product ID is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_year_maps_to_validation() {
        let err: AppError = InvalidYear.into();
        assert_eq!(err.to_string(), "Invalid year");
    }

    #[test]
    fn store_error_is_server_error() {
        let err: AppError = StoreError::Failed("boom".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn timeout_uses_envelope() {
        let response = AppError::Timeout.into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, ErrorBody::new("Request timed out"));
    }

    #[test]
    fn error_body_omits_empty_details() {
        let json = serde_json::to_value(ErrorBody::new("Invalid year")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid year" }));
    }

    #[test]
    fn app_error_from_sqlx() {
        let err: AppError = StoreError::from_sqlx(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, AppError::Store(StoreError::Database(_))));
    }
}
