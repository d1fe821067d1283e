//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::repository::RepositoryError;
use crate::store::StoreError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Event not found: home team {home_team}, date {event_date}")]
    EventNotFound { home_team: String, event_date: i64 },

    // Server errors (5xx)
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidArgument(msg) => AppError::InvalidRequest(msg),
            RepositoryError::NotFound {
                home_team,
                event_date,
            } => AppError::EventNotFound {
                home_team,
                event_date,
            },
            RepositoryError::Store(e) => AppError::Store(e),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 404 Not Found
            AppError::EventNotFound {
                home_team,
                event_date,
            } => (
                StatusCode::NOT_FOUND,
                "event_not_found",
                Some(format!("{}@{}", home_team, event_date)),
            ),

            // 503 Service Unavailable
            AppError::Store(StoreError::Unavailable(msg)) => {
                tracing::warn!("Store unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", None)
            }
            AppError::Store(StoreError::IndexNotReady(index)) => {
                tracing::warn!("Index not ready: {}", index);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "index_not_ready",
                    Some(index.to_string()),
                )
            }

            // 500 Internal Server Error
            AppError::Store(StoreError::Database(e)) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_map_to_app_errors() {
        let err: AppError = RepositoryError::invalid_argument("empty").into();
        assert!(matches!(err, AppError::InvalidRequest(_)));

        let err: AppError = RepositoryError::NotFound {
            home_team: "Lions".to_string(),
            event_date: 1,
        }
        .into();
        assert!(matches!(err, AppError::EventNotFound { .. }));

        let err: AppError = RepositoryError::Store(StoreError::IndexNotReady("City-Index")).into();
        assert!(matches!(err, AppError::Store(StoreError::IndexNotReady(_))));
    }

    #[test]
    fn test_status_codes_cover_every_variant() {
        let cases = vec![
            (AppError::InvalidRequest("x".to_string()), StatusCode::BAD_REQUEST),
            (
                AppError::EventNotFound {
                    home_team: "Lions".to_string(),
                    event_date: 1,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Store(StoreError::Unavailable("down".to_string())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Store(StoreError::IndexNotReady("City-Index")),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Store(StoreError::Database(sqlx::Error::PoolClosed)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
