use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

use crate::entities::booking;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The requested stay collides with bookings already holding the room.
    #[error("{message}")]
    Conflict {
        message: String,
        conflicting_bookings: Vec<booking::Model>,
    },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn room_unavailable(conflicting_bookings: Vec<booking::Model>) -> Self {
        AppError::Conflict {
            message: "Room is not available for the requested dates".to_string(),
            conflicting_bookings,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation failed", "errors": errors }),
            ),
            AppError::Conflict {
                message,
                conflicting_bookings,
            } => (
                StatusCode::BAD_REQUEST,
                json!({ "message": message, "conflictingBookings": conflicting_bookings }),
            ),
            AppError::Database(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "A record with the same unique value already exists", "error": detail }),
                ),
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": "Record is still referenced by other records", "error": detail }),
                ),
                _ => {
                    tracing::error!(error = %err, "Database failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "message": "Database error", "error": err.to_string() }),
                    )
                }
            },
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": message }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
