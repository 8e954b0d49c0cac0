use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rail_booking::BookingError;
use rail_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
            "category": "danger",
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::Duplicate(msg) => AppError::ConflictError(msg),
            CoreError::InternalError(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidRequest(msg) => AppError::ValidationError(msg),
            BookingError::TrainNotFound(_) => AppError::NotFoundError("Train not found.".to_string()),
            BookingError::SoldOut { .. } => AppError::ConflictError("No seats available.".to_string()),
            BookingError::PnrExhausted(_) => {
                AppError::ConflictError("Reservation failed. Please try again.".to_string())
            }
            BookingError::ReservationNotFound(_) => {
                AppError::NotFoundError("No confirmed reservation found for this PNR.".to_string())
            }
            BookingError::Store(e) => e.into(),
        }
    }
}
