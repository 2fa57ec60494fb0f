use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kino_core::error::CoreError;
use kino_db::StoreErrorKind;
use serde::Serialize;

/// Message returned to clients for every 5xx; details stay in the logs.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Everything a handler can fail with.
///
/// [`IntoResponse`] is the only place these become status codes. Client
/// errors echo their message; server errors are logged and answered with
/// [`INTERNAL_MESSAGE`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Connection, pool or statement failure reported by sqlx.
    #[error("Store error: {0}")]
    Database(#[from] sqlx::Error),

    /// A store call exceeded the per-request deadline.
    #[error("Store call timed out after {0:?}")]
    StoreTimeout(Duration),

    /// The request could not be read at all (e.g. the body is not JSON).
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire shape of every error response.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl AppError {
    /// Status, machine-readable code and client-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Core(CoreError::NotAcceptable(msg)) => {
                (StatusCode::NOT_ACCEPTABLE, "NOT_ACCEPTABLE", msg.clone())
            }
            AppError::Core(CoreError::UnsupportedMediaType(msg)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Database(_) | AppError::StoreTimeout(_) | AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            ),
        }
    }

    /// Record server-side failures before their details are discarded.
    fn log(&self) {
        match self {
            AppError::Database(err) => {
                let kind = StoreErrorKind::classify(err);
                tracing::error!(error = %err, kind = kind.as_str(), "Store call failed");
            }
            AppError::StoreTimeout(limit) => tracing::error!(
                timeout_ms = limit.as_millis() as u64,
                kind = StoreErrorKind::Unavailable.as_str(),
                "Store call exceeded deadline"
            ),
            AppError::InternalError(msg) => tracing::error!(error = %msg, "Internal error"),
            AppError::Core(_) | AppError::BadRequest(_) => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}
