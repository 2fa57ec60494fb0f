pub mod screening;

use std::future::Future;

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::HeaderMap;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Run a store call under the configured per-request deadline.
///
/// A stalled store surfaces as [`AppError::StoreTimeout`] instead of holding
/// the request (and its pooled connection) open indefinitely.
pub(crate) async fn with_store_deadline<T, F>(state: &AppState, call: F) -> AppResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let limit = state.config.store_timeout();
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => Err(AppError::StoreTimeout(limit)),
    }
}

/// `Accept` header as text, if present and valid UTF-8.
pub(crate) fn accept_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(ACCEPT).and_then(|v| v.to_str().ok())
}

/// `Content-Type` header as text, if present and valid UTF-8.
pub(crate) fn content_type_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}
