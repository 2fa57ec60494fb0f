//! Handlers for the `/naytokset` resource.
//!
//! Every handler runs the same pipeline: accept negotiation, content-type
//! negotiation for body-bearing requests, validation, then one repository
//! call under the store deadline. Nothing reaches the store until the
//! request has passed validation.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use kino_core::error::CoreError;
use kino_core::media::{require_json_accept, require_json_content};
use kino_core::screening::{
    validate_id, validate_screening_body, ScreeningInput, SCREENING_SORT_FIELDS,
};
use kino_core::sort::parse_sort;
use kino_core::types::DbId;
use kino_db::repositories::{DeleteOutcome, ScreeningRepo};
use serde_json::Value;

use super::{accept_header, content_type_header, with_store_deadline};
use crate::error::{AppError, AppResult};
use crate::query::SortParams;
use crate::routes::{API_PREFIX, SCREENINGS_PATH};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse and validate a create/update body.
fn read_body(body: &Bytes) -> AppResult<ScreeningInput> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest("body must be valid JSON".to_string()))?;
    Ok(validate_screening_body(&value)?)
}

/// Canonical URL of a screening, used for the `Location` header.
fn screening_location(state: &AppState, id: DbId) -> String {
    let base = state.config.public_base_url.as_deref().unwrap_or("");
    format!("{base}{API_PREFIX}{SCREENINGS_PATH}/{id}")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/naytokset?sort=-showtime,movieTitle
///
/// List all screenings. Unknown sort fields are ignored, and a repeated
/// `sort` key uses its first value.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    require_json_accept(accept_header(&headers))?;
    let Query(pairs) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let params = SortParams::from_pairs(&pairs);

    let order_by = parse_sort(params.sort.as_deref(), SCREENING_SORT_FIELDS);
    tracing::debug!(sort = ?params.sort, %order_by, "Listing screenings");

    let screenings = with_store_deadline(&state, ScreeningRepo::list(&state.pool, &order_by)).await?;
    tracing::debug!(count = screenings.len(), "Listed screenings");
    Ok(Json(screenings))
}

/// GET /api/v1/naytokset/{id}
///
/// Fetch one screening view, or 404.
pub async fn get(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_json_accept(accept_header(&headers))?;
    let id = validate_id(&raw_id)?;

    let screening = with_store_deadline(&state, ScreeningRepo::find_by_id(&state.pool, id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screening",
            id,
        }))?;
    Ok(Json(screening))
}

/// POST /api/v1/naytokset
///
/// Create a screening with a store-assigned id. Responds 201 with a
/// `Location` header pointing at the new resource.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    require_json_accept(accept_header(&headers))?;
    require_json_content(content_type_header(&headers))?;
    let input = read_body(&body)?;

    let created = with_store_deadline(&state, ScreeningRepo::create(&state.pool, &input)).await?;
    tracing::info!(id = created.id, movie_id = input.movie_id, hall_id = input.hall_id, "Screening created");

    let location = HeaderValue::from_str(&screening_location(&state, created.id))
        .map_err(|e| AppError::InternalError(format!("invalid Location header: {e}")))?;
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

/// PUT /api/v1/naytokset/{id}
///
/// Create or replace the screening at `id`. Responds 200 in both cases.
pub async fn upsert(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    require_json_accept(accept_header(&headers))?;
    require_json_content(content_type_header(&headers))?;
    let id = validate_id(&raw_id)?;
    let input = read_body(&body)?;

    let screening =
        with_store_deadline(&state, ScreeningRepo::upsert(&state.pool, id, &input)).await?;
    tracing::info!(id, movie_id = input.movie_id, hall_id = input.hall_id, "Screening upserted");
    Ok(Json(screening))
}

/// DELETE /api/v1/naytokset/{id}
///
/// 204 when a row was removed, 404 when none matched. No body either way.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = validate_id(&raw_id)?;

    let outcome = with_store_deadline(&state, ScreeningRepo::delete(&state.pool, id)).await?;
    match outcome {
        DeleteOutcome::Deleted => {
            tracing::info!(id, "Screening deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteOutcome::NotFound => Ok(StatusCode::NOT_FOUND),
    }
}
