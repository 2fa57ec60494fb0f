pub mod health;
pub mod screening;

use axum::Router;

use crate::state::AppState;

/// Mount point of the versioned API.
pub const API_PREFIX: &str = "/api/v1";

/// Collection path of screenings, relative to [`API_PREFIX`].
pub const SCREENINGS_PATH: &str = "/naytokset";

/// Build the `/api/v1` route tree.
///
/// ```text
/// /naytokset           list, create
/// /naytokset/{id}      get, upsert, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest(SCREENINGS_PATH, screening::router())
}
