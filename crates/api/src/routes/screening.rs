//! Route definitions for screenings ("naytokset").

use axum::routing::get;
use axum::Router;

use crate::handlers::screening;
use crate::state::AppState;

/// Routes mounted at `/naytokset`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get
/// PUT    /{id}   -> upsert
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(screening::list).post(screening::create))
        .route(
            "/{id}",
            get(screening::get)
                .put(screening::upsert)
                .delete(screening::delete),
        )
}
