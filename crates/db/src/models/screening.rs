//! Screening row and its joined read projection.

use kino_core::types::{DbId, Showtime, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `screenings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Screening {
    pub id: DbId,
    pub showtime: Showtime,
    pub movie_id: DbId,
    pub hall_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A screening joined with its movie and hall, as returned to clients.
///
/// The camelCase columns are selected under unquoted aliases, which Postgres
/// folds to lowercase; the `sqlx` renames follow that folding.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningView {
    pub id: DbId,
    pub showtime: Showtime,
    #[sqlx(rename = "hallname")]
    pub hall_name: String,
    #[sqlx(rename = "movietitle")]
    pub movie_title: String,
    pub director: Option<String>,
    #[serde(rename = "cast")]
    pub cast_members: Option<String>,
    pub description: Option<String>,
    #[sqlx(rename = "runtimeminutes")]
    pub runtime_minutes: Option<i32>,
}
