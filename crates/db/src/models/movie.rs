//! Movie reference model.

use kino_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub director: Option<String>,
    #[serde(rename = "cast")]
    pub cast_members: Option<String>,
    pub description: Option<String>,
    pub runtime_minutes: Option<i32>,
}

/// DTO for creating a movie. Movies are read-only over HTTP; this serves fixtures and tests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    pub title: String,
    pub director: Option<String>,
    #[serde(rename = "cast")]
    pub cast_members: Option<String>,
    pub description: Option<String>,
    pub runtime_minutes: Option<i32>,
}
