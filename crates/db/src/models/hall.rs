//! Hall reference model.

use kino_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `halls` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hall {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a hall. Halls are read-only over HTTP; this serves fixtures and tests.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHall {
    pub name: String,
}
