//! Repository for the `halls` reference table.

use kino_core::types::DbId;
use sqlx::PgPool;

use crate::models::hall::{CreateHall, Hall};

/// Read access to halls, plus inserts for fixtures and tests.
pub struct HallRepo;

impl HallRepo {
    /// Insert a new hall, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateHall) -> Result<Hall, sqlx::Error> {
        sqlx::query_as::<_, Hall>("INSERT INTO halls (name) VALUES ($1) RETURNING id, name")
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Hall>, sqlx::Error> {
        sqlx::query_as::<_, Hall>("SELECT id, name FROM halls WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all halls ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Hall>, sqlx::Error> {
        sqlx::query_as::<_, Hall>("SELECT id, name FROM halls ORDER BY name, id")
            .fetch_all(pool)
            .await
    }
}
