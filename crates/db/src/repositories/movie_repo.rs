//! Repository for the `movies` reference table.

use kino_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie};

const COLUMNS: &str = "id, title, director, cast_members, description, runtime_minutes";

/// Read access to movies, plus inserts for fixtures and tests.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies (title, director, cast_members, description, runtime_minutes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.director)
            .bind(&input.cast_members)
            .bind(&input.description)
            .bind(input.runtime_minutes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all movies ordered by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY title, id");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }
}
