//! Repository for the `screenings` table and its movie/hall projection.

use kino_core::screening::ScreeningInput;
use kino_core::types::DbId;
use sqlx::PgPool;

use crate::models::screening::{Screening, ScreeningView};

/// Column list for raw `screenings` rows.
const COLUMNS: &str = "id, showtime, movie_id, hall_id, created_at, updated_at";

/// The fixed three-way join behind [`ScreeningView`].
///
/// Output aliases match the sort whitelist
/// ([`kino_core::screening::SCREENING_SORT_FIELDS`]), so a parsed
/// `ORDER BY` clause resolves against them directly. Inner joins drop any
/// screening whose movie or hall is missing.
const VIEW_SELECT: &str = "SELECT s.id, s.showtime, h.name AS hallName, \
        m.title AS movieTitle, m.director, m.cast_members, m.description, \
        m.runtime_minutes AS runtimeMinutes \
     FROM screenings s \
     JOIN movies m ON m.id = s.movie_id \
     JOIN halls h ON h.id = s.hall_id";

/// Sequence draws [`ScreeningRepo::create`] makes before giving up when
/// every drawn id is already taken by a client-chosen one.
pub const MAX_ID_ATTEMPTS: u32 = 64;

/// Result of a delete by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Provides the screening data operations.
pub struct ScreeningRepo;

impl ScreeningRepo {
    /// List every screening view, ordered by `order_by`.
    ///
    /// `order_by` must come from [`kino_core::sort::parse_sort`]; it is
    /// spliced into the statement verbatim. An empty clause leaves ordering
    /// to the store.
    pub async fn list(pool: &PgPool, order_by: &str) -> Result<Vec<ScreeningView>, sqlx::Error> {
        let query = if order_by.is_empty() {
            VIEW_SELECT.to_string()
        } else {
            format!("{VIEW_SELECT} {order_by}")
        };
        sqlx::query_as::<_, ScreeningView>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find the view of a single screening. `None` means no such screening.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ScreeningView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE s.id = $1");
        sqlx::query_as::<_, ScreeningView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the raw stored row, bookkeeping columns included.
    pub async fn find_row(pool: &PgPool, id: DbId) -> Result<Option<Screening>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screenings WHERE id = $1");
        sqlx::query_as::<_, Screening>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a screening with a store-assigned id and return its view.
    ///
    /// Ids are drawn from `screenings_id_seq`. Ids chosen by clients through
    /// [`Self::upsert`] live in the same space, so a drawn id that is already
    /// taken is skipped and the next one tried, up to [`MAX_ID_ATTEMPTS`].
    pub async fn create(pool: &PgPool, input: &ScreeningInput) -> Result<ScreeningView, sqlx::Error> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let inserted: Option<(DbId,)> = sqlx::query_as(
                "INSERT INTO screenings (id, showtime, movie_id, hall_id) \
                 VALUES (nextval('screenings_id_seq'), $1, $2, $3) \
                 ON CONFLICT (id) DO NOTHING \
                 RETURNING id",
            )
            .bind(input.showtime)
            .bind(input.movie_id)
            .bind(input.hall_id)
            .fetch_optional(pool)
            .await?;

            if let Some((id,)) = inserted {
                return Self::refetch(pool, id).await;
            }
            tracing::debug!(attempt, "Sequence id already taken, drawing the next one");
        }

        tracing::warn!(attempts = MAX_ID_ATTEMPTS, "No free screening id found");
        Err(sqlx::Error::Protocol(format!(
            "no free screening id after {MAX_ID_ATTEMPTS} attempts"
        )))
    }

    /// Insert or update the screening with a client-chosen `id`.
    ///
    /// A single `INSERT ... ON CONFLICT (id) DO UPDATE` keyed on `id`, so
    /// concurrent calls cannot both insert. The update is skipped when the
    /// stored values already match, which makes repeated identical calls
    /// leave the row untouched. The id sequence is not touched; [`Self::create`]
    /// steps over ids taken here.
    pub async fn upsert(
        pool: &PgPool,
        id: DbId,
        input: &ScreeningInput,
    ) -> Result<ScreeningView, sqlx::Error> {
        let written: Option<(DbId,)> = sqlx::query_as(
            "INSERT INTO screenings (id, showtime, movie_id, hall_id) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET \
                showtime = EXCLUDED.showtime, \
                movie_id = EXCLUDED.movie_id, \
                hall_id = EXCLUDED.hall_id, \
                updated_at = NOW() \
             WHERE (screenings.showtime, screenings.movie_id, screenings.hall_id) \
                IS DISTINCT FROM (EXCLUDED.showtime, EXCLUDED.movie_id, EXCLUDED.hall_id) \
             RETURNING id",
        )
        .bind(id)
        .bind(input.showtime)
        .bind(input.movie_id)
        .bind(input.hall_id)
        .fetch_optional(pool)
        .await?;

        tracing::debug!(id, changed = written.is_some(), "Screening upserted");
        Self::refetch(pool, id).await
    }

    /// Delete a screening by id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<DeleteOutcome, sqlx::Error> {
        let result = sqlx::query("DELETE FROM screenings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(if result.rows_affected() == 0 {
            DeleteOutcome::NotFound
        } else {
            DeleteOutcome::Deleted
        })
    }

    /// Re-read a row that was just written. Foreign keys guarantee the join
    /// matches, so a miss is reported as `RowNotFound`.
    async fn refetch(pool: &PgPool, id: DbId) -> Result<ScreeningView, sqlx::Error> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}
