/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All bookkeeping timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Screening showtimes are wall-clock local to the cinema, stored without a zone.
pub type Showtime = chrono::NaiveDateTime;
