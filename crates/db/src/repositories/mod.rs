//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod hall_repo;
pub mod movie_repo;
pub mod screening_repo;

pub use hall_repo::HallRepo;
pub use movie_repo::MovieRepo;
pub use screening_repo::{DeleteOutcome, ScreeningRepo, MAX_ID_ATTEMPTS};
