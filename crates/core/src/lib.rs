//! Domain core for the screenings API.
//!
//! Pure building blocks with no I/O: shared types, the domain error enum,
//! sort-query parsing, request validation and media-type negotiation.

pub mod error;
pub mod media;
pub mod screening;
pub mod sort;
pub mod types;
