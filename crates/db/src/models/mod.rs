//! Domain model structs.
//!
//! Each submodule contains a `FromRow` struct matching a table row or a
//! joined projection. Screening writes go through
//! [`kino_core::screening::ScreeningInput`] rather than a DTO here.

pub mod hall;
pub mod movie;
pub mod screening;
