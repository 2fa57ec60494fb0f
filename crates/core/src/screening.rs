//! Screening request validation.
//!
//! Path ids and JSON bodies are checked here before any store access. Body
//! validation walks the fields in a fixed order (`showtime`, `movieId`,
//! `hallId`) and stops at the first failure, so clients always see the same
//! message for the same bad payload.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{DbId, Showtime};

/* --------------------------------------------------------------------------
   Constants
   -------------------------------------------------------------------------- */

/// Fields of the screening view a client may sort by.
///
/// Each entry is also the SQL output-column alias used by the list query.
pub const SCREENING_SORT_FIELDS: &[&str] = &[
    "id",
    "showtime",
    "hallName",
    "movieTitle",
    "director",
    "runtimeMinutes",
];

/// JSON key of the showtime field.
pub const FIELD_SHOWTIME: &str = "showtime";

/// JSON key of the movie reference.
pub const FIELD_MOVIE_ID: &str = "movieId";

/// JSON key of the hall reference.
pub const FIELD_HALL_ID: &str = "hallId";

/// Naive formats accepted for `showtime`, tried in order.
const SHOWTIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/* --------------------------------------------------------------------------
   Types
   -------------------------------------------------------------------------- */

/// A validated create/update payload.
///
/// Only [`validate_screening_body`] constructs this from client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningInput {
    pub showtime: Showtime,
    pub movie_id: DbId,
    pub hall_id: DbId,
}

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate a path id: an integer with no decimal point.
pub fn validate_id(raw: &str) -> Result<DbId, CoreError> {
    if raw.contains('.') {
        return Err(invalid_id());
    }
    raw.parse::<DbId>().map_err(|_| invalid_id())
}

fn invalid_id() -> CoreError {
    CoreError::Validation("id must be an integer".to_string())
}

/// Validate a create/update body and build the typed input.
pub fn validate_screening_body(body: &Value) -> Result<ScreeningInput, CoreError> {
    let Value::Object(fields) = body else {
        return Err(CoreError::Validation(
            "body must be a JSON object".to_string(),
        ));
    };

    let showtime = required(fields.get(FIELD_SHOWTIME), FIELD_SHOWTIME)?;
    let showtime = match showtime {
        Value::String(s) => parse_showtime(s).ok_or_else(|| {
            CoreError::Validation(format!("{FIELD_SHOWTIME} must be a valid timestamp"))
        })?,
        _ => {
            return Err(CoreError::Validation(format!(
                "{FIELD_SHOWTIME} must be a string"
            )))
        }
    };

    let movie_id = integer_field(fields.get(FIELD_MOVIE_ID), FIELD_MOVIE_ID)?;
    let hall_id = integer_field(fields.get(FIELD_HALL_ID), FIELD_HALL_ID)?;

    Ok(ScreeningInput {
        showtime,
        movie_id,
        hall_id,
    })
}

/// Parse a showtime string.
///
/// Naive timestamps are taken as-is; RFC 3339 values with an offset are
/// converted to UTC before the zone is dropped.
pub fn parse_showtime(raw: &str) -> Option<NaiveDateTime> {
    SHOWTIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_utc())
        })
}

/// Absent keys and explicit `null` both count as missing.
fn required<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a Value, CoreError> {
    match value {
        None | Some(Value::Null) => Err(CoreError::Validation(format!("{field} is required"))),
        Some(v) => Ok(v),
    }
}

/// Integral JSON numbers are accepted even when written with a fraction
/// (`1.0`); anything with a fractional part or outside `i64` is not.
fn integer_field(value: Option<&Value>, field: &str) -> Result<DbId, CoreError> {
    let value = required(value, field)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().and_then(integral_f64))
        .ok_or_else(|| CoreError::Validation(format!("{field} must be an integer")))
}

fn integral_f64(n: f64) -> Option<DbId> {
    // `i64::MAX as f64` rounds up to 2^63, hence the exclusive upper bound.
    let in_range = n >= i64::MIN as f64 && n < i64::MAX as f64;
    (n.fract() == 0.0 && in_range).then_some(n as DbId)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;

    fn message(err: CoreError) -> String {
        match err {
            CoreError::Validation(msg) => msg,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    // -- validate_id --------------------------------------------------------

    #[test]
    fn id_accepts_integers() {
        assert_eq!(validate_id("12").unwrap(), 12);
        assert_eq!(validate_id("0").unwrap(), 0);
    }

    #[test]
    fn id_rejects_non_integers() {
        for raw in ["12.5", "12.", "abc", "", "1e3", "9223372036854775808"] {
            assert_eq!(
                message(validate_id(raw).unwrap_err()),
                "id must be an integer",
                "input {raw:?}"
            );
        }
    }

    // -- validate_screening_body --------------------------------------------

    #[test]
    fn valid_body() {
        let input = validate_screening_body(&json!({
            "showtime": "2024-01-01T20:00",
            "movieId": 1,
            "hallId": 2
        }))
        .unwrap();

        assert_eq!(
            input,
            ScreeningInput {
                showtime: at(2024, 1, 1, 20, 0, 0),
                movie_id: 1,
                hall_id: 2,
            }
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let input = validate_screening_body(&json!({
            "id": 99,
            "showtime": "2024-01-01 20:00:00",
            "movieId": 1,
            "hallId": 1,
            "note": "premiere"
        }));
        assert_matches!(input, Ok(ScreeningInput { movie_id: 1, hall_id: 1, .. }));
    }

    #[test]
    fn body_must_be_object() {
        assert_eq!(
            message(validate_screening_body(&json!([1, 2])).unwrap_err()),
            "body must be a JSON object"
        );
    }

    #[test]
    fn missing_fields_in_checked_order() {
        assert_eq!(
            message(validate_screening_body(&json!({})).unwrap_err()),
            "showtime is required"
        );
        assert_eq!(
            message(validate_screening_body(&json!({"showtime": "2024-01-01T20:00"})).unwrap_err()),
            "movieId is required"
        );
        assert_eq!(
            message(
                validate_screening_body(&json!({"showtime": "2024-01-01T20:00", "movieId": 1}))
                    .unwrap_err()
            ),
            "hallId is required"
        );
    }

    #[test]
    fn null_counts_as_missing() {
        assert_eq!(
            message(
                validate_screening_body(&json!({"showtime": null, "movieId": 1, "hallId": 1}))
                    .unwrap_err()
            ),
            "showtime is required"
        );
    }

    #[test]
    fn integral_floats_are_integers() {
        let input = validate_screening_body(&json!({
            "showtime": "2024-01-01T20:00",
            "movieId": 1.0,
            "hallId": 3e0
        }))
        .unwrap();
        assert_eq!((input.movie_id, input.hall_id), (1, 3));
    }

    #[test]
    fn fractional_and_out_of_range_numbers_are_rejected() {
        for bad in [json!(1.5), json!(-0.25), json!(1e19), json!(18446744073709551615u64)] {
            let err = validate_screening_body(&json!({
                "showtime": "2024-01-01T20:00",
                "movieId": bad,
                "hallId": 1
            }))
            .unwrap_err();
            assert_eq!(message(err), "movieId must be an integer", "input {bad}");
        }
    }

    #[test]
    fn first_failing_field_wins() {
        // Both movieId and hallId are bad; only movieId is reported.
        let err = validate_screening_body(&json!({
            "showtime": "2024-01-01T20:00",
            "movieId": "1",
            "hallId": 1.5
        }))
        .unwrap_err();
        assert_eq!(message(err), "movieId must be an integer");
    }

    #[test]
    fn showtime_type_errors() {
        assert_eq!(
            message(
                validate_screening_body(&json!({"showtime": 1700000000, "movieId": 1, "hallId": 1}))
                    .unwrap_err()
            ),
            "showtime must be a string"
        );
        assert_eq!(
            message(
                validate_screening_body(&json!({"showtime": "tomorrow", "movieId": 1, "hallId": 1}))
                    .unwrap_err()
            ),
            "showtime must be a valid timestamp"
        );
    }

    #[test]
    fn fractional_ids_are_rejected() {
        let err = validate_screening_body(&json!({
            "showtime": "2024-01-01T20:00",
            "movieId": 1,
            "hallId": 2.5
        }))
        .unwrap_err();
        assert_eq!(message(err), "hallId must be an integer");
    }

    // -- parse_showtime -----------------------------------------------------

    #[test]
    fn showtime_formats() {
        assert_eq!(parse_showtime("2024-01-01T20:00"), Some(at(2024, 1, 1, 20, 0, 0)));
        assert_eq!(parse_showtime("2024-01-01T20:00:30"), Some(at(2024, 1, 1, 20, 0, 30)));
        assert_eq!(parse_showtime("2024-01-01 20:00"), Some(at(2024, 1, 1, 20, 0, 0)));
        assert_eq!(
            parse_showtime("2024-01-01T20:00:00+02:00"),
            Some(at(2024, 1, 1, 18, 0, 0))
        );
        assert_eq!(parse_showtime("2024-01-01T20:00:00Z"), Some(at(2024, 1, 1, 20, 0, 0)));
        assert_eq!(parse_showtime("2024-13-01T20:00"), None);
        assert_eq!(parse_showtime(""), None);
    }
}
