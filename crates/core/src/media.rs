//! Media-type negotiation for the JSON-only API.

use crate::error::CoreError;

/// The only representation the API produces and consumes.
pub const APPLICATION_JSON: &str = "application/json";

/// Whether an `Accept` header value admits `application/json`.
///
/// A missing header accepts anything. Otherwise at least one media range
/// must be `application/json`, `application/*` or `*/*` with a non-zero
/// quality.
pub fn accepts_json(accept: Option<&str>) -> bool {
    let Some(accept) = accept else {
        return true;
    };
    if accept.trim().is_empty() {
        return true;
    }

    accept.split(',').any(|range| {
        let mut parts = range.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let quality = parts
            .filter_map(|param| {
                let (key, value) = param.split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("q")
                    .then(|| value.trim().parse::<f32>().unwrap_or(0.0))
            })
            .next()
            .unwrap_or(1.0);

        quality > 0.0 && matches!(media.as_str(), APPLICATION_JSON | "application/*" | "*/*")
    })
}

/// Whether a `Content-Type` header value is `application/json`.
///
/// Parameters such as `charset` are ignored; a missing header never matches.
pub fn is_json_content(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(APPLICATION_JSON))
}

/// Fail with [`CoreError::NotAcceptable`] unless the client accepts JSON.
pub fn require_json_accept(accept: Option<&str>) -> Result<(), CoreError> {
    if accepts_json(accept) {
        Ok(())
    } else {
        Err(CoreError::NotAcceptable(format!(
            "Response is only available as {APPLICATION_JSON}"
        )))
    }
}

/// Fail with [`CoreError::UnsupportedMediaType`] unless the body is JSON.
pub fn require_json_content(content_type: Option<&str>) -> Result<(), CoreError> {
    if is_json_content(content_type) {
        Ok(())
    } else {
        Err(CoreError::UnsupportedMediaType(format!(
            "Request must be {APPLICATION_JSON}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_or_blank_accept_allows_json() {
        assert!(accepts_json(None));
        assert!(accepts_json(Some("")));
    }

    #[test]
    fn wildcards_and_exact_match() {
        assert!(accepts_json(Some("application/json")));
        assert!(accepts_json(Some("application/*")));
        assert!(accepts_json(Some("*/*")));
        assert!(accepts_json(Some("text/html, application/json;q=0.9")));
        assert!(accepts_json(Some("Application/JSON")));
    }

    #[test]
    fn other_types_are_not_acceptable() {
        assert!(!accepts_json(Some("text/html")));
        assert!(!accepts_json(Some("text/*, image/png")));
        assert!(!accepts_json(Some("application/xml")));
    }

    #[test]
    fn zero_quality_excludes_a_range() {
        assert!(!accepts_json(Some("application/json;q=0")));
        assert!(!accepts_json(Some("text/html, */*; q=0")));
        assert!(accepts_json(Some("application/json; q=0.1")));
    }

    #[test]
    fn content_type_essence() {
        assert!(is_json_content(Some("application/json")));
        assert!(is_json_content(Some("application/json; charset=utf-8")));
        assert!(!is_json_content(Some("text/plain")));
        assert!(!is_json_content(Some("application/jsonp")));
        assert!(!is_json_content(None));
    }

    #[test]
    fn require_helpers_map_to_error_variants() {
        assert_matches!(require_json_accept(Some("text/html")), Err(CoreError::NotAcceptable(_)));
        assert_matches!(
            require_json_content(Some("text/plain")),
            Err(CoreError::UnsupportedMediaType(_))
        );
        assert_matches!(require_json_content(Some("application/json")), Ok(()));
    }
}
