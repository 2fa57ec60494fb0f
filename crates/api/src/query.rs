//! Query parameter types for API handlers.

/// Sort parameter for list endpoints (`?sort=-showtime,movieTitle`).
///
/// Parsed against a per-resource whitelist by
/// [`kino_core::sort::parse_sort`]; unknown fields are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortParams {
    pub sort: Option<String>,
}

impl SortParams {
    /// Build from decoded query pairs. When `sort` is repeated the first
    /// occurrence is used; other keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let sort = pairs
            .iter()
            .find(|(key, _)| key == "sort")
            .map(|(_, value)| value.clone());
        Self { sort }
    }
}
