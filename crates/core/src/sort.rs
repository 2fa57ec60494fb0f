//! Sort-query parsing (`?sort=-showtime,movieTitle`).
//!
//! Turns a client-supplied, comma-separated token list into an `ORDER BY`
//! clause. Only names present in the caller's whitelist are ever emitted, and
//! the emitted text is the whitelist entry rather than the client's token, so
//! nothing the client sends reaches SQL as a raw identifier.
//!
//! Unknown tokens are dropped without an error.

/// Direction of a single sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL suffix for this direction (ascending is the SQL default).
    pub fn to_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "",
            SortDirection::Desc => " DESC",
        }
    }
}

/// A whitelisted sort key and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField<'a> {
    pub name: &'a str,
    pub direction: SortDirection,
}

/// Parse `raw` into the list of whitelisted sort keys, in input order.
///
/// A leading `-` marks a key as descending. Tokens whose bare name is not in
/// `whitelist` are skipped. Duplicates are kept.
pub fn parse_sort_fields<'a>(raw: Option<&str>, whitelist: &[&'a str]) -> Vec<SortField<'a>> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(',')
        .filter_map(|token| {
            let (bare, direction) = match token.strip_prefix('-') {
                Some(rest) => (rest, SortDirection::Desc),
                None => (token, SortDirection::Asc),
            };
            whitelist
                .iter()
                .find(|allowed| **allowed == bare)
                .map(|&name| SortField { name, direction })
        })
        .collect()
}

/// Render parsed sort keys as an `ORDER BY` clause, or `""` when empty.
pub fn render_order_by(fields: &[SortField<'_>]) -> String {
    if fields.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = fields
        .iter()
        .map(|f| format!("{}{}", f.name, f.direction.to_sql()))
        .collect();
    format!("ORDER BY {}", parts.join(", "))
}

/// Parse a sort query straight into an `ORDER BY` clause.
///
/// # Examples
///
/// ```
/// use kino_core::sort::parse_sort;
///
/// assert_eq!(parse_sort(Some("-id,bogus,text"), &["id", "text"]), "ORDER BY id DESC, text");
/// assert_eq!(parse_sort(None, &["id"]), "");
/// ```
pub fn parse_sort(raw: Option<&str>, whitelist: &[&str]) -> String {
    render_order_by(&parse_sort_fields(raw, whitelist))
}
