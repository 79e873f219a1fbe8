//! Multi-valued fields (genres, languages, personnel) are stored as a single
//! string joined with [`DELIMITER`].
//!
//! The encoding is lossy: a name that itself contains `", "` cannot be told
//! apart from two names. That limitation is kept so existing cache files stay
//! readable.

/// Separator between values in a delimited field.
pub const DELIMITER: &str = ", ";

/// Join names into a delimited field, skipping empty names.
///
/// Returns `None` when nothing is left, so an empty list serializes as an
/// empty CSV cell.
pub fn join<I, S>(names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = names
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(DELIMITER))
    }
}

/// Split a delimited field back into its values (trimmed, empties dropped).
pub fn split(field: &str) -> impl Iterator<Item = &str> {
    field.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// The first value of a delimited field, if any.
pub fn first(field: Option<&str>) -> Option<String> {
    field.and_then(|f| split(f).next()).map(str::to_string)
}

/// Whether any value of `field` is contained in `selected`.
pub fn any_in(field: Option<&str>, selected: &[String]) -> bool {
    field.is_some_and(|f| split(f).any(|v| selected.iter().any(|s| s == v)))
}
