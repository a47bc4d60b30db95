//! Contributor name canonicalisation.
//!
//! Keys are trimmed and lowercased. Nothing else is folded: `"Impactframes."`
//! and `"impactframes"` stay two different contributors, and homoglyphs are
//! left untouched. Historical totals depend on this, so it is not "fixed" here.

/// Canonicalise a raw contributor token.
///
/// Returns `None` when the token is empty after trimming; such tokens never
/// receive a share.
///
/// # Examples
///
/// ```
/// use equity_core::names::normalize_contributor;
///
/// assert_eq!(normalize_contributor("  Alice "), Some("alice".to_string()));
/// assert_eq!(normalize_contributor("   "), None);
/// ```
pub fn normalize_contributor(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalize every token, dropping the empty ones. Duplicates are kept.
pub fn normalize_all<'a, I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().filter_map(normalize_contributor).collect()
}
