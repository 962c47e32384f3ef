//! Input validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Collapses runs of underscores left behind by sanitization
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());

/// Sanitize a client-supplied filename so it is safe to echo and log.
///
/// Path components are stripped, whitespace becomes `_`, and only
/// ASCII alphanumerics plus `.`, `_` and `-` survive. Leading and
/// trailing dots and underscores are removed.
pub fn secure_filename(filename: &str) -> String {
    // Keep only the final path component
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let mut sanitized = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_whitespace() {
            sanitized.push('_');
        } else if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            sanitized.push(ch);
        }
    }

    let collapsed = UNDERSCORE_RUN.replace_all(&sanitized, "_");
    collapsed.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Extract the lowercase file extension, if any
pub fn file_extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
