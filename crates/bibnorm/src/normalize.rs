//! Title capitalization normalization
//!
//! Rewrites `title` and `booktitle` values to sentence case: first
//! letter uppercase, everything else lowercase. When a colon separates
//! a title from a subtitle, the part before the colon is kept verbatim
//! and only the subtitle is lowercased. Values that use brace groups
//! to pin their casing are left alone.

use lazy_static::lazy_static;
use regex::Regex;

use super::entry::{Database, Entry};

/// Fields subject to recapitalization
const TITLE_FIELDS: [&str; 2] = ["title", "booktitle"];

lazy_static! {
    /// Whole value enclosed in braces, e.g. `{Exact Title}`
    static ref WRAPPED: Regex = Regex::new(r"^\{.*\}$").unwrap();
    /// Any brace group inside the value, e.g. `The {LaTeX} Companion`
    static ref BRACE_GROUP: Regex = Regex::new(r"\{.*?\}").unwrap();
}

/// True if the value's casing is pinned with braces and must not change
pub fn is_protected(value: &str) -> bool {
    WRAPPED.is_match(value) || BRACE_GROUP.is_match(value)
}

/// Apply the capitalization rule to a single title value
pub fn normalize_title(value: &str) -> String {
    if is_protected(value) {
        return value.to_string();
    }

    match value.split_once(':') {
        Some((title, subtitle)) => {
            // Rejoining with ": " re-adds the one space the split ate;
            // further leading whitespace is kept as-is
            let subtitle = subtitle.strip_prefix(' ').unwrap_or(subtitle);
            format!("{}: {}", title, subtitle.to_lowercase())
        }
        None => capitalize(value),
    }
}

/// Uppercase the first character, lowercase the rest
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(value.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Normalize the title fields of one entry, in place
pub fn normalize_entry(entry: &mut Entry) {
    for name in TITLE_FIELDS {
        if let Some(value) = entry.field_mut(name) {
            *value = normalize_title(value);
        }
    }
}

/// Normalize every entry of a database, in order
pub fn normalize_database(db: &mut Database) {
    for entry in &mut db.entries {
        normalize_entry(entry);
    }
}
