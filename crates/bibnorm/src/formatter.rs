//! BibTeX serialization
//!
//! Writes a [`Database`] back out as BibTeX text: @preamble blocks
//! first, then @string definitions in source order, then entries in
//! source order.

use super::entry::{Database, Entry};

/// Serialize a full database, trailing newline included
pub fn format_database(db: &Database) -> String {
    let mut blocks = Vec::new();

    for preamble in &db.preambles {
        blocks.push(format!("@preamble{{\"{}\"}}", preamble));
    }
    for (name, value) in &db.strings {
        blocks.push(format!("@string{{{} = {{{}}}}}", name, value));
    }
    for entry in &db.entries {
        blocks.push(format_entry(entry));
    }

    if blocks.is_empty() {
        return String::new();
    }
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

/// Serialize a single entry
pub fn format_entry(entry: &Entry) -> String {
    let mut out = String::new();

    out.push('@');
    out.push_str(entry.kind.as_str());
    out.push('{');
    out.push_str(&entry.cite_key);
    out.push(',');
    out.push('\n');

    for field in &entry.fields {
        out.push_str("    ");
        out.push_str(&field.name);
        out.push_str(" = ");
        out.push_str(&format_value(&field.value));
        out.push(',');
        out.push('\n');
    }

    out.push('}');
    out
}

/// Brace a field value; bare numbers stay bare
fn format_value(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        return value.to_string();
    }
    format!("{{{}}}", value)
}
