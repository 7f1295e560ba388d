//! BibTeX title capitalization normalizer
//!
//! Reads a BibTeX file, rewrites every `title` and `booktitle` field to
//! sentence case (only the first letter uppercase, subtitles after a
//! colon fully lowercased), and writes the result back out. Values that
//! pin their casing with brace groups are never touched.
//!
//! ```
//! let input = "@article{Key, title = {DEEP LEARNING}}";
//! let mut db = bibnorm::parse(input).unwrap();
//! bibnorm::normalize_database(&mut db);
//! assert_eq!(db.entries[0].field("title"), Some("Deep learning"));
//! ```

mod entry;
mod formatter;
mod normalize;
pub mod parser;

pub use entry::{Database, Entry, EntryKind, Field};
pub use formatter::{format_database, format_entry};
pub use normalize::{is_protected, normalize_database, normalize_entry, normalize_title};
pub use parser::{parse, ParseError};
