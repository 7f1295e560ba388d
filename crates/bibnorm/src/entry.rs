//! BibTeX data structures

/// BibTeX entry type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Article,
    Book,
    Booklet,
    InBook,
    InCollection,
    InProceedings,
    Manual,
    MastersThesis,
    Misc,
    PhdThesis,
    Proceedings,
    TechReport,
    Unpublished,
    /// Unrecognized entry type, lowercased source spelling kept
    Other(String),
}

impl EntryKind {
    /// Parse an entry type from its source spelling (case-insensitive)
    pub fn from_source(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            "booklet" => Self::Booklet,
            "inbook" => Self::InBook,
            "incollection" => Self::InCollection,
            "inproceedings" | "conference" => Self::InProceedings,
            "manual" => Self::Manual,
            "mastersthesis" => Self::MastersThesis,
            "misc" => Self::Misc,
            "phdthesis" => Self::PhdThesis,
            "proceedings" => Self::Proceedings,
            "techreport" => Self::TechReport,
            "unpublished" => Self::Unpublished,
            _ => Self::Other(s.to_lowercase()),
        }
    }

    /// Canonical lowercase spelling used when serializing
    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::Booklet => "booklet",
            Self::InBook => "inbook",
            Self::InCollection => "incollection",
            Self::InProceedings => "inproceedings",
            Self::Manual => "manual",
            Self::MastersThesis => "mastersthesis",
            Self::Misc => "misc",
            Self::PhdThesis => "phdthesis",
            Self::Proceedings => "proceedings",
            Self::TechReport => "techreport",
            Self::Unpublished => "unpublished",
            Self::Other(s) => s.as_str(),
        }
    }
}

/// A single field (name-value pair) within an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// One bibliographic record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub cite_key: String,
    pub kind: EntryKind,
    /// Fields in source order
    pub fields: Vec<Field>,
}

impl Entry {
    pub fn new(cite_key: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            cite_key: cite_key.into(),
            kind,
            fields: Vec::new(),
        }
    }

    /// Append a field, keeping source order
    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Look up a field value by name (case-insensitive)
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    /// Mutable access to a field value by name (case-insensitive)
    pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        self.fields
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| &mut f.value)
    }
}

/// A parsed BibTeX file: entries plus the non-entry blocks that must
/// survive a round trip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Database {
    pub preambles: Vec<String>,
    /// @string definitions in source order
    pub strings: Vec<(String, String)>,
    pub entries: Vec<Entry>,
}

impl Database {
    /// Resolve a @string reference by name
    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(EntryKind::from_source("article"), EntryKind::Article);
        assert_eq!(EntryKind::from_source("ARTICLE"), EntryKind::Article);
        assert_eq!(
            EntryKind::from_source("conference"),
            EntryKind::InProceedings
        );
        assert_eq!(
            EntryKind::from_source("Patent"),
            EntryKind::Other("patent".to_string())
        );
    }

    #[test]
    fn test_other_kind_keeps_spelling() {
        let kind = EntryKind::from_source("Dataset");
        assert_eq!(kind.as_str(), "dataset");
    }

    #[test]
    fn test_field_access_is_case_insensitive() {
        let mut entry = Entry::new("Smith2024", EntryKind::Article);
        entry.add_field("Title", "A Great Paper");
        entry.add_field("YEAR", "2024");

        assert_eq!(entry.field("title"), Some("A Great Paper"));
        assert_eq!(entry.field("year"), Some("2024"));
        assert_eq!(entry.field("booktitle"), None);
    }

    #[test]
    fn test_field_mut_rewrites_in_place() {
        let mut entry = Entry::new("Smith2024", EntryKind::Article);
        entry.add_field("title", "old");
        *entry.field_mut("TITLE").unwrap() = "new".to_string();
        assert_eq!(entry.field("title"), Some("new"));
        assert_eq!(entry.fields.len(), 1);
    }

    #[test]
    fn test_string_lookup_keeps_order() {
        let db = Database {
            strings: vec![
                ("aap".to_string(), "Astronomy and Astrophysics".to_string()),
                ("nat".to_string(), "Nature".to_string()),
            ],
            ..Default::default()
        };
        assert_eq!(db.string("nat"), Some("Nature"));
        assert_eq!(db.string("apj"), None);
    }
}
