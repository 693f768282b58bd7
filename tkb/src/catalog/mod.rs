//! Course catalog: the in-memory list of offered sections for this session.
//!
//! Submodules:
//! - `csv`: tabular export (header row + positional fields)
//! - `sheets`: object-per-row records from the spreadsheet endpoint
//! - `source`: prioritized sources and the loader with fallback

pub mod csv;
pub mod sheets;
pub mod source;

pub use csv::{parse_csv, parse_csv_line};
pub use sheets::{parse_envelope, parse_records, parse_sheets_response, SheetRecord, SheetsEnvelope};
pub use source::{load_catalog, CatalogSource};

use crate::models::CourseSection;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<CourseSection>,
    index: HashMap<String, usize>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds the catalog keeping source order. A repeated id keeps its first row.
    pub fn new(sections: Vec<CourseSection>, source: impl Into<String>) -> Catalog {
        let mut kept = Vec::with_capacity(sections.len());
        let mut index = HashMap::with_capacity(sections.len());
        for s in sections {
            if index.contains_key(&s.id) {
                warn!(id = %s.id, "duplicate section id dropped");
                continue;
            }
            index.insert(s.id.clone(), kept.len());
            kept.push(s);
        }
        Catalog { sections: kept, index, source: source.into(), loaded_at: Utc::now() }
    }

    pub fn empty() -> Catalog {
        Catalog::new(Vec::new(), "none")
    }

    pub fn sections(&self) -> &[CourseSection] {
        &self.sections
    }

    pub fn get(&self, id: &str) -> Option<&CourseSection> {
        self.position(id).map(|i| &self.sections[i])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionRow;

    fn s(id: &str, title: &str) -> CourseSection {
        CourseSection::from_row(id.to_string(), SectionRow { title: title.to_string(), ..Default::default() })
    }

    #[test]
    fn first_duplicate_wins() {
        let cat = Catalog::new(vec![s("a", "first"), s("b", "b"), s("a", "second")], "test");
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.get("a").map(|x| x.title.as_str()), Some("first"));
        assert_eq!(cat.position("b"), Some(1));
        assert!(cat.get("zzz").is_none());
        assert_eq!(cat.source(), "test");
    }
}
