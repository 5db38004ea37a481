//! Record matching over the in-memory directory.
//!
//! # Responsibility
//! - Select records for a console search query.
//!
//! # Invariants
//! - A record matches when the query is a substring of its directory key, or
//!   when the query equals one of its field values exactly.
//! - Matching is case-sensitive; field values are never substring-matched.
//! - Results follow directory iteration order.

use crate::model::directory::Directory;
use crate::model::record::Record;

/// Returns records whose key contains `query` or whose fields equal it.
///
/// An empty query is a substring of every key and returns all records.
pub fn search_records<'a>(directory: &'a Directory, query: &str) -> Vec<&'a Record> {
    directory
        .iter()
        .filter(|(key, record)| key.contains(query) || record.has_field_value(query))
        .map(|(_, record)| record)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::search_records;
    use crate::model::directory::Directory;
    use crate::model::record::{Record, RecordId};

    fn directory_with(records: &[(&str, &str, &str, Option<&str>)]) -> Directory {
        let mut directory = Directory::new();
        for (first, last, phone, birth) in records {
            directory.insert(
                RecordId::new(first, last),
                Record::new(*first, *last, *phone, birth.map(str::to_string)),
            );
        }
        directory
    }

    #[test]
    fn phone_matches_only_exactly() {
        let directory = directory_with(&[("John", "Smith", "89991234567", None)]);

        assert_eq!(search_records(&directory, "89991234567").len(), 1);
        assert!(search_records(&directory, "8999").is_empty());
    }

    #[test]
    fn key_matches_by_substring() {
        let directory = directory_with(&[
            ("John", "Smith", "89991234567", None),
            ("Jane", "Doe", "89990000000", None),
        ]);

        let hits = search_records(&directory, "n_S");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name, "Smith");
    }

    #[test]
    fn search_is_case_sensitive() {
        let directory = directory_with(&[("John", "Smith", "89991234567", None)]);
        assert!(search_records(&directory, "john").is_empty());
    }

    #[test]
    fn birth_date_matches_exactly() {
        let directory = directory_with(&[("John", "Smith", "89991234567", Some("15.05.1990"))]);

        assert_eq!(search_records(&directory, "15.05.1990").len(), 1);
        assert!(search_records(&directory, "1990").is_empty());
    }

    #[test]
    fn renamed_record_matches_new_name_only_exactly() {
        let mut directory = Directory::new();
        directory.insert(
            RecordId::new("John", "Smith"),
            Record::new("Jonathan", "Smith", "89991234567", None),
        );

        assert_eq!(search_records(&directory, "Jonathan").len(), 1);
        assert!(search_records(&directory, "Jonath").is_empty());
        assert_eq!(search_records(&directory, "John").len(), 1);
    }

    #[test]
    fn empty_query_returns_everything() {
        let directory = directory_with(&[
            ("John", "Smith", "89991234567", None),
            ("Jane", "Doe", "89990000000", None),
        ]);
        assert_eq!(search_records(&directory, "").len(), 2);
    }
}
