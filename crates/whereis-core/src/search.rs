//! Name filter applied to a loaded collection
//!
//! Filtering is a display concern: it never touches storage and keeps the
//! collection's original order.

use crate::models::ItemRecord;

/// Records whose name contains `query`, ignoring case
///
/// An empty query matches everything.
pub fn filter_by_name<'a>(records: &'a [ItemRecord], query: &str) -> Vec<&'a ItemRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_name(r, &needle))
        .collect()
}

/// Owned variant of [`filter_by_name`]
pub fn retain_by_name(mut records: Vec<ItemRecord>, query: &str) -> Vec<ItemRecord> {
    let needle = query.to_lowercase();
    records.retain(|r| matches_name(r, &needle));
    records
}

fn matches_name(record: &ItemRecord, lowered_query: &str) -> bool {
    lowered_query.is_empty() || record.name.to_lowercase().contains(lowered_query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordFields, RecordId};

    fn records() -> Vec<ItemRecord> {
        vec![
            ItemRecord::from_fields(
                RecordId::new("1"),
                RecordFields::new("Test Note", "under the bed"),
            ),
            ItemRecord::from_fields(
                RecordId::new("2"),
                RecordFields::new("Another Note", "kitchen drawer"),
            ),
        ]
    }

    fn names(found: &[&ItemRecord]) -> Vec<String> {
        found.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_filter_any_case() {
        let records = records();
        for query in ["test", "TEST", "tEsT"] {
            assert_eq!(names(&filter_by_name(&records, query)), vec!["Test Note"]);
        }
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let records = records();
        assert_eq!(
            names(&filter_by_name(&records, "")),
            vec!["Test Note", "Another Note"]
        );
    }

    #[test]
    fn test_substring_in_middle() {
        let records = records();
        assert_eq!(names(&filter_by_name(&records, "r no")), vec!["Another Note"]);
        assert!(filter_by_name(&records, "carpet").is_empty());
    }

    #[test]
    fn test_description_is_not_searched() {
        let records = records();
        assert!(filter_by_name(&records, "kitchen").is_empty());
    }

    #[test]
    fn test_retain_by_name() {
        let kept = retain_by_name(records(), "NOTE");
        assert_eq!(kept.len(), 2);
        let kept = retain_by_name(records(), "another");
        assert_eq!(kept[0].id.as_str(), "2");
    }
}
