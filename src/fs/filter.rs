//! Search over the current listing.

use super::FileEntry;

/// Entries whose name contains `query`, ignoring case.
///
/// Order is preserved and `entries` is left untouched. An empty query
/// matches everything.
pub fn filter_entries(entries: &[FileEntry], query: &str) -> Vec<FileEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<FileEntry> {
        vec![
            FileEntry::file("Report.TXT", "/Report.TXT", 10),
            FileEntry::directory("archive", "/archive"),
            FileEntry::file("notes.md", "/notes.md", 0),
            FileEntry::file("readme.txt", "/readme.txt", 4),
        ]
    }

    #[test]
    fn test_empty_query_is_identity() {
        assert_eq!(filter_entries(&listing(), ""), listing());
    }

    #[test]
    fn test_case_insensitive_and_ordered() {
        let names: Vec<String> = filter_entries(&listing(), "txt")
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Report.TXT", "readme.txt"]);

        let names: Vec<String> = filter_entries(&listing(), "RE")
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Report.TXT", "readme.txt"]);
    }

    #[test]
    fn test_idempotent() {
        let all = listing();
        for q in ["", "a", "e", "txt", "zzz", "R"] {
            let once = filter_entries(&all, q);
            assert_eq!(filter_entries(&once, q), once);
        }
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_entries(&listing(), "z").is_empty());
    }

    #[test]
    fn test_source_untouched() {
        let all = listing();
        let _ = filter_entries(&all, "notes");
        assert_eq!(all, listing());
    }
}
