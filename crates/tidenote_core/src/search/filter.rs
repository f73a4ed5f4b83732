//! Case-insensitive substring filtering over the note collection.
//!
//! # Invariants
//! - Filtering never mutates or reorders the collection; hits keep stored
//!   order.
//! - An empty query matches every note.

use crate::model::note::Note;

/// Returns the notes whose title or content contains `query`,
/// case-insensitively, preserving stored order.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return notes.iter().collect();
    }

    notes
        .iter()
        .filter(|note| note_matches(note, &needle))
        .collect()
}

fn note_matches(note: &Note, needle_lower: &str) -> bool {
    note.title.to_lowercase().contains(needle_lower)
        || note.content.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::filter_notes;
    use crate::model::note::Note;
    use chrono::Utc;

    fn note(id: &str, title: &str, content: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_query_returns_all_in_stored_order() {
        let notes = vec![note("2", "b", "y"), note("1", "a", "x")];
        let hits = filter_notes(&notes, "");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "2");
        assert_eq!(hits[1].id, "1");
    }

    #[test]
    fn match_is_case_insensitive_across_title_and_content() {
        let notes = vec![
            note("1", "Groceries", "milk"),
            note("2", "work", "Quarterly REPORT"),
            note("3", "misc", "nothing here"),
        ];

        let by_title = filter_notes(&notes, "GROC");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "1");

        let by_content = filter_notes(&notes, "report");
        assert_eq!(by_content.len(), 1);
        assert_eq!(by_content[0].id, "2");
    }

    #[test]
    fn unmatched_query_returns_empty() {
        let notes = vec![note("1", "a", "b")];
        assert!(filter_notes(&notes, "zzz").is_empty());
    }
}
