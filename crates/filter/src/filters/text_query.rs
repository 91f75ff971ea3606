//! Case-insensitive free-text search over title and personal note.
//!
//! Besides filtering, this module computes the relevance used to order
//! text-search results: the character position of the earliest match across
//! both fields. Position 0 (the query starts the title or note) ranks first.

use crate::traits::Filter;
use catalog::Scene;

pub struct TextQueryFilter {
    needle: String,
}

impl TextQueryFilter {
    /// Build a filter from a raw query.
    ///
    /// Returns `None` when the query is empty after trimming: an empty query
    /// is no constraint at all.
    pub fn new(query: &str) -> Option<Self> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            None
        } else {
            Some(Self { needle })
        }
    }

    /// Earliest match position (in characters) in the title or note.
    pub fn match_position(&self, scene: &Scene) -> Option<usize> {
        let in_title = find_chars(&scene.title, &self.needle);
        let in_note = scene
            .personal_note
            .as_deref()
            .and_then(|note| find_chars(note, &self.needle));

        match (in_title, in_note) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Character offset of `needle` (already lowercase) in `haystack`, ignoring case.
fn find_chars(haystack: &str, needle: &str) -> Option<usize> {
    let lowered = haystack.to_lowercase();
    lowered
        .find(needle)
        .map(|byte_pos| lowered[..byte_pos].chars().count())
}

impl Filter for TextQueryFilter {
    fn name(&self) -> &str {
        "TextQueryFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        self.match_position(scene).is_some()
    }
}
