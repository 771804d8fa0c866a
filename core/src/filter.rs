use crate::types::Note;

/// Keep the notes whose text contains `target`, in their original order.
///
/// Matching is a plain case-sensitive substring test. An empty `target`
/// matches every note.
pub fn filter_by_substring(notes: Vec<Note>, target: &str) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|note| note.text.contains(target))
        .collect()
}
