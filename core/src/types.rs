//! Wire DTOs for the Misskey notes API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently so
//! integration tests catch drift between the two crates.

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// A single note on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Renotes and file-only notes come back with `"text": null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

/// Body of `/api/notes/global-timeline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub messages: Vec<Note>,
}

/// Body sent to `/api/notes/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNote {
    pub note_id: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn note_decodes_camel_case_fields() {
        let note: Note = serde_json::from_str(
            r#"{"id":"9abc","createdAt":"2024-01-02T03:04:05.678Z","text":"hello"}"#,
        )
        .unwrap();
        assert_eq!(note.id, "9abc");
        assert_eq!(note.created_at, datetime!(2024-01-02 03:04:05.678 UTC));
        assert_eq!(note.text, "hello");
    }

    #[test]
    fn null_text_becomes_empty() {
        let note: Note =
            serde_json::from_str(r#"{"id":"x","createdAt":"2024-01-02T03:04:05Z","text":null}"#)
                .unwrap();
        assert_eq!(note.text, "");
    }

    #[test]
    fn missing_text_becomes_empty() {
        let note: Note =
            serde_json::from_str(r#"{"id":"x","createdAt":"2024-01-02T03:04:05Z"}"#).unwrap();
        assert_eq!(note.text, "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let note: Note = serde_json::from_str(
            r#"{"id":"x","createdAt":"2024-01-02T03:04:05Z","text":"t","userId":"u1","visibility":"public"}"#,
        )
        .unwrap();
        assert_eq!(note.text, "t");
    }

    #[test]
    fn delete_note_serializes_note_id() {
        let body = serde_json::to_value(DeleteNote {
            note_id: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "noteId": "abc" }));
    }

    #[test]
    fn created_at_rejects_non_rfc3339() {
        let result: Result<Note, _> =
            serde_json::from_str(r#"{"id":"x","createdAt":"yesterday","text":"t"}"#);
        assert!(result.is_err());
    }
}
