//! In-process stand-in for the two Misskey endpoints the purge tool calls.
//!
//! Notes are seeded up front; delete statuses can be forced per note id, and
//! every delete request is recorded so tests can assert exactly which ids were
//! attempted. All handlers check the `Authorization` header against the
//! configured token.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub created_at: String,
    pub text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNote {
    pub note_id: String,
}

#[derive(Debug, Default)]
struct Inner {
    notes: Vec<Note>,
    forced_statuses: HashMap<String, u16>,
    delete_attempts: Vec<String>,
}

/// Shared mock state. Clones share the same notes and attempt log.
#[derive(Clone, Debug)]
pub struct MockMisskey {
    token: Arc<str>,
    inner: Arc<Mutex<Inner>>,
}

impl MockMisskey {
    pub fn new(token: &str) -> Self {
        Self {
            token: Arc::from(token),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn with_note(self, id: &str, created_at: &str, text: Option<&str>) -> Self {
        self.lock().notes.push(Note {
            id: id.to_string(),
            created_at: created_at.to_string(),
            text: text.map(str::to_string),
        });
        self
    }

    /// Answer deletes of `id` with `status` instead of the normal outcome.
    pub fn with_delete_status(self, id: &str, status: u16) -> Self {
        self.lock().forced_statuses.insert(id.to_string(), status);
        self
    }

    /// Notes still on the timeline.
    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    /// Every `noteId` the delete endpoint received, in arrival order.
    pub fn delete_attempts(&self) -> Vec<String> {
        self.lock().delete_attempts.clone()
    }

    pub fn app(&self) -> Router {
        Router::new()
            .route("/api/notes/global-timeline", post(global_timeline))
            .route("/api/notes/delete", post(delete_note))
            .with_state(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == &*self.token)
    }
}

pub async fn run(listener: TcpListener, mock: MockMisskey) -> Result<(), std::io::Error> {
    axum::serve(listener, mock.app()).await
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": { "code": code, "message": message } }))).into_response()
}

fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "AUTHENTICATION_FAILED", "Authentication failed.")
}

async fn global_timeline(State(mock): State<MockMisskey>, headers: HeaderMap) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "messages": mock.notes() })).into_response()
}

async fn delete_note(
    State(mock): State<MockMisskey>,
    headers: HeaderMap,
    Json(input): Json<DeleteNote>,
) -> Response {
    mock.lock().delete_attempts.push(input.note_id.clone());
    if !mock.authorized(&headers) {
        return unauthorized();
    }

    let mut inner = mock.lock();
    if let Some(&status) = inner.forced_statuses.get(&input.note_id) {
        info!(note_id = %input.note_id, status, "forced delete status");
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error_response(status, "FORCED", "Forced failure.");
    }

    match inner.notes.iter().position(|note| note.id == input.note_id) {
        Some(index) => {
            inner.notes.remove(index);
            info!(note_id = %input.note_id, "note deleted");
            StatusCode::OK.into_response()
        }
        None => error_response(StatusCode::NOT_FOUND, "NO_SUCH_NOTE", "No such note."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_camel_case() {
        let note = Note {
            id: "n1".to_string(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            text: None,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "n1");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00.000Z");
        assert!(json["text"].is_null());
    }

    #[test]
    fn delete_note_requires_note_id() {
        let result: Result<DeleteNote, _> = serde_json::from_str(r#"{"id":"n1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn clones_share_state() {
        let mock = MockMisskey::new("t").with_note("n1", "2024-01-01T00:00:00Z", Some("x"));
        let other = mock.clone();
        other.lock().delete_attempts.push("n1".to_string());
        assert_eq!(mock.delete_attempts(), ["n1"]);
        assert_eq!(mock.notes().len(), 1);
    }

    #[test]
    fn authorization_must_match_exactly() {
        let mock = MockMisskey::new("secret");
        let mut headers = HeaderMap::new();
        assert!(!mock.authorized(&headers));
        headers.insert(AUTHORIZATION, "Bearer secret".parse().unwrap());
        assert!(!mock.authorized(&headers));
        headers.insert(AUTHORIZATION, "secret".parse().unwrap());
        assert!(mock.authorized(&headers));
    }
}
