//! Stateless HTTP request builder and response parser for the Misskey notes API.
//!
//! # Design
//! `MisskeyClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the round-trip in between belongs to a
//! `Transport`.

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{DeleteNote, Note, TimelineResponse};

const GLOBAL_TIMELINE_PATH: &str = "/api/notes/global-timeline";
const DELETE_NOTE_PATH: &str = "/api/notes/delete";

/// Synchronous, stateless client for the Misskey notes API.
#[derive(Debug, Clone)]
pub struct MisskeyClient {
    base_url: String,
}

impl MisskeyClient {
    /// Client for a server address given without scheme, e.g. `misskey.io`.
    /// Requests always go over HTTPS.
    pub fn new(host: &str) -> Self {
        Self::with_base_url(&format!("https://{}", host.trim_end_matches('/')))
    }

    /// Client for an explicit base URL including scheme.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_global_timeline(&self, token: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{}{GLOBAL_TIMELINE_PATH}", self.base_url),
            headers: vec![("authorization".to_string(), token.to_string())],
            body: None,
        }
    }

    pub fn build_delete_note(&self, token: &str, note_id: &str) -> Result<HttpRequest, ApiError> {
        let payload = DeleteNote {
            note_id: note_id.to_string(),
        };
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            url: format!("{}{DELETE_NOTE_PATH}", self.base_url),
            headers: vec![
                ("authorization".to_string(), token.to_string()),
                ("content-type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    /// Decode a timeline body. The status code is not checked: whatever the
    /// server sent is decoded, and an error body surfaces as `Decode`.
    pub fn parse_global_timeline(&self, response: HttpResponse) -> Result<Vec<Note>, ApiError> {
        if !(200..300).contains(&response.status) {
            warn!(status = response.status, "global timeline answered with non-success status");
        }
        serde_json::from_slice::<TimelineResponse>(&response.body)
            .map(|timeline| timeline.messages)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Only an exact 200 counts as deleted.
    pub fn parse_delete_note(&self, response: HttpResponse) -> Result<(), ApiError> {
        if response.status == 200 {
            return Ok(());
        }
        Err(ApiError::Delete {
            status: response.status,
        })
    }
}
