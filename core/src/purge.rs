//! The fetch → filter → delete pipeline.
//!
//! Runs strictly sequentially over one `Transport`. A failed fetch aborts the
//! run before anything is deleted; a failed delete is recorded and the next
//! note is still attempted. Nothing is retried.

use tracing::{debug, info, warn};

use crate::client::MisskeyClient;
use crate::error::ApiError;
use crate::filter::filter_by_substring;
use crate::http::Transport;
use crate::types::Note;

/// Result of one delete attempt.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub note: Note,
    pub result: Result<(), ApiError>,
}

impl DeleteOutcome {
    pub fn is_deleted(&self) -> bool {
        self.result.is_ok()
    }
}

/// Everything a finished run did, in attempt order.
#[derive(Debug, Default)]
pub struct PurgeReport {
    pub fetched: usize,
    pub outcomes: Vec<DeleteOutcome>,
}

impl PurgeReport {
    pub fn matched(&self) -> usize {
        self.outcomes.len()
    }

    pub fn deleted(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_deleted()).count()
    }

    pub fn failed(&self) -> usize {
        self.matched() - self.deleted()
    }
}

pub struct Purger<T> {
    client: MisskeyClient,
    token: String,
    transport: T,
}

impl<T: Transport> Purger<T> {
    pub fn new(client: MisskeyClient, token: impl Into<String>, transport: T) -> Self {
        Self {
            client,
            token: token.into(),
            transport,
        }
    }

    pub fn client(&self) -> &MisskeyClient {
        &self.client
    }

    /// One request to the global timeline, decoded in server order.
    pub fn fetch_global_timeline(&self) -> Result<Vec<Note>, ApiError> {
        let request = self.client.build_global_timeline(&self.token);
        debug!(url = %request.url, "fetching global timeline");
        let response = self.transport.execute(request)?;
        let notes = self.client.parse_global_timeline(response)?;
        info!(count = notes.len(), "fetched global timeline");
        Ok(notes)
    }

    /// One delete request for `note_id`.
    pub fn delete_post(&self, note_id: &str) -> Result<(), ApiError> {
        let request = self.client.build_delete_note(&self.token, note_id)?;
        let response = self.transport.execute(request)?;
        self.client.parse_delete_note(response)
    }

    /// Fetch, filter by `target`, then attempt to delete every match.
    ///
    /// `on_outcome` sees each attempt as soon as it finishes. Only a fetch
    /// failure returns `Err`.
    pub fn run<F>(&self, target: &str, mut on_outcome: F) -> Result<PurgeReport, ApiError>
    where
        F: FnMut(&DeleteOutcome),
    {
        let notes = self.fetch_global_timeline()?;
        let fetched = notes.len();
        let matches = filter_by_substring(notes, target);
        info!(fetched, matched = matches.len(), "filtered timeline");

        let mut outcomes = Vec::with_capacity(matches.len());
        for note in matches {
            let result = self.delete_post(&note.id);
            match &result {
                Ok(()) => info!(note_id = %note.id, "deleted note"),
                Err(error) => warn!(note_id = %note.id, %error, "failed to delete note"),
            }
            let outcome = DeleteOutcome { note, result };
            on_outcome(&outcome);
            outcomes.push(outcome);
        }

        let report = PurgeReport { fetched, outcomes };
        info!(
            fetched = report.fetched,
            matched = report.matched(),
            deleted = report.deleted(),
            failed = report.failed(),
            "purge finished"
        );
        Ok(report)
    }
}
