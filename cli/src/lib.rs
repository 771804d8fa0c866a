//! Command-line front end for purging Misskey notes.
//!
//! Wires `Settings` and a `Transport` into a `purge_core::Purger` and prints
//! one line per delete attempt.

pub mod config;
pub mod logging;
pub mod transport;

use std::io::Write;

use anyhow::Context;
use purge_core::{ApiError, DeleteOutcome, PurgeReport, Purger, Transport};

pub use config::{Cli, ConfigError, Settings};
pub use transport::UreqTransport;

/// Run one purge pass and write a result line per attempted note to `out`.
///
/// Returns `Err` only when the timeline could not be fetched; per-note
/// failures are part of the report.
pub fn purge<T, W>(settings: &Settings, transport: T, out: &mut W) -> Result<PurgeReport, ApiError>
where
    T: Transport,
    W: Write,
{
    let purger = Purger::new(settings.client(), settings.token.as_str(), transport);
    purger.run(&settings.target, |outcome| {
        if let Err(e) = writeln!(out, "{}", describe(outcome)) {
            tracing::warn!(error = %e, "failed to write result line");
        }
    })
}

/// Resolve settings from `cli` and run one purge pass.
///
/// Configuration and timeline-fetch failures are the only errors; they happen
/// before any delete is attempted.
pub fn run<T, W>(cli: Cli, transport: T, out: &mut W) -> anyhow::Result<PurgeReport>
where
    T: Transport,
    W: Write,
{
    let settings = cli.into_settings().context("invalid configuration")?;
    tracing::debug!(?settings, "loaded settings");
    purge(&settings, transport, out).context("failed to fetch the global timeline")
}

/// Process exit status for a run: 0 once the run completed, even with failed
/// deletes; 1 when it stopped before processing notes.
pub fn exit_status(result: &anyhow::Result<PurgeReport>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

pub fn describe(outcome: &DeleteOutcome) -> String {
    match &outcome.result {
        Ok(()) => format!("deleted {}", outcome.note.id),
        Err(error) => format!("failed to delete {}: {error}", outcome.note.id),
    }
}
