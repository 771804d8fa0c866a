//! Synchronous API client core for purging Misskey notes.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` supplied by the
//! caller performs the round-trip, so the whole pipeline runs against a
//! scripted transport in tests.
//!
//! # Design
//! - `MisskeyClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` and `parse_*`.
//! - `Purger` drives fetch → filter → delete sequentially over one transport.

pub mod client;
pub mod error;
pub mod filter;
pub mod http;
pub mod purge;
pub mod types;

pub use client::MisskeyClient;
pub use error::ApiError;
pub use filter::filter_by_substring;
pub use http::{HttpRequest, HttpResponse, Transport};
pub use purge::{DeleteOutcome, PurgeReport, Purger};
pub use types::{DeleteNote, Note, TimelineResponse};
