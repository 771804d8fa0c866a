//! Error types for the Misskey API client.
//!
//! # Design
//! Timeline decoding failures and delete rejections get separate variants
//! because the pipeline treats them differently: a bad timeline aborts the
//! run, a rejected delete is reported and the run moves on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The timeline body was not valid JSON or not `{"messages": [...]}`.
    #[error("failed to decode timeline: {0}")]
    Decode(String),

    /// The delete endpoint answered with something other than 200.
    #[error("delete rejected with HTTP {status}")]
    Delete { status: u16 },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of a rejected delete, if that is what this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Delete { status } => Some(*status),
            _ => None,
        }
    }
}
