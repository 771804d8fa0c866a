//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `MisskeyClient` builds
//! `HttpRequest` values and parses `HttpResponse` values; a `Transport`
//! implementation performs the actual round-trip. Every Misskey API endpoint
//! is a `POST`, so the request carries no method field.

use crate::error::ApiError;

/// An HTTP `POST` request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// An HTTP response described as plain data. The body is kept as raw bytes;
/// only the parser decides whether it has to be UTF-8 JSON.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes one request against the network.
///
/// Implementations must hand back non-2xx responses as `Ok`; status
/// interpretation belongs to the `parse_*` methods. Only failures to send the
/// request or read the response map to `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
