//! Transport collaborator boundary.
//!
//! # Design
//! The core never performs I/O. Endpoint functions hand a fully-assembled
//! URL plus the `X-eBirdApiToken` header to a [`Transport`] implementation
//! supplied by the caller, which returns the raw response body as text or a
//! distinguishable failure. No streaming, batching, retries, or timeouts are
//! required of implementations; anything synchronous that can issue one GET
//! with one custom header qualifies.

use std::fmt;

/// Executes a single HTTP GET on behalf of the core.
pub trait Transport {
    /// Perform a GET against `url` with the given headers and return the
    /// response body as text.
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<String, TransportError>;
}

/// Opaque failure from a [`Transport`] implementation: unreachable service,
/// rejected request, or any other condition that prevented a body from
/// coming back. Propagated unchanged as [`ApiError::Transport`].
///
/// [`ApiError::Transport`]: crate::error::ApiError::Transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failure: {}", self.0)
    }
}

impl std::error::Error for TransportError {}
