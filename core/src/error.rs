//! Error types for the eBird client core.
//!
//! # Design
//! Three kinds, matching the three ways a request can go wrong: the caller
//! supplied a value outside its documented domain (`OutOfRange`, raised at
//! the point of assignment), the service answered with something that is not
//! the expected JSON shape (`MalformedResponse`), or the transport
//! collaborator failed outright (`Transport`, propagated unchanged so
//! callers can tell "unreachable/rejected" from "unexpected shape"). Nothing
//! is retried here; retry policy belongs to the caller or the transport.

use std::fmt;

use crate::transport::TransportError;

/// Errors surfaced by parameter setters, the argument assembler, and the
/// endpoint functions.
#[derive(Debug)]
pub enum ApiError {
    /// A caller-supplied value falls outside its documented range or
    /// vocabulary. Carries the parameter name and the offending value.
    OutOfRange { param: &'static str, value: String },

    /// The response body could not be decoded as the expected JSON shape,
    /// including bodies with no JSON payload at all (the service answered
    /// with an error page) and payloads missing a required field.
    MalformedResponse(String),

    /// The transport collaborator could not complete the request.
    Transport(TransportError),
}

impl ApiError {
    pub(crate) fn out_of_range(param: &'static str, value: impl ToString) -> Self {
        ApiError::OutOfRange {
            param,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::OutOfRange { param, value } => {
                write!(f, "value `{value}` is out of range for parameter `{param}`")
            }
            ApiError::MalformedResponse(msg) => {
                write!(f, "malformed response: {msg}")
            }
            ApiError::Transport(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::Transport(err)
    }
}
