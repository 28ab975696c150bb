//! Typed client core for the eBird 2.0 web service.
//!
//! # Overview
//! Translates request intents into query-parameterized URLs and remote JSON
//! payloads back into typed records. The core performs no network I/O of its
//! own: endpoint functions hand assembled URLs to an injected [`Transport`]
//! and decode whatever body comes back.
//!
//! # Design
//! - [`DataParams`] holds the optional request modifiers with per-field
//!   validation and default elision (the service infers "unspecified" from a
//!   parameter's absence).
//! - [`query`] assembles and encodes fragment lists; each endpoint declares
//!   the parameter subset it supports as a `const` table.
//! - [`decode`] maps body text into the record types, tolerating the
//!   service's documented field omissions and rejecting error pages.
//! - [`Requester`] composes the layers per endpoint; everything below the
//!   transport is a reentrant pure function over immutable inputs.

pub mod client;
pub mod decode;
pub mod error;
pub mod params;
pub mod query;
pub mod transport;
pub mod types;

pub use client::{ChecklistSort, Requester, DEFAULT_BASE_URL, TOKEN_HEADER};
pub use error::ApiError;
pub use params::{DataParams, DataSort, Detail, ParamKind, Rank, VALID_CATEGORIES};
pub use transport::{Transport, TransportError};
pub use types::{Checklist, DetailedObservation, Observation, RegionalStats, Top100Entry};
