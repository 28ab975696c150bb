//! Response decoding: raw body text to typed records.
//!
//! # Design
//! The service answers failed requests with an HTML error page rather than a
//! status payload, and some transports hand back header preamble ahead of
//! the body. Decoding therefore starts at the first JSON marker (`[` for
//! array endpoints, `{` for object endpoints) and treats a body without one
//! as malformed. Field-level policy lives on the record types themselves:
//! required fields fail with a message naming the field, documented-optional
//! fields fall back to their sentinel.
//!
//! Each decoder targets exactly one wire revision. Checklist feeds use the
//! nested revision, where location fields sit under a `loc` sub-object; the
//! wire shape is private and flattened into [`Checklist`] here.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::types::Checklist;

fn payload_from(body: &str, marker: char) -> Result<&str, ApiError> {
    match body.find(marker) {
        Some(start) => Ok(&body[start..]),
        None => Err(ApiError::MalformedResponse(format!(
            "no `{marker}` payload marker in response body"
        ))),
    }
}

/// Decode an array-endpoint body into records, preserving source order.
pub fn decode_array<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ApiError> {
    let payload = payload_from(body, '[')?;
    serde_json::from_str(payload).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// Decode an object-endpoint body into a single record.
pub fn decode_object<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let payload = payload_from(body, '{')?;
    serde_json::from_str(payload).map_err(|e| ApiError::MalformedResponse(e.to_string()))
}

/// Nested-revision checklist wire shape. Subnational2 fields are absent for
/// locations above county granularity and default to empty.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireChecklist {
    loc_id: String,
    #[serde(rename = "subID")]
    sub_id: String,
    user_display_name: String,
    num_species: u32,
    obs_dt: String,
    #[serde(default)]
    obs_time: String,
    obs_month: String,
    obs_day: u32,
    obs_year: u32,
    loc: WireLocation,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLocation {
    name: String,
    latitude: f64,
    longitude: f64,
    country_code: String,
    country_name: String,
    subnational1_name: String,
    subnational1_code: String,
    #[serde(default)]
    subnational2_code: String,
    #[serde(default)]
    subnational2_name: String,
    is_hotspot: bool,
    hierarchical_name: String,
}

impl From<WireChecklist> for Checklist {
    fn from(wire: WireChecklist) -> Self {
        Checklist {
            loc_id: wire.loc_id,
            sub_id: wire.sub_id,
            user_display_name: wire.user_display_name,
            num_species: wire.num_species,
            obs_dt: wire.obs_dt,
            obs_time: wire.obs_time,
            obs_month: wire.obs_month,
            obs_day: wire.obs_day,
            obs_year: wire.obs_year,
            name: wire.loc.name,
            latitude: wire.loc.latitude,
            longitude: wire.loc.longitude,
            country_code: wire.loc.country_code,
            country_name: wire.loc.country_name,
            subnational1_name: wire.loc.subnational1_name,
            subnational1_code: wire.loc.subnational1_code,
            subnational2_name: wire.loc.subnational2_name,
            subnational2_code: wire.loc.subnational2_code,
            is_hotspot: wire.loc.is_hotspot,
            hierarchical_name: wire.loc.hierarchical_name,
        }
    }
}

/// Decode a checklist-feed body, flattening the `loc` sub-object.
pub fn decode_checklists(body: &str) -> Result<Vec<Checklist>, ApiError> {
    let wire: Vec<WireChecklist> = decode_array(body)?;
    Ok(wire.into_iter().map(Checklist::from).collect())
}
