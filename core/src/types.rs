//! Record types mirroring the eBird 2.0 response shapes.
//!
//! Wire names are camelCase; fields follow the service's vocabulary
//! (`comName`, `obsDt`, ...) so decoded records read like the payloads they
//! came from. All records are immutable value objects produced by the
//! decoder; none are mutated after construction.

use serde::{Deserialize, Serialize};

/// A single sighting from the observation endpoints, simple detail level.
///
/// `howMany` is absent when the contributor logged presence without a count
/// (an "x" entry); the decoder substitutes 0 for those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub species_code: String,
    pub com_name: String,
    pub sci_name: String,
    pub loc_id: String,
    pub loc_name: String,
    pub obs_dt: String,
    #[serde(default)]
    pub how_many: u32,
    pub lat: f64,
    pub lng: f64,
    pub obs_valid: bool,
    pub obs_reviewed: bool,
    pub location_private: bool,
}

/// A sighting at the full detail level: the [`Observation`] fields plus
/// contributor identity, checklist/observation identifiers, and
/// administrative region names and codes.
///
/// The service also repeats the location id under a second key at this
/// detail level; that duplicate is not carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedObservation {
    #[serde(flatten)]
    pub base: Observation,
    pub checklist_id: String,
    pub country_code: String,
    pub country_name: String,
    pub first_name: String,
    pub last_name: String,
    pub user_display_name: String,
    pub has_comments: bool,
    pub has_rich_media: bool,
    pub obs_id: String,
    pub presence_noted: bool,
    pub sub_id: String,
    pub subnational1_code: String,
    pub subnational1_name: String,
    pub subnational2_code: String,
    pub subnational2_name: String,
}

/// Dropping the detail-only fields is lossy and one-way.
impl From<DetailedObservation> for Observation {
    fn from(detailed: DetailedObservation) -> Self {
        detailed.base
    }
}

/// One checklist from the `product/lists` feeds, flattened: location fields
/// the service nests under a `loc` sub-object are lifted to the top level by
/// the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub loc_id: String,
    pub sub_id: String,
    pub user_display_name: String,
    pub num_species: u32,
    pub obs_dt: String,
    pub obs_time: String,
    pub obs_month: String,
    pub obs_day: u32,
    pub obs_year: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
    pub country_name: String,
    pub subnational1_name: String,
    pub subnational1_code: String,
    pub subnational2_name: String,
    pub subnational2_code: String,
    pub is_hotspot: bool,
    pub hierarchical_name: String,
}

/// One row of a `product/top100` ranking.
///
/// `profileHandle` is withheld for contributors without a public profile;
/// the decoder substitutes `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Top100Entry {
    #[serde(default = "withheld_handle")]
    pub profile_handle: String,
    pub user_display_name: String,
    pub num_species: u32,
    pub num_complete_checklists: u32,
    pub row_num: u32,
    pub user_id: String,
}

fn withheld_handle() -> String {
    "N/A".to_string()
}

/// Aggregate counts for a region on a date, from `product/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalStats {
    pub num_checklists: u32,
    pub num_contributors: u32,
    pub num_species: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detailed_observation_converts_to_base() {
        let detailed: DetailedObservation = serde_json::from_value(serde_json::json!({
            "speciesCode": "calqua",
            "comName": "California Quail",
            "sciName": "Callipepla californica",
            "locId": "L3938360",
            "locName": "Mount Diablo SP",
            "obsDt": "2018-10-20 09:12",
            "howMany": 4,
            "lat": 37.88,
            "lng": -121.91,
            "obsValid": true,
            "obsReviewed": false,
            "locationPrivate": false,
            "checklistId": "CL22986",
            "countryCode": "US",
            "countryName": "United States",
            "firstName": "Ana",
            "lastName": "Duran",
            "userDisplayName": "Ana Duran",
            "hasComments": false,
            "hasRichMedia": true,
            "obsId": "OBS636121859",
            "presenceNoted": false,
            "subId": "S49201931",
            "subnational1Code": "US-CA",
            "subnational1Name": "California",
            "subnational2Code": "US-CA-013",
            "subnational2Name": "Contra Costa"
        }))
        .unwrap();

        let simple: Observation = detailed.clone().into();
        assert_eq!(simple.species_code, "calqua");
        assert_eq!(simple.how_many, 4);
        assert_eq!(simple, detailed.base);
    }
}
