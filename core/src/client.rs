//! Endpoint functions for the eBird 2.0 API.
//!
//! # Design
//! `Requester` composes the layers below it: pick the endpoint's declared
//! parameter subset, build the path, assemble and encode the query suffix,
//! hand the URL to the injected [`Transport`] with the token header, decode
//! the body. Which optional parameters each endpoint supports is a `const`
//! table rather than inline conditionals, so the isolation rule (an endpoint
//! ignores parameters it does not support) is declared data.
//!
//! Every endpoint has a public `build_*_url` method that is pure and
//! deterministic; the fetching methods are thin wrappers over build +
//! transport + decode.

use log::debug;

use crate::decode;
use crate::error::ApiError;
use crate::params::{DataParams, ParamKind};
use crate::query;
use crate::transport::Transport;
use crate::types::{Checklist, DetailedObservation, Observation, RegionalStats, Top100Entry};

/// Base path of the eBird 2.0 web service.
pub const DEFAULT_BASE_URL: &str = "https://ebird.org/ws2.0";

/// Header carrying the API token on every request.
pub const TOKEN_HEADER: &str = "X-eBirdApiToken";

const RECENT_IN_REGION: &[ParamKind] = &[
    ParamKind::Back,
    ParamKind::Cat,
    ParamKind::MaxResults,
    ParamKind::IncludeProvisional,
    ParamKind::Hotspot,
];

const NOTABLE_IN_REGION: &[ParamKind] =
    &[ParamKind::Back, ParamKind::MaxResults, ParamKind::Hotspot];

const SPECIES_IN_REGION: &[ParamKind] = &[
    ParamKind::Back,
    ParamKind::MaxResults,
    ParamKind::IncludeProvisional,
    ParamKind::Hotspot,
];

const NEARBY: &[ParamKind] = &[
    ParamKind::Dist,
    ParamKind::Back,
    ParamKind::Cat,
    ParamKind::MaxResults,
    ParamKind::IncludeProvisional,
    ParamKind::Hotspot,
    ParamKind::Sort,
];

const NEARBY_NOTABLE: &[ParamKind] = &[
    ParamKind::Dist,
    ParamKind::Back,
    ParamKind::MaxResults,
    ParamKind::Hotspot,
];

const NEARBY_SPECIES: &[ParamKind] = &[
    ParamKind::Dist,
    ParamKind::Back,
    ParamKind::MaxResults,
    ParamKind::IncludeProvisional,
    ParamKind::Hotspot,
];

const HISTORIC: &[ParamKind] = &[
    ParamKind::Rank,
    ParamKind::Cat,
    ParamKind::MaxResults,
    ParamKind::IncludeProvisional,
    ParamKind::Hotspot,
];

/// Ordering for checklist feeds: by observation date (the service default)
/// or by submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecklistSort {
    ObsDt,
    CreationDt,
}

/// Date path segments render as `YYYY/M/D`, no zero padding.
fn date_path(year: i32, month: u32, day: u32) -> String {
    format!("{year}/{month}/{day}")
}

/// The primary interface for making eBird 2.0 API requests.
///
/// Holds the API token, the service base URL, and the transport collaborator
/// that performs the actual GETs. Carries no per-request state and may be
/// reused freely.
#[derive(Debug, Clone)]
pub struct Requester<T: Transport> {
    api_token: String,
    base_url: String,
    transport: T,
}

impl<T: Transport> Requester<T> {
    pub fn new(api_token: &str, transport: T) -> Self {
        Self {
            api_token: api_token.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
        }
    }

    /// Point the requester at a different service root, e.g. a local mock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn fetch(&self, url: &str) -> Result<String, ApiError> {
        debug!("GET {url}");
        let headers = [(TOKEN_HEADER.to_string(), self.api_token.clone())];
        Ok(self.transport.get(url, &headers)?)
    }

    /// URL for "Recent observations in a region".
    pub fn build_recent_observations_url(
        &self,
        region: &str,
        params: &DataParams,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(RECENT_IN_REGION, params, None, false)?;
        Ok(format!(
            "{}/data/obs/{}/recent{}",
            self.base_url,
            region,
            query::encode(&fragments)
        ))
    }

    /// Recent observations in a region, simple detail.
    pub fn recent_observations_in_region(
        &self,
        region: &str,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_recent_observations_url(region, params)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Recent notable observations in a region". The `detail=full`
    /// fragment is controlled here, never by the caller's parameter set.
    pub fn build_notable_observations_url(
        &self,
        region: &str,
        params: &DataParams,
        detailed: bool,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(NOTABLE_IN_REGION, params, None, detailed)?;
        Ok(format!(
            "{}/data/obs/{}/recent/notable{}",
            self.base_url,
            region,
            query::encode(&fragments)
        ))
    }

    /// Recent notable observations in a region, simple detail.
    pub fn recent_notable_observations_in_region(
        &self,
        region: &str,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_notable_observations_url(region, params, false)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// Recent notable observations in a region, full detail.
    pub fn detailed_recent_notable_observations_in_region(
        &self,
        region: &str,
        params: &DataParams,
    ) -> Result<Vec<DetailedObservation>, ApiError> {
        let url = self.build_notable_observations_url(region, params, true)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Recent observations of a species in a region".
    pub fn build_species_observations_url(
        &self,
        region: &str,
        species: &str,
        params: &DataParams,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(SPECIES_IN_REGION, params, None, false)?;
        Ok(format!(
            "{}/data/obs/{}/recent/{}{}",
            self.base_url,
            region,
            species,
            query::encode(&fragments)
        ))
    }

    /// Recent observations of one species in a region.
    pub fn recent_observations_of_species_in_region(
        &self,
        region: &str,
        species: &str,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_species_observations_url(region, species, params)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Recent nearby observations".
    pub fn build_nearby_observations_url(
        &self,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(NEARBY, params, Some((lat, lng)), false)?;
        Ok(format!(
            "{}/data/obs/geo/recent{}",
            self.base_url,
            query::encode(&fragments)
        ))
    }

    /// Recent observations near a point.
    pub fn recent_nearby_observations(
        &self,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_nearby_observations_url(lat, lng, params)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Recent nearby notable observations".
    pub fn build_nearby_notable_url(
        &self,
        lat: f64,
        lng: f64,
        params: &DataParams,
        detailed: bool,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(NEARBY_NOTABLE, params, Some((lat, lng)), detailed)?;
        Ok(format!(
            "{}/data/obs/geo/recent/notable{}",
            self.base_url,
            query::encode(&fragments)
        ))
    }

    /// Recent notable observations near a point, simple detail.
    pub fn recent_nearby_notable_observations(
        &self,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_nearby_notable_url(lat, lng, params, false)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// Recent notable observations near a point, full detail.
    pub fn detailed_recent_nearby_notable_observations(
        &self,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<Vec<DetailedObservation>, ApiError> {
        let url = self.build_nearby_notable_url(lat, lng, params, true)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Recent nearby observations of a species".
    pub fn build_nearby_species_url(
        &self,
        species: &str,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(NEARBY_SPECIES, params, Some((lat, lng)), false)?;
        Ok(format!(
            "{}/data/obs/geo/recent/{}{}",
            self.base_url,
            species,
            query::encode(&fragments)
        ))
    }

    /// Recent observations of one species near a point.
    pub fn recent_nearby_observations_of_species(
        &self,
        species: &str,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_nearby_species_url(species, lat, lng, params)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Nearest observations of a species".
    pub fn build_nearest_species_url(
        &self,
        species: &str,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(NEARBY_SPECIES, params, Some((lat, lng)), false)?;
        Ok(format!(
            "{}/data/nearest/geo/recent/{}{}",
            self.base_url,
            species,
            query::encode(&fragments)
        ))
    }

    /// Locations of the nearest recent observations of one species.
    pub fn nearest_observations_of_species(
        &self,
        species: &str,
        lat: f64,
        lng: f64,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_nearest_species_url(species, lat, lng, params)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Historic observations on a date".
    pub fn build_historic_observations_url(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
        params: &DataParams,
        detailed: bool,
    ) -> Result<String, ApiError> {
        let fragments = query::assemble(HISTORIC, params, None, detailed)?;
        Ok(format!(
            "{}/data/obs/{}/historic/{}{}",
            self.base_url,
            region,
            date_path(year, month, day),
            query::encode(&fragments)
        ))
    }

    /// Observations in a region on a past date, simple detail.
    pub fn historic_observations_on_date(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
        params: &DataParams,
    ) -> Result<Vec<Observation>, ApiError> {
        let url = self.build_historic_observations_url(region, year, month, day, params, false)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// Observations in a region on a past date, full detail.
    pub fn detailed_historic_observations_on_date(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
        params: &DataParams,
    ) -> Result<Vec<DetailedObservation>, ApiError> {
        let url = self.build_historic_observations_url(region, year, month, day, params, true)?;
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Top 100 contributors on a date". `max_results` defaults to
    /// 100 and is elided at the default; `checklist_sort` switches the
    /// ranking from species count to completed-checklist count.
    pub fn build_top_100_url(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
        checklist_sort: bool,
        max_results: Option<u32>,
    ) -> String {
        let mut fragments = Vec::new();
        if checklist_sort {
            fragments.push("checklistSort=true".to_string());
        }
        if let Some(max) = max_results {
            if max != 100 {
                fragments.push(format!("maxResults={max}"));
            }
        }
        format!(
            "{}/product/top100/{}/{}{}",
            self.base_url,
            region,
            date_path(year, month, day),
            query::encode(&fragments)
        )
    }

    /// Top contributors for a region on a date.
    pub fn top_100(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
        checklist_sort: bool,
        max_results: Option<u32>,
    ) -> Result<Vec<Top100Entry>, ApiError> {
        let url = self.build_top_100_url(region, year, month, day, checklist_sort, max_results);
        decode::decode_array(&self.fetch(&url)?)
    }

    /// URL for "Checklist feed on a date". `max_results` range is [1,200],
    /// default 10 (elided); `sortKey` is emitted only for the non-default
    /// submission-time ordering.
    pub fn build_checklist_feed_url(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
        sort: ChecklistSort,
        max_results: Option<u32>,
    ) -> Result<String, ApiError> {
        let mut fragments = Vec::new();
        if sort == ChecklistSort::CreationDt {
            fragments.push("sortKey=creation_dt".to_string());
        }
        if let Some(fragment) = feed_max_results_fragment(max_results)? {
            fragments.push(fragment);
        }
        Ok(format!(
            "{}/product/lists/{}/{}{}",
            self.base_url,
            region,
            date_path(year, month, day),
            query::encode(&fragments)
        ))
    }

    /// Checklists submitted in a region on a date.
    pub fn checklist_feed_on_date(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
        sort: ChecklistSort,
        max_results: Option<u32>,
    ) -> Result<Vec<Checklist>, ApiError> {
        let url = self.build_checklist_feed_url(region, year, month, day, sort, max_results)?;
        decode::decode_checklists(&self.fetch(&url)?)
    }

    /// URL for "Recent checklists feed". `max_results` range is [1,200],
    /// default 10 (elided).
    pub fn build_recent_checklists_url(
        &self,
        region: &str,
        max_results: Option<u32>,
    ) -> Result<String, ApiError> {
        let mut fragments = Vec::new();
        if let Some(fragment) = feed_max_results_fragment(max_results)? {
            fragments.push(fragment);
        }
        Ok(format!(
            "{}/product/lists/{}{}",
            self.base_url,
            region,
            query::encode(&fragments)
        ))
    }

    /// Most recently submitted checklists in a region.
    pub fn recent_checklists_feed(
        &self,
        region: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<Checklist>, ApiError> {
        let url = self.build_recent_checklists_url(region, max_results)?;
        decode::decode_checklists(&self.fetch(&url)?)
    }

    /// URL for "Regional statistics on a date".
    pub fn build_regional_stats_url(&self, region: &str, year: i32, month: u32, day: u32) -> String {
        format!(
            "{}/product/stats/{}/{}",
            self.base_url,
            region,
            date_path(year, month, day)
        )
    }

    /// Checklist, contributor, and species counts for a region on a date.
    pub fn regional_statistics_on_date(
        &self,
        region: &str,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<RegionalStats, ApiError> {
        let url = self.build_regional_stats_url(region, year, month, day);
        decode::decode_object(&self.fetch(&url)?)
    }
}

/// Shared `maxResults` rule for the checklist feeds: validate [1,200], elide
/// the service default of 10.
fn feed_max_results_fragment(max_results: Option<u32>) -> Result<Option<String>, ApiError> {
    match max_results {
        None => Ok(None),
        Some(max) => {
            if !(1..=200).contains(&max) {
                return Err(ApiError::out_of_range("maxResults", max));
            }
            Ok(if max == 10 {
                None
            } else {
                Some(format!("maxResults={max}"))
            })
        }
    }
}
