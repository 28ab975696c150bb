//! Optional request parameters for the `data/obs` family of endpoints.
//!
//! # Design
//! The eBird service infers "unspecified" from a parameter's *absence* in the
//! query string, not from an explicit default value. Every setter therefore
//! applies default elision: storing a value equal to the service's implicit
//! default clears the field instead. `DataParams::format` renders the exact
//! `key=value` fragment the service expects, or `None` for an unset field.
//!
//! Each endpoint supports only a subset of these parameters; `ParamKind`
//! names them so endpoints can declare their subset as a plain slice and the
//! assembler never consults a kind outside that slice.

use std::collections::BTreeSet;

use crate::error::ApiError;

/// The fixed taxonomic category vocabulary accepted by the `cat` parameter.
pub const VALID_CATEGORIES: [&str; 8] = [
    "domestic",
    "form",
    "hybrid",
    "intergrade",
    "issf",
    "slash",
    "species",
    "spuh",
];

/// Response verbosity for notable/historic observation requests.
/// Service default is `Simple`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Simple,
    Full,
}

/// Result ordering for nearby observation requests.
/// Service default is `Date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSort {
    Date,
    Species,
}

/// Which observation wins for historic requests: the most recently created
/// record (`Create`) or the most recent by observation date (`MRec`, the
/// service default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Create,
    MRec,
}

/// Names one optional parameter so endpoints can declare which subset they
/// support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Back,
    Cat,
    MaxResults,
    IncludeProvisional,
    Hotspot,
    Detail,
    Sort,
    Dist,
    Rank,
}

/// Optional request modifiers, all unset by default.
///
/// A field holds a value only when it differs from the service's implicit
/// default; setting a field to its default is equivalent to clearing it.
/// `DataParams::default()` is the "no customization" value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataParams {
    back: Option<u32>,
    cat: Option<BTreeSet<String>>,
    max_results: Option<u32>,
    include_provisional: Option<bool>,
    hotspot: Option<bool>,
    detail: Option<Detail>,
    sort: Option<DataSort>,
    dist: Option<u32>,
    rank: Option<Rank>,
}

impl DataParams {
    /// Days to look back for observations. Range: [1,30], default: 14.
    pub fn set_back(&mut self, back: u32) -> Result<(), ApiError> {
        if !(1..=30).contains(&back) {
            return Err(ApiError::out_of_range("back", back));
        }
        self.back = if back == 14 { None } else { Some(back) };
        Ok(())
    }

    /// Taxonomic categories to filter by, as a comma-separated string of
    /// tokens from [`VALID_CATEGORIES`]. Duplicates collapse; the full
    /// vocabulary in any order is the default and clears the field.
    pub fn set_cat(&mut self, cat: &str) -> Result<(), ApiError> {
        let mut categories = BTreeSet::new();
        for token in cat.split(',') {
            if !VALID_CATEGORIES.contains(&token) {
                return Err(ApiError::out_of_range("cat", token));
            }
            categories.insert(token.to_string());
        }
        // Tokens are all drawn from the vocabulary, so a full-size set is
        // exactly the full vocabulary.
        self.cat = if categories.len() == VALID_CATEGORIES.len() {
            None
        } else {
            Some(categories)
        };
        Ok(())
    }

    /// Upper limit on result rows. Range: [1,10000], default: 0 (no limit).
    pub fn set_max_results(&mut self, max_results: u32) -> Result<(), ApiError> {
        if max_results > 10000 {
            return Err(ApiError::out_of_range("maxResults", max_results));
        }
        self.max_results = if max_results == 0 {
            None
        } else {
            Some(max_results)
        };
        Ok(())
    }

    /// Include unreviewed flagged observations. Default: false.
    pub fn set_include_provisional(&mut self, include_provisional: bool) {
        self.include_provisional = if include_provisional {
            Some(true)
        } else {
            None
        };
    }

    /// Limit results to sightings at birding hotspots. Default: false.
    pub fn set_hotspot(&mut self, hotspot: bool) {
        self.hotspot = if hotspot { Some(true) } else { None };
    }

    /// Response verbosity. Default: [`Detail::Simple`].
    pub fn set_detail(&mut self, detail: Detail) {
        self.detail = match detail {
            Detail::Simple => None,
            Detail::Full => Some(Detail::Full),
        };
    }

    /// Result ordering. Default: [`DataSort::Date`].
    pub fn set_sort(&mut self, sort: DataSort) {
        self.sort = match sort {
            DataSort::Date => None,
            DataSort::Species => Some(DataSort::Species),
        };
    }

    /// Radial search distance in kilometers. Range: [0,50], default: 25.
    pub fn set_dist(&mut self, dist: u32) -> Result<(), ApiError> {
        if dist > 50 {
            return Err(ApiError::out_of_range("dist", dist));
        }
        self.dist = if dist == 25 { None } else { Some(dist) };
        Ok(())
    }

    /// Ranking rule for historic requests. Default: [`Rank::MRec`].
    pub fn set_rank(&mut self, rank: Rank) {
        self.rank = match rank {
            Rank::MRec => None,
            Rank::Create => Some(Rank::Create),
        };
    }

    /// Clear every field back to "unset".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn back(&self) -> Option<u32> {
        self.back
    }

    pub fn cat(&self) -> Option<&BTreeSet<String>> {
        self.cat.as_ref()
    }

    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    pub fn include_provisional(&self) -> Option<bool> {
        self.include_provisional
    }

    pub fn hotspot(&self) -> Option<bool> {
        self.hotspot
    }

    pub fn detail(&self) -> Option<Detail> {
        self.detail
    }

    pub fn sort(&self) -> Option<DataSort> {
        self.sort
    }

    pub fn dist(&self) -> Option<u32> {
        self.dist
    }

    pub fn rank(&self) -> Option<Rank> {
        self.rank
    }

    /// Render the canonical `key=value` fragment for one parameter kind, or
    /// `None` when the field is unset. Elision guarantees a stored field is
    /// never at its default, so boolean and enumerated fields always render
    /// their single non-default literal.
    pub fn format(&self, kind: ParamKind) -> Option<String> {
        match kind {
            ParamKind::Back => self.back.map(|b| format!("back={b}")),
            ParamKind::Cat => self.cat.as_ref().map(|categories| {
                let joined: Vec<&str> = categories.iter().map(String::as_str).collect();
                format!("cat={}", joined.join(","))
            }),
            ParamKind::MaxResults => self.max_results.map(|m| format!("maxResults={m}")),
            ParamKind::IncludeProvisional => self
                .include_provisional
                .map(|_| "includeProvisional=true".to_string()),
            ParamKind::Hotspot => self.hotspot.map(|_| "hotspot=true".to_string()),
            ParamKind::Detail => self.detail.map(|_| "detail=full".to_string()),
            ParamKind::Sort => self.sort.map(|_| "sort=species".to_string()),
            ParamKind::Dist => self.dist.map(|d| format!("dist={d}")),
            ParamKind::Rank => self.rank.map(|_| "rank=create".to_string()),
        }
    }
}
