//! Argument assembly and query-string encoding.
//!
//! # Design
//! `assemble` is the single funnel every endpoint's optional arguments pass
//! through: coordinates first (validated), then the endpoint-controlled
//! `detail=full` flag, then each declared parameter kind in declared order.
//! Kinds outside the declared slice are never consulted, so a parameter set
//! on [`DataParams`] that an endpoint does not support is silently ignored.
//! Output order is fully determined by the inputs, which keeps assembled
//! URLs reproducible.

use crate::error::ApiError;
use crate::params::{DataParams, ParamKind};

/// Build the ordered fragment list for one request.
///
/// Coordinates render with two-decimal fixed precision (`lat=37.88`), the
/// granularity the service works at. The `detailed` flag belongs to the
/// endpoint, not the caller's parameter set, so a detailed endpoint cannot
/// lose its `detail=full` fragment to caller omission.
pub fn assemble(
    kinds: &[ParamKind],
    params: &DataParams,
    coords: Option<(f64, f64)>,
    detailed: bool,
) -> Result<Vec<String>, ApiError> {
    let mut fragments = Vec::new();
    if let Some((lat, lng)) = coords {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ApiError::out_of_range("lat", lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ApiError::out_of_range("lng", lng));
        }
        fragments.push(format!("lat={lat:.2}"));
        fragments.push(format!("lng={lng:.2}"));
    }
    if detailed {
        fragments.push("detail=full".to_string());
    }
    for kind in kinds {
        if let Some(fragment) = params.format(*kind) {
            fragments.push(fragment);
        }
    }
    Ok(fragments)
}

/// Join fragments into a query suffix: `""` when empty, `"?a=1&b=2"`
/// otherwise. Validation already happened upstream.
pub fn encode(fragments: &[String]) -> String {
    if fragments.is_empty() {
        String::new()
    } else {
        format!("?{}", fragments.join("&"))
    }
}
