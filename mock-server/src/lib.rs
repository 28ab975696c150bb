//! Stand-in for the eBird 2.0 web service, used by core integration tests.
//!
//! Serves canned JSON payloads for every endpoint family the core knows and
//! enforces the `X-eBirdApiToken` header. Requests without a token get an
//! HTML error page with a 403, mirroring the real service's habit of
//! answering rejected requests with a page instead of a JSON payload.

use std::collections::HashMap;

use axum::{
    extract::{Query, Request},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TOKEN_HEADER: &str = "X-eBirdApiToken";

pub fn app() -> Router {
    Router::new()
        .route("/data/obs/geo/recent", get(observation_feed))
        .route("/data/obs/geo/recent/notable", get(observation_feed))
        .route("/data/obs/geo/recent/{species}", get(observation_feed))
        .route("/data/nearest/geo/recent/{species}", get(observation_feed))
        .route("/data/obs/{region}/recent", get(observation_feed))
        .route("/data/obs/{region}/recent/notable", get(observation_feed))
        .route("/data/obs/{region}/recent/{species}", get(observation_feed))
        .route(
            "/data/obs/{region}/historic/{year}/{month}/{day}",
            get(observation_feed),
        )
        .route("/product/top100/{region}/{year}/{month}/{day}", get(top_100))
        .route("/product/lists/{region}", get(checklist_feed))
        .route(
            "/product/lists/{region}/{year}/{month}/{day}",
            get(checklist_feed),
        )
        .route(
            "/product/stats/{region}/{year}/{month}/{day}",
            get(regional_stats),
        )
        .layer(middleware::from_fn(require_token))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_token(request: Request, next: Next) -> Response {
    if request.headers().get(TOKEN_HEADER).is_none() {
        return (
            StatusCode::FORBIDDEN,
            Html("<html><body><h1>403 Forbidden</h1></body></html>"),
        )
            .into_response();
    }
    next.run(request).await
}

/// Observation endpoints answer the simple shape unless the request carries
/// `detail=full`, matching the service's detail switch.
async fn observation_feed(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    if query.get("detail").map(String::as_str) == Some("full") {
        Json(detailed_observations())
    } else {
        Json(simple_observations())
    }
}

async fn top_100() -> Json<Value> {
    // Second row has no profileHandle: the contributor withheld it.
    Json(json!([
        {
            "profileHandle": "MjE2MjQ2",
            "userDisplayName": "Ana Duran",
            "numSpecies": 312,
            "numCompleteChecklists": 41,
            "rowNum": 1,
            "userId": "USER101"
        },
        {
            "userDisplayName": "Marco Silva",
            "numSpecies": 208,
            "numCompleteChecklists": 36,
            "rowNum": 2,
            "userId": "USER102"
        }
    ]))
}

async fn checklist_feed() -> Json<Value> {
    Json(json!([
        {
            "locId": "L207391",
            "subID": "S49603518",
            "userDisplayName": "Marco Silva",
            "numSpecies": 28,
            "obsDt": "1 Jan 2018",
            "obsTime": "08:15",
            "obsMonth": "Jan",
            "obsDay": 1,
            "obsYear": 2018,
            "loc": {
                "locId": "L207391",
                "name": "Lake Merritt",
                "latitude": 37.8,
                "longitude": -122.25,
                "countryCode": "US",
                "countryName": "United States",
                "subnational1Name": "California",
                "subnational1Code": "US-CA",
                "subnational2Code": "US-CA-001",
                "subnational2Name": "Alameda",
                "isHotspot": true,
                "hierarchicalName": "Lake Merritt, Alameda, California, US"
            }
        }
    ]))
}

async fn regional_stats() -> Json<Value> {
    Json(json!({
        "numChecklists": 51,
        "numContributors": 37,
        "numSpecies": 190
    }))
}

fn simple_observations() -> Value {
    // Second entry has no howMany: an uncounted "x" observation.
    json!([
        {
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
            "locationPrivate": false
        },
        {
            "speciesCode": "amecro",
            "comName": "American Crow",
            "sciName": "Corvus brachyrhynchos",
            "locId": "L207391",
            "locName": "Lake Merritt",
            "obsDt": "2018-10-20 10:03",
            "lat": 37.8,
            "lng": -122.25,
            "obsValid": true,
            "obsReviewed": true,
            "locationPrivate": false
        }
    ])
}

fn detailed_observations() -> Value {
    json!([
        {
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
            "locID": "L3938360",
            "obsId": "OBS636121859",
            "presenceNoted": false,
            "subId": "S49201931",
            "subnational1Code": "US-CA",
            "subnational1Name": "California",
            "subnational2Code": "US-CA-013",
            "subnational2Name": "Contra Costa"
        }
    ])
}
