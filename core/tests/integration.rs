//! End-to-end test against the live mock service.
//!
//! # Design
//! Starts the mock server on a random port, then drives the endpoint
//! functions over real HTTP with a ureq-backed transport. Validates URL
//! assembly, header injection, and decoding end-to-end, including the
//! failure paths: a rejected request surfaces as a transport failure, and an
//! HTML error page fed to the decoder is malformed, never confused with it.

use ebird_core::{
    ApiError, ChecklistSort, DataParams, Observation, Requester, Transport, TransportError,
};

/// Executes GETs with ureq, treating non-2xx statuses as transport failures.
struct UreqTransport;

impl Transport for UreqTransport {
    fn get(&self, url: &str, headers: &[(String, String)]) -> Result<String, TransportError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        let mut request = agent.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let mut response = request.call().map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(TransportError(format!("HTTP {status}")));
        }
        Ok(body)
    }
}

/// Boot the mock server on a random port and return its base URL.
fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn request_lifecycle() {
    let base_url = start_mock_server();
    let requester = Requester::new("testkey", UreqTransport).with_base_url(&base_url);

    // Recent observations in a region, with customization.
    let mut params = DataParams::default();
    params.set_back(30).unwrap();
    params.set_hotspot(true);
    let observations = requester
        .recent_observations_in_region("US-CA", &params)
        .unwrap();
    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].species_code, "calqua");
    assert_eq!(observations[0].how_many, 4);
    // Uncounted "x" entry decodes with the zero sentinel.
    assert_eq!(observations[1].species_code, "amecro");
    assert_eq!(observations[1].how_many, 0);

    // Notable observations, simple then detailed.
    let notable = requester
        .recent_notable_observations_in_region("US-CA", &DataParams::default())
        .unwrap();
    assert_eq!(notable.len(), 2);

    let detailed = requester
        .detailed_recent_notable_observations_in_region("US-CA", &DataParams::default())
        .unwrap();
    assert_eq!(detailed.len(), 1);
    assert_eq!(detailed[0].user_display_name, "Ana Duran");
    assert_eq!(detailed[0].checklist_id, "CL22986");
    let as_simple: Observation = detailed[0].clone().into();
    assert_eq!(as_simple.species_code, "calqua");

    // Nearby observations resolve the geo route, not the region capture.
    let nearby = requester
        .recent_nearby_observations(37.88, -121.91, &DataParams::default())
        .unwrap();
    assert_eq!(nearby.len(), 2);

    // Nearby notable, simple and detailed; the detail switch rides the URL.
    let nearby_notable = requester
        .recent_nearby_notable_observations(37.88, -121.91, &DataParams::default())
        .unwrap();
    assert_eq!(nearby_notable.len(), 2);

    let detailed_nearby = requester
        .detailed_recent_nearby_notable_observations(37.88, -121.91, &DataParams::default())
        .unwrap();
    assert_eq!(detailed_nearby.len(), 1);
    assert_eq!(detailed_nearby[0].checklist_id, "CL22986");

    let nearby_species = requester
        .recent_nearby_observations_of_species("calqua", 37.88, -121.91, &DataParams::default())
        .unwrap();
    assert_eq!(nearby_species[0].species_code, "calqua");

    let nearest = requester
        .nearest_observations_of_species("calqua", 37.88, -121.91, &DataParams::default())
        .unwrap();
    assert_eq!(nearest.len(), 2);

    // Species-scoped and historic endpoints share the observation shape.
    let by_species = requester
        .recent_observations_of_species_in_region("US-CA", "calqua", &DataParams::default())
        .unwrap();
    assert_eq!(by_species[0].sci_name, "Callipepla californica");

    let historic = requester
        .detailed_historic_observations_on_date("US-CA", 2014, 2, 14, &DataParams::default())
        .unwrap();
    assert_eq!(historic[0].subnational2_name, "Contra Costa");

    // Top 100: withheld profile handle decodes as the placeholder.
    let top = requester
        .top_100("US", 2018, 1, 1, false, None)
        .unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].profile_handle, "MjE2MjQ2");
    assert_eq!(top[1].profile_handle, "N/A");

    // Checklist feeds flatten the nested loc sub-object.
    let feed = requester
        .checklist_feed_on_date("US-CA", 2018, 1, 1, ChecklistSort::CreationDt, Some(5))
        .unwrap();
    assert_eq!(feed[0].name, "Lake Merritt");
    assert_eq!(feed[0].sub_id, "S49603518");
    assert!(feed[0].is_hotspot);

    let recent_feed = requester.recent_checklists_feed("US-CA", None).unwrap();
    assert_eq!(recent_feed.len(), 1);

    // Regional statistics decode as a single object.
    let stats = requester
        .regional_statistics_on_date("US-CA", 2018, 1, 1)
        .unwrap();
    assert_eq!(stats.num_species, 190);
    assert_eq!(stats.num_contributors, 37);
}

#[test]
fn rejected_and_malformed_responses_stay_distinct() {
    let base_url = start_mock_server();

    // A request the service rejects (no token) is a transport failure when
    // the transport polices statuses.
    let url = format!("{base_url}/data/obs/US/recent");
    let err = UreqTransport.get(&url, &[]).unwrap_err();
    assert!(err.0.contains("403"));

    let api_err: ApiError = err.into();
    assert!(matches!(api_err, ApiError::Transport(_)));

    // A transport that hands back the error page body instead leaves the
    // decoder to reject it as malformed: no JSON marker in an HTML page.
    struct LenientTransport;
    impl Transport for LenientTransport {
        fn get(&self, url: &str, headers: &[(String, String)]) -> Result<String, TransportError> {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            let mut request = agent.get(url);
            for (name, value) in headers {
                request = request.header(name.as_str(), value.as_str());
            }
            let mut response = request.call().map_err(|e| TransportError(e.to_string()))?;
            response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError(e.to_string()))
        }
    }

    let body = LenientTransport.get(&url, &[]).unwrap();
    let err = ebird_core::decode::decode_array::<Observation>(&body).unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse(_)));

    // With the token restored, the same requester path succeeds.
    let requester = Requester::new("testkey", LenientTransport).with_base_url(&base_url);
    let observations = requester
        .recent_observations_in_region("US", &DataParams::default())
        .unwrap();
    assert_eq!(observations.len(), 2);
}
