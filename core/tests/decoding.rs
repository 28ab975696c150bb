//! Verify the decoder against realistic multi-record payloads stored in
//! `fixtures/`, including the documented field omissions the service
//! produces in the wild.

use ebird_core::decode::{decode_array, decode_checklists};
use ebird_core::{DetailedObservation, Observation, Top100Entry};

#[test]
fn observation_fixture_preserves_order_and_applies_count_sentinel() {
    let raw = include_str!("fixtures/observations.json");
    let observations: Vec<Observation> = decode_array(raw).unwrap();

    assert_eq!(observations.len(), 3);
    let codes: Vec<&str> = observations
        .iter()
        .map(|o| o.species_code.as_str())
        .collect();
    assert_eq!(codes, ["gockin", "amecro", "rewbla"]);

    assert_eq!(observations[0].how_many, 2);
    assert_eq!(observations[1].how_many, 0);
    assert_eq!(observations[2].how_many, 30);

    assert!(observations[2].location_private);
    assert!(!observations[2].obs_valid);
}

#[test]
fn detailed_fixture_decodes_base_and_extension_fields() {
    let raw = include_str!("fixtures/detailed_observations.json");
    let observations: Vec<DetailedObservation> = decode_array(raw).unwrap();

    assert_eq!(observations.len(), 1);
    let detailed = &observations[0];
    assert_eq!(detailed.base.species_code, "bohwax");
    assert_eq!(detailed.base.how_many, 12);
    assert_eq!(detailed.first_name, "Noah");
    assert_eq!(detailed.last_name, "Keller");
    assert_eq!(detailed.obs_id, "OBS640112358");
    assert_eq!(detailed.subnational2_name, "Tompkins");
    assert!(detailed.has_comments);
    assert!(!detailed.has_rich_media);
}

#[test]
fn checklist_fixture_flattens_and_tolerates_missing_subnational2() {
    let raw = include_str!("fixtures/checklists.json");
    let checklists = decode_checklists(raw).unwrap();

    assert_eq!(checklists.len(), 2);
    assert_eq!(checklists[0].name, "Lake Merritt");
    assert_eq!(checklists[0].subnational2_code, "US-CA-001");
    assert_eq!(checklists[0].obs_time, "08:15");

    assert_eq!(checklists[1].country_code, "GB");
    assert_eq!(checklists[1].subnational2_code, "");
    assert_eq!(checklists[1].obs_time, "");
}

#[test]
fn top100_fixture_substitutes_placeholder_for_withheld_handles() {
    let raw = include_str!("fixtures/top100.json");
    let rows: Vec<Top100Entry> = decode_array(raw).unwrap();

    let handles: Vec<&str> = rows.iter().map(|r| r.profile_handle.as_str()).collect();
    assert_eq!(handles, ["MjE2MjQ2", "N/A", "NzA0MTEz"]);
    assert_eq!(rows[1].user_display_name, "Marco Silva");
}
