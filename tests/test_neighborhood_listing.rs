// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file → resolver → persisted record → academy listing

use async_trait::async_trait;
use dongne::catalog::{Academy, AcademyFilter, Subject};
use dongne::config::{load_config, validate_config, CONFIG_FILE_NAME};
use dongne::geo::GeoPoint;
use dongne::resolver::{
    AddressComponents, FixedLocation, GeocodeResult, GeocodingService, JsonFileStore,
    NeighborhoodResolver, ResolverSettings, ReverseGeocode, SearchPlace,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

const SONGDO: GeoPoint = GeoPoint::new(37.3826, 126.6569);

/// Reverse gives a name only; search returns a shop and the administrative area
struct Incheon;

#[async_trait]
impl GeocodingService for Incheon {
    async fn reverse(&self, _point: GeoPoint) -> GeocodeResult<ReverseGeocode> {
        Ok(ReverseGeocode {
            address: Some(AddressComponents {
                suburb: Some("송도동".to_string()),
                city: Some("인천".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    async fn search(&self, _query: &str) -> GeocodeResult<Vec<SearchPlace>> {
        let places = json!([
            {"type": "cafe", "class": "amenity", "boundingbox": ["37.0", "38.0", "126.0", "127.0"]},
            {"type": "administrative", "class": "boundary", "boundingbox": ["37.36", "37.40", "126.62", "126.68"]}
        ]);
        Ok(serde_json::from_value(places).unwrap())
    }
}

fn academy(id: &str, lat: f64, lng: f64, subjects: &[&str], address: &str) -> Academy {
    serde_json::from_value(json!({
        "id": id,
        "name": id,
        "address": address,
        "subjects": subjects,
        "lat": lat,
        "lng": lng
    }))
    .unwrap()
}

#[tokio::test]
async fn listing_follows_resolved_boundary() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &config_path,
        format!(
            "[storage]\ndir = {:?}\n\n[geocoder]\nuser_agent = \"dongne-tests/0.1\"\n",
            temp.path().join("store").display().to_string()
        ),
    )
    .unwrap();
    let config = load_config(Some(&config_path), None).unwrap();
    validate_config(&config).unwrap();

    let store = Arc::new(JsonFileStore::new(config.storage.dir.clone()));
    let resolver = NeighborhoodResolver::new(
        Arc::new(Incheon),
        store.clone(),
        Arc::new(FixedLocation(SONGDO)),
        ResolverSettings::from_config(&config),
    );
    resolver.locate().await.unwrap().unwrap();

    // A fresh process restores from the same directory
    let restarted = NeighborhoodResolver::new(
        Arc::new(Incheon),
        store,
        Arc::new(FixedLocation(SONGDO)),
        ResolverSettings::from_config(&config),
    );
    let boundary = restarted.restore_from_cache().unwrap().boundary.unwrap();
    assert_eq!(boundary.sw(), GeoPoint::new(37.36, 126.62));

    let academies = vec![
        academy("inside-robot", 37.38, 126.65, &["로봇"], "서울 강남구"),
        academy("inside-math", 37.39, 126.66, &["수학"], "인천 연수구 송도동"),
        academy("outside-coding", 37.50, 127.03, &["코딩"], "인천 연수구 송도동"),
    ];
    let filter = AcademyFilter::new()
        .within(boundary)
        .with_subject(Subject::Coding);
    let ids: Vec<&str> = filter.apply(&academies).iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["inside-robot"]);
}
