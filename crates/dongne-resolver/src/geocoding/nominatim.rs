// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Nominatim HTTP client

use super::{GeocodingService, ReverseGeocode, SearchPlace};
use crate::error::{GeocodeError, GeocodeResult};
use crate::lenient::well_formed;
use async_trait::async_trait;
use dongne_config::GeocoderConfig;
use dongne_geo::GeoPoint;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

/// [`GeocodingService`] backed by a Nominatim-compatible HTTP API
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    config: GeocoderConfig,
}

impl NominatimClient {
    /// Build a client with its own connection pool and the configured timeout
    pub fn new(config: GeocoderConfig) -> GeocodeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    /// Reuse an existing `reqwest::Client` (shared pool, custom middleware)
    pub fn with_http_client(http: reqwest::Client, config: GeocoderConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> GeocodeResult<T> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(ACCEPT_LANGUAGE, &self.config.accept_language)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        trace!(endpoint, bytes = body.len(), "Geocoder response received");
        serde_json::from_slice(&body).map_err(|e| GeocodeError::Decode {
            endpoint,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl GeocodingService for NominatimClient {
    async fn reverse(&self, point: GeoPoint) -> GeocodeResult<ReverseGeocode> {
        debug!(%point, "Reverse geocoding");
        let query = [
            ("lat", point.lat.to_string()),
            ("lon", point.lng.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ];
        self.get_json("reverse", &self.config.reverse_url, &query)
            .await
    }

    async fn search(&self, query: &str) -> GeocodeResult<Vec<SearchPlace>> {
        debug!(query, "Searching for boundary candidates");
        let params = [
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", self.config.search_limit.to_string()),
            ("countrycodes", self.config.country_codes.clone()),
            ("addressdetails", "0".to_string()),
        ];
        let body: Value = self
            .get_json("search", &self.config.search_url, &params)
            .await?;
        if !body.is_array() {
            debug!(query, "Search response is not a list, no candidates");
        }
        Ok(well_formed(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> GeocoderConfig {
        GeocoderConfig {
            reverse_url: format!("{}/reverse", server.uri()),
            search_url: format!("{}/search", server.uri()),
            user_agent: "dongne-test/0.1".to_string(),
            ..GeocoderConfig::default()
        }
    }

    #[tokio::test]
    async fn test_reverse_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "37.38"))
            .and(query_param("lon", "126.65"))
            .and(query_param("format", "json"))
            .and(query_param("addressdetails", "1"))
            .and(query_param("accept-language", "ko"))
            .and(header("accept-language", "ko"))
            .and(header("user-agent", "dongne-test/0.1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": {"suburb": "송도동", "city": "인천"},
                "boundingbox": ["37.37", "37.39", "126.64", "126.66"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = NominatimClient::new(config_for(&server)).unwrap();
        let reverse = client.reverse(GeoPoint::new(37.38, 126.65)).await.unwrap();
        assert_eq!(
            reverse.address.unwrap().suburb.as_deref(),
            Some("송도동")
        );
    }

    #[tokio::test]
    async fn test_search_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "송도동 인천 대한민국"))
            .and(query_param("limit", "10"))
            .and(query_param("countrycodes", "kr"))
            .and(query_param("addressdetails", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"type": "suburb", "boundingbox": ["37.3", "37.4", "126.6", "126.7"]}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = NominatimClient::new(config_for(&server)).unwrap();
        let places = client.search("송도동 인천 대한민국").await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_type.as_deref(), Some("suburb"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = NominatimClient::new(config_for(&server)).unwrap();
        let err = client.reverse(GeoPoint::new(0.0, 0.0)).await.unwrap_err();
        assert!(matches!(
            err,
            GeocodeError::Status {
                endpoint: "reverse",
                status: 503
            }
        ));
    }

    #[tokio::test]
    async fn test_search_skips_malformed_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                null,
                "suburb",
                {"type": "suburb", "boundingbox": ["37.30", "37.45", "126.60", "126.70"]}
            ])))
            .mount(&server)
            .await;

        let client = NominatimClient::new(config_for(&server)).unwrap();
        let places = client.search("송도동").await.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_type.as_deref(), Some("suburb"));
    }

    #[tokio::test]
    async fn test_search_object_body_has_no_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "busy"})))
            .mount(&server)
            .await;

        let client = NominatimClient::new(config_for(&server)).unwrap();
        assert!(client.search("송도동").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let client = NominatimClient::new(config_for(&server)).unwrap();
        let err = client.search("x").await.unwrap_err();
        assert!(matches!(err, GeocodeError::Decode { endpoint: "search", .. }));
    }
}
