// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Geocoding service boundary
//!
//! The resolver talks to the geocoder only through [`GeocodingService`], so
//! tests substitute fakes and deployments can point at any Nominatim-compatible
//! endpoint. Response types mirror the Nominatim JSON format and are lenient:
//! fields that are missing or of an unexpected shape decode as `None`.

pub mod nominatim;

pub use nominatim::NominatimClient;

use crate::error::GeocodeResult;
use crate::lenient::lenient;
use async_trait::async_trait;
use dongne_geo::{BoundingBox, GeoPoint, GeoResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reverse-geocoding and place search (transport-agnostic)
#[async_trait]
pub trait GeocodingService: Send + Sync {
    /// Reverse-geocode a point into address components
    ///
    /// # Errors
    /// * `GeocodeError::Status` - non-success response
    /// * `GeocodeError::Http` / `GeocodeError::Decode` - transport or body failure
    async fn reverse(&self, point: GeoPoint) -> GeocodeResult<ReverseGeocode>;

    /// Free-text place search returning candidate places
    ///
    /// Malformed list items are skipped; a JSON body that is not a list
    /// yields no candidates.
    ///
    /// # Errors
    /// * `GeocodeError::Status` - non-success response
    /// * `GeocodeError::Http` / `GeocodeError::Decode` - transport failure or a
    ///   body that is not JSON
    async fn search(&self, query: &str) -> GeocodeResult<Vec<SearchPlace>>;
}

/// Address components of a reverse-geocode result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressComponents {
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub quarter: Option<String>,
    #[serde(default)]
    pub city_district: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Reverse endpoint response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReverseGeocode {
    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<AddressComponents>,
    /// `[min_lat, max_lat, min_lon, max_lon]`
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub boundingbox: Option<Vec<String>>,
    /// Nominatim reports "Unable to geocode" in-band with a 200 status
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
}

impl ReverseGeocode {
    /// The response's own bounding box, if present and valid
    pub fn bounding_box(&self) -> Option<GeoResult<BoundingBox>> {
        self.boundingbox
            .as_deref()
            .map(BoundingBox::from_nominatim)
    }
}

/// One search endpoint candidate
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchPlace {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub place_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "lenient_bbox")]
    pub boundingbox: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
}

/// Compose the forward search query: neighborhood, parent region and country
/// qualifier, blank parts dropped. `None` when there is nothing to search for
/// beyond the country itself.
pub fn build_search_query(name: &str, region: Option<&str>, country_qualifier: &str) -> Option<String> {
    let name = name.trim();
    let region = region.map(str::trim).unwrap_or_default();
    if name.is_empty() && region.is_empty() {
        return None;
    }

    let query = [name, region, country_qualifier.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some(query)
}

/// Accepts the documented string quadruple, and numbers in place of strings
fn lenient_bbox<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(None);
    };

    let parts: Option<Vec<String>> = items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect();
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reverse_decodes_full_response() {
        let reverse: ReverseGeocode = serde_json::from_value(json!({
            "place_id": 1,
            "address": {"suburb": "송도동", "city": "인천", "country_code": "kr"},
            "boundingbox": ["37.37", "37.39", "126.64", "126.66"]
        }))
        .unwrap();

        let address = reverse.address.as_ref().unwrap();
        assert_eq!(address.suburb.as_deref(), Some("송도동"));
        assert_eq!(address.city.as_deref(), Some("인천"));
        let bbox = reverse.bounding_box().unwrap().unwrap();
        assert_eq!(bbox.sw(), GeoPoint::new(37.37, 126.64));
    }

    #[test]
    fn test_reverse_tolerates_odd_shapes() {
        let reverse: ReverseGeocode = serde_json::from_value(json!({
            "address": "not an object",
            "boundingbox": [37.37, 37.39, 126.64, 126.66]
        }))
        .unwrap();
        assert!(reverse.address.is_none());
        assert_eq!(reverse.boundingbox.as_ref().map(Vec::len), Some(4));

        let error_only: ReverseGeocode =
            serde_json::from_value(json!({"error": "Unable to geocode"})).unwrap();
        assert!(error_only.address.is_none());
        assert!(error_only.bounding_box().is_none());
        assert_eq!(error_only.error.as_deref(), Some("Unable to geocode"));
    }

    #[test]
    fn test_search_place_decodes_type_field() {
        let places: Vec<SearchPlace> = serde_json::from_value(json!([
            {"type": "administrative", "class": "boundary", "boundingbox": ["1", "2", "3", "4"]},
            {"class": "amenity", "boundingbox": null},
            {}
        ]))
        .unwrap();
        assert_eq!(places[0].place_type.as_deref(), Some("administrative"));
        assert_eq!(places[1].place_type, None);
        assert_eq!(places[1].class.as_deref(), Some("amenity"));
        assert_eq!(places[2], SearchPlace::default());
    }

    #[test]
    fn test_build_search_query() {
        assert_eq!(
            build_search_query(" 송도동 ", Some("인천"), "대한민국").as_deref(),
            Some("송도동 인천 대한민국")
        );
        assert_eq!(
            build_search_query("송도동", None, "대한민국").as_deref(),
            Some("송도동 대한민국")
        );
        assert_eq!(build_search_query("송도동", Some("  "), "").as_deref(), Some("송도동"));
        assert_eq!(build_search_query("  ", Some(""), "대한민국"), None);
    }
}
