// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neighborhood name selection from reverse-geocode address components

use crate::geocoding::AddressComponents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable neighborhood label and its parent region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodAddress {
    /// e.g. "송도동"
    pub name: String,
    /// e.g. "인천"
    pub region: Option<String>,
}

impl NeighborhoodAddress {
    /// Pick the most local named area, then its parent region.
    ///
    /// Name priority: suburb, neighbourhood, quarter, city_district, town,
    /// village, county, city. Region priority: county, city, state. Values are
    /// trimmed and blanks skipped. `None` when no name component is present.
    pub fn from_components(components: &AddressComponents) -> Option<Self> {
        let name = first_present([
            &components.suburb,
            &components.neighbourhood,
            &components.quarter,
            &components.city_district,
            &components.town,
            &components.village,
            &components.county,
            &components.city,
        ])?;
        let region = first_present([&components.county, &components.city, &components.state]);
        Some(Self { name, region })
    }
}

impl fmt::Display for NeighborhoodAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{} ({})", self.name, region),
            None => f.write_str(&self.name),
        }
    }
}

fn first_present<const N: usize>(fields: [&Option<String>; N]) -> Option<String> {
    fields
        .into_iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_suburb_preferred_over_city() {
        let components = AddressComponents {
            suburb: some("송도동"),
            city: some("인천"),
            ..Default::default()
        };
        let address = NeighborhoodAddress::from_components(&components).unwrap();
        assert_eq!(address.name, "송도동");
        assert_eq!(address.region.as_deref(), Some("인천"));
    }

    #[test]
    fn test_blank_components_skipped() {
        let components = AddressComponents {
            suburb: some("   "),
            neighbourhood: some(""),
            quarter: some(" 연희동 "),
            county: some(" "),
            state: some("서울특별시"),
            ..Default::default()
        };
        let address = NeighborhoodAddress::from_components(&components).unwrap();
        assert_eq!(address.name, "연희동");
        assert_eq!(address.region.as_deref(), Some("서울특별시"));
    }

    #[test]
    fn test_county_can_be_name_and_region() {
        let components = AddressComponents {
            county: some("양평군"),
            ..Default::default()
        };
        let address = NeighborhoodAddress::from_components(&components).unwrap();
        assert_eq!(address.name, "양평군");
        assert_eq!(address.region.as_deref(), Some("양평군"));
    }

    #[test]
    fn test_state_alone_is_not_a_name() {
        let components = AddressComponents {
            state: some("경기도"),
            ..Default::default()
        };
        assert!(NeighborhoodAddress::from_components(&components).is_none());
        assert!(NeighborhoodAddress::from_components(&AddressComponents::default()).is_none());
    }

    #[test]
    fn test_display() {
        let address = NeighborhoodAddress {
            name: "송도동".to_string(),
            region: None,
        };
        assert_eq!(address.to_string(), "송도동");
    }
}
