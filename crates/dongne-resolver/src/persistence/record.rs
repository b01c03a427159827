// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Persisted neighborhood record
//!
//! Wire shape (camelCase JSON):
//!
//! ```json
//! {"name":"송도동","region":"인천",
//!  "boundary":{"sw":{"lat":37.37,"lng":126.64},"ne":{"lat":37.39,"lng":126.66}},
//!  "lastLocation":{"lat":37.38,"lng":126.65},
//!  "selectedAddresses":[{"sido":"인천","gugun":"연수구","dong":"송도동"}]}
//! ```
//!
//! Records written by older releases lack `lastLocation` and the address
//! fields. Reading is lenient: a field of the wrong shape reads as absent and
//! never fails the whole record.

use crate::address::NeighborhoodAddress;
use crate::lenient::{lenient, lenient_list};
use crate::types::{NeighborhoodState, ResolvedNeighborhood};
use dongne_geo::{BoundingBox, GeoPoint};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Administrative address chosen by the user (시/도, 구/군, optional 동)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedAddress {
    pub sido: String,
    pub gugun: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dong: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub boundary: Option<BoundingBox>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_location: Option<GeoPoint>,
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub selected_addresses: Vec<SelectedAddress>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub my_location_address: Option<SelectedAddress>,
}

impl NeighborhoodRecord {
    /// Parse stored text. Anything that is not a JSON object reads as no record.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Value>(raw).ok()? {
            value @ Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_state(state: &NeighborhoodState) -> Self {
        let neighborhood = state.neighborhood.as_ref();
        Self {
            name: neighborhood.map(|n| n.address.name.clone()),
            region: neighborhood.and_then(|n| n.address.region.clone()),
            boundary: neighborhood.and_then(|n| n.boundary),
            last_location: state.last_location,
            selected_addresses: state.selected_addresses.clone(),
            my_location_address: state.my_location_address.clone(),
        }
    }

    /// State described by this record, or `None` without a usable name.
    ///
    /// Without a stored last location the boundary center stands in for it.
    pub fn into_state(self) -> Option<NeighborhoodState> {
        let name = non_blank(self.name)?;
        let region = non_blank(self.region);
        let last_location = self
            .last_location
            .filter(GeoPoint::is_finite)
            .or_else(|| self.boundary.map(|b| b.center()));

        Some(NeighborhoodState {
            neighborhood: Some(ResolvedNeighborhood {
                address: NeighborhoodAddress { name, region },
                boundary: self.boundary,
                source_location: last_location,
            }),
            last_location,
            selected_addresses: self.selected_addresses,
            my_location_address: self.my_location_address,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
