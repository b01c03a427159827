// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::address::NeighborhoodAddress;
use crate::persistence::SelectedAddress;
use dongne_geo::{BoundingBox, GeoPoint};
use serde::{Deserialize, Serialize};

/// Outcome of a successful resolution
///
/// A fresh resolution always carries `boundary` and `source_location`; values
/// restored from older records may lack either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedNeighborhood {
    pub address: NeighborhoodAddress,
    pub boundary: Option<BoundingBox>,
    pub source_location: Option<GeoPoint>,
}

impl ResolvedNeighborhood {
    pub fn name(&self) -> &str {
        &self.address.name
    }

    pub fn region(&self) -> Option<&str> {
        self.address.region.as_deref()
    }
}

/// Contents of the resolver's state slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborhoodState {
    pub neighborhood: Option<ResolvedNeighborhood>,
    /// Last device or requested position, kept even when no neighborhood matched
    pub last_location: Option<GeoPoint>,
    /// Administrative addresses picked by the user, carried through unchanged
    pub selected_addresses: Vec<SelectedAddress>,
    pub my_location_address: Option<SelectedAddress>,
}

impl NeighborhoodState {
    pub fn is_empty(&self) -> bool {
        self.neighborhood.is_none() && self.last_location.is_none()
    }
}
