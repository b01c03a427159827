// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# dongne-resolver

Turns a map position into "my neighborhood": a display name, its parent
region, and a bounding box that academy listings are filtered by.

## Pipeline

1. Reverse-geocode the point ([`GeocodingService::reverse`])
2. Pick the most local named area ([`NeighborhoodAddress::from_components`])
3. Search for that name and keep the best administrative boundary
   ([`select_best_boundary`]); fall back to the reverse result's own box, then
   to a small square around the point
4. Persist the result ([`NeighborhoodStore`]) and keep it in the resolver slot

## Example

```no_run
use dongne_config::DongneConfig;
use dongne_geo::GeoPoint;
use dongne_resolver::{FixedLocation, NeighborhoodResolver};
use std::sync::Arc;

# async fn run() -> Result<(), Box<dyn std::error::Error>> {
let config = DongneConfig::default();
let here = GeoPoint::new(37.3826, 126.6569);
let resolver = NeighborhoodResolver::from_config(&config, Arc::new(FixedLocation(here)))?;

if let Some(neighborhood) = resolver.locate().await? {
    println!("{}", neighborhood.address);
}
# Ok(())
# }
```
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod address;
pub mod error;
pub mod geocoding;
pub mod geolocation;
mod lenient;
pub mod persistence;
pub mod resolver;
pub mod scoring;
pub mod types;

pub use address::NeighborhoodAddress;
pub use error::{
    GeocodeError, GeocodeResult, LocationError, ResolverError, ResolverResult, StoreError,
    StoreResult,
};
pub use geocoding::{
    build_search_query, AddressComponents, GeocodingService, NominatimClient, ReverseGeocode,
    SearchPlace,
};
pub use geolocation::{acquire_position, FixedLocation, LocationProvider, NoLocation, PositionOptions};
pub use persistence::{JsonFileStore, MemoryStore, NeighborhoodRecord, NeighborhoodStore, SelectedAddress};
pub use resolver::{NeighborhoodResolver, ResolverSettings};
pub use scoring::{is_admin_like, select_best_boundary, ScoredCandidate, ScoringParams};
pub use types::{NeighborhoodState, ResolvedNeighborhood};
