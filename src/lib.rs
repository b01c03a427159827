// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dongne - neighborhood resolution for a map-based academy finder
//!
//! Given a position on the map, `dongne` works out which neighborhood (동) the
//! user is in, a bounding box for that neighborhood, and which academies lie
//! inside it.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! dongne = "0.1"  # Default: resolver + catalog + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`resolver`** (default): reverse geocoding, boundary scoring, persisted state
//! - **`catalog`** (default): subject canonicalization, age groups, academy filter
//! - **`observability`** (default): logging initialization and debug flags
//! - **`file-logging`**: daily-rolling log files in addition to the console
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dongne::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run(academies: Vec<Academy>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None, None)?;
//! let here = GeoPoint::new(37.3826, 126.6569);
//! let resolver = NeighborhoodResolver::from_config(&config, Arc::new(FixedLocation(here)))?;
//!
//! if resolver.restore_from_cache().is_none() {
//!     resolver.locate().await?;
//! }
//!
//! if let Some(boundary) = resolver.current().and_then(|n| n.boundary) {
//!     let filter = AcademyFilter::new().within(boundary).with_subject(Subject::Math);
//!     for academy in filter.apply(&academies) {
//!         println!("{}", academy.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: dongne-geo, dongne-config                  │
//! │  (GeoPoint, BoundingBox, TOML configuration)            │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Domain: dongne-resolver, dongne-catalog                │
//! │  (geocoding + scoring + persistence, academy filters)   │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Tools: dongne-locate                                   │
//! │  (resolve / restore / clear from the command line)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use dongne_config as config;
pub use dongne_geo as geo;

// Re-export components
#[cfg(feature = "resolver")]
pub use dongne_resolver as resolver;

#[cfg(feature = "catalog")]
pub use dongne_catalog as catalog;

#[cfg(feature = "observability")]
pub use dongne_observability as observability;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::config::{load_config, DongneConfig};
    pub use crate::geo::{BoundingBox, GeoPoint};

    #[cfg(feature = "resolver")]
    pub use crate::resolver::{
        FixedLocation, GeocodingService, JsonFileStore, LocationProvider, MemoryStore,
        NeighborhoodAddress, NeighborhoodResolver, NeighborhoodStore, NominatimClient,
        ResolvedNeighborhood, ResolverError,
    };

    #[cfg(feature = "catalog")]
    pub use crate::catalog::{Academy, AcademyFilter, AgeGroup, Subject};
}
