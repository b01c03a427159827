// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dongne-geo
//!
//! Geographic value types shared by the resolver and the academy catalog.
//!
//! - [`GeoPoint`]: an immutable latitude/longitude pair
//! - [`BoundingBox`]: an axis-aligned rectangle whose southwest corner never
//!   exceeds its northeast corner
//!
//! Both serialize to the shapes used by the persisted neighborhood record:
//! `{"lat":..,"lng":..}` and `{"sw":{..},"ne":{..}}`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod bounds;
pub mod point;

pub use bounds::BoundingBox;
pub use point::GeoPoint;

use thiserror::Error;

/// Geometry validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Coordinate is not a finite number: {0}")]
    NonFinite(String),

    #[error("Bounding box corners are inverted: southwest ({sw_lat}, {sw_lng}) exceeds northeast ({ne_lat}, {ne_lng})")]
    Inverted {
        sw_lat: f64,
        sw_lng: f64,
        ne_lat: f64,
        ne_lng: f64,
    },

    #[error("Malformed bounding box: {0}")]
    Malformed(String),
}

/// Result type for geometry operations
pub type GeoResult<T> = Result<T, GeoError>;
