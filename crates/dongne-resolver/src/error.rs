// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Resolver error types
//!
//! Only service and device failures surface to callers. Missing search
//! candidates are recovered with a fallback boundary, and persistence failures
//! are logged and swallowed, so neither appears in [`ResolverError`].

use dongne_geo::{GeoError, GeoPoint};
use std::time::Duration;
use thiserror::Error;

/// Geocoding service errors
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Transport failure (DNS, connect, timeout, TLS)
    #[error("Geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Geocoding {endpoint} endpoint responded with HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// Body could not be decoded
    #[error("Failed to decode {endpoint} response: {reason}")]
    Decode { endpoint: &'static str, reason: String },
}

/// Result type for geocoding calls
pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Device position errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

/// Persistent store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid store key: '{0}'")]
    InvalidKey(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that abort a neighborhood resolution
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Address lookup failed; surfaced to users as "neighborhood unavailable"
    #[error("Address lookup failed: {0}")]
    ServiceUnavailable(#[from] GeocodeError),

    #[error("Device location failed: {0}")]
    Location(#[from] LocationError),

    #[error("Point is not a valid coordinate: {0}")]
    InvalidPoint(GeoPoint),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeoError),

    #[error("Failed to build geocoding client: {0}")]
    Client(String),
}

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;
