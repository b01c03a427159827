// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `dongne_configuration.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Half-side, in degrees, of the square used when no usable boundary is found
/// for a resolved neighborhood. Roughly 2 km at Korean latitudes.
pub const FALLBACK_BOX_DELTA_DEG: f64 = 0.02;

/// Boxes with a smaller area (deg²) are treated as points, not regions.
pub const MIN_CANDIDATE_AREA: f64 = 1e-10;

/// Score bonus given to administrative-area search candidates. Dwarfs any real
/// bounding-box area so that type always dominates size.
pub const ADMIN_AREA_BONUS: f64 = 1e6;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DongneConfig {
    pub system: SystemConfig,
    pub geocoder: GeocoderConfig,
    pub resolver: ResolverConfig,
    pub storage: StorageConfig,
    pub geolocation: GeolocationConfig,
}

/// System-level configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: String,
    pub data_dir: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Reverse-geocoding / search service endpoints and request shaping
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub reverse_url: String,
    pub search_url: String,
    /// Sent as the `User-Agent` header; Nominatim's usage policy requires one
    pub user_agent: String,
    pub accept_language: String,
    pub country_codes: String,
    /// Appended to every forward search query
    pub country_qualifier: String,
    pub search_limit: u32,
    pub http_timeout_secs: f64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            reverse_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            search_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "DU-Academy-App/1.0".to_string(),
            accept_language: "ko".to_string(),
            country_codes: "kr".to_string(),
            country_qualifier: "대한민국".to_string(),
            search_limit: 10,
            http_timeout_secs: 10.0,
        }
    }
}

impl GeocoderConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.http_timeout_secs)
    }
}

/// Boundary scoring parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub fallback_delta_deg: f64,
    pub min_candidate_area: f64,
    pub admin_bonus: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_delta_deg: FALLBACK_BOX_DELTA_DEG,
            min_candidate_area: MIN_CANDIDATE_AREA,
            admin_bonus: ADMIN_AREA_BONUS,
        }
    }
}

/// Where the last resolved neighborhood is persisted
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding persisted records. Relative paths resolve against the
    /// working directory.
    pub dir: PathBuf,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data/store"),
            key: "myNeighborhood".to_string(),
        }
    }
}

/// Device position request options
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    /// 0 = never reuse a cached reading
    pub maximum_age_ms: u64,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: 10_000,
            maximum_age_ms: 0,
        }
    }
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn maximum_age(&self) -> Duration {
        Duration::from_millis(self.maximum_age_ms)
    }
}
