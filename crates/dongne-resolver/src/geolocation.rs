// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Device position source

use crate::error::LocationError;
use async_trait::async_trait;
use dongne_config::GeolocationConfig;
use dongne_geo::GeoPoint;
use std::time::Duration;
use tracing::debug;

/// Options for a single position reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Zero means a cached reading must not be reused
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::from(&GeolocationConfig::default())
    }
}

impl From<&GeolocationConfig> for PositionOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: config.timeout(),
            maximum_age: config.maximum_age(),
        }
    }
}

/// Single current-position reading from the device
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self, options: &PositionOptions) -> Result<GeoPoint, LocationError>;
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoPoint);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self, _options: &PositionOptions) -> Result<GeoPoint, LocationError> {
        Ok(self.0)
    }
}

/// For hosts without a positioning device
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current_position(&self, _options: &PositionOptions) -> Result<GeoPoint, LocationError> {
        Err(LocationError::Unavailable(
            "no positioning device configured".to_string(),
        ))
    }
}

/// Ask the provider for a position, bounded by `options.timeout`.
///
/// Non-finite readings are reported as unavailable.
pub async fn acquire_position(
    provider: &dyn LocationProvider,
    options: &PositionOptions,
) -> Result<GeoPoint, LocationError> {
    let point = tokio::time::timeout(options.timeout, provider.current_position(options))
        .await
        .map_err(|_| LocationError::Timeout(options.timeout))??;

    if !point.is_finite() {
        return Err(LocationError::Unavailable(format!(
            "device reported an invalid position: {point}"
        )));
    }
    debug!(%point, "Device position acquired");
    Ok(point)
}
