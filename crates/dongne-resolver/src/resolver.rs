// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Neighborhood state container.

[`NeighborhoodResolver`] owns the single "my neighborhood" slot. Resolution
runs sequentially: device position (for [`NeighborhoodResolver::locate`]),
reverse geocode, boundary search, then persist. Any error resets the slot,
except a search answered with a non-success status, which falls back to the
provisional boundary. A point without a named area clears the neighborhood but
keeps the point.
*/

use crate::address::NeighborhoodAddress;
use crate::error::{GeocodeError, ResolverError, ResolverResult};
use crate::geocoding::{build_search_query, GeocodingService, NominatimClient};
use crate::geolocation::{acquire_position, LocationProvider, PositionOptions};
use crate::persistence::{JsonFileStore, NeighborhoodRecord, NeighborhoodStore};
use crate::scoring::{select_best_boundary, ScoringParams};
use crate::types::{NeighborhoodState, ResolvedNeighborhood};
use dongne_config::DongneConfig;
use dongne_geo::{BoundingBox, GeoPoint};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tunables for a resolver instance
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverSettings {
    /// Store key of the persisted record
    pub storage_key: String,
    pub country_qualifier: String,
    /// Half-side of the synthetic square boundary, in degrees
    pub fallback_delta_deg: f64,
    pub scoring: ScoringParams,
    pub position: PositionOptions,
}

impl ResolverSettings {
    pub fn from_config(config: &DongneConfig) -> Self {
        Self {
            storage_key: config.storage.key.clone(),
            country_qualifier: config.geocoder.country_qualifier.clone(),
            fallback_delta_deg: config.resolver.fallback_delta_deg,
            scoring: ScoringParams::from(&config.resolver),
            position: PositionOptions::from(&config.geolocation),
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_config(&DongneConfig::default())
    }
}

/// Marks a resolution in flight for as long as it lives
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn start(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Resolves points to neighborhoods and keeps the current one
pub struct NeighborhoodResolver {
    geocoder: Arc<dyn GeocodingService>,
    store: Arc<dyn NeighborhoodStore>,
    location: Arc<dyn LocationProvider>,
    settings: ResolverSettings,
    state: RwLock<NeighborhoodState>,
    in_flight: AtomicUsize,
}

impl NeighborhoodResolver {
    pub fn new(
        geocoder: Arc<dyn GeocodingService>,
        store: Arc<dyn NeighborhoodStore>,
        location: Arc<dyn LocationProvider>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            geocoder,
            store,
            location,
            settings,
            state: RwLock::new(NeighborhoodState::default()),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Nominatim geocoder and file-backed store, both from configuration
    pub fn from_config(
        config: &DongneConfig,
        location: Arc<dyn LocationProvider>,
    ) -> ResolverResult<Self> {
        let geocoder = NominatimClient::new(config.geocoder.clone())
            .map_err(|e| ResolverError::Client(e.to_string()))?;
        let store = JsonFileStore::new(config.storage.dir.clone());
        info!(
            reverse_url = %config.geocoder.reverse_url,
            store_dir = %config.storage.dir.display(),
            "Neighborhood resolver configured"
        );
        Ok(Self::new(
            Arc::new(geocoder),
            Arc::new(store),
            location,
            ResolverSettings::from_config(config),
        ))
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn current(&self) -> Option<ResolvedNeighborhood> {
        self.state.read().neighborhood.clone()
    }

    pub fn state(&self) -> NeighborhoodState {
        self.state.read().clone()
    }

    pub fn last_location(&self) -> Option<GeoPoint> {
        self.state.read().last_location
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Read the device position, then resolve it.
    ///
    /// # Errors
    /// * `ResolverError::Location` - permission denied, timeout, or no fix
    /// * `ResolverError::ServiceUnavailable` - reverse geocoding failed, or the
    ///   boundary search failed in transport or returned a non-JSON body
    pub async fn locate(&self) -> ResolverResult<Option<ResolvedNeighborhood>> {
        let _loading = LoadingGuard::start(&self.in_flight);

        let point = match acquire_position(self.location.as_ref(), &self.settings.position).await {
            Ok(point) => point,
            Err(e) => {
                warn!(error = %e, "Could not read device position");
                self.reset();
                return Err(e.into());
            }
        };
        self.resolve(point).await
    }

    /// Resolve a point to a neighborhood.
    ///
    /// `Ok(None)` means the point has no named area; the neighborhood is
    /// cleared and the point kept as last location.
    ///
    /// # Errors
    /// * `ResolverError::InvalidPoint` - non-finite coordinates
    /// * `ResolverError::ServiceUnavailable` - reverse geocoding failed, or the
    ///   boundary search failed in transport or returned a non-JSON body
    pub async fn resolve_from_point(
        &self,
        point: GeoPoint,
    ) -> ResolverResult<Option<ResolvedNeighborhood>> {
        let _loading = LoadingGuard::start(&self.in_flight);
        if !point.is_finite() {
            self.reset();
            return Err(ResolverError::InvalidPoint(point));
        }
        self.resolve(point).await
    }

    async fn resolve(&self, point: GeoPoint) -> ResolverResult<Option<ResolvedNeighborhood>> {
        match self.run_pipeline(point).await {
            Ok(Some(resolved)) => {
                let snapshot = {
                    let mut state = self.state.write();
                    state.neighborhood = Some(resolved.clone());
                    state.last_location = Some(point);
                    state.clone()
                };
                self.persist(&snapshot);
                info!(
                    name = %resolved.address.name,
                    region = ?resolved.address.region,
                    "Neighborhood resolved"
                );
                Ok(Some(resolved))
            }
            Ok(None) => {
                let mut state = self.state.write();
                state.neighborhood = None;
                state.last_location = Some(point);
                info!(%point, "No neighborhood found at point");
                Ok(None)
            }
            Err(e) => {
                warn!(%point, error = %e, "Neighborhood resolution failed");
                self.reset();
                Err(e)
            }
        }
    }

    async fn run_pipeline(&self, point: GeoPoint) -> ResolverResult<Option<ResolvedNeighborhood>> {
        let reverse = self.geocoder.reverse(point).await?;
        if let Some(error) = &reverse.error {
            debug!(%point, error = %error, "Geocoder reported no result");
        }

        let Some(address) = reverse
            .address
            .as_ref()
            .and_then(NeighborhoodAddress::from_components)
        else {
            return Ok(None);
        };

        let provisional = match reverse.bounding_box() {
            Some(Ok(boundary)) => boundary,
            Some(Err(e)) => {
                debug!(error = %e, "Reverse result has an unusable bounding box");
                BoundingBox::around(point, self.settings.fallback_delta_deg)?
            }
            None => BoundingBox::around(point, self.settings.fallback_delta_deg)?,
        };

        let boundary = self.search_boundary(&address).await?.unwrap_or(provisional);

        Ok(Some(ResolvedNeighborhood {
            address,
            boundary: Some(boundary),
            source_location: Some(point),
        }))
    }

    /// Best administrative boundary from a forward search.
    ///
    /// A non-success status is recovered with `None` so the provisional
    /// boundary stands. Transport failures and non-JSON bodies abort the
    /// resolution.
    async fn search_boundary(
        &self,
        address: &NeighborhoodAddress,
    ) -> ResolverResult<Option<BoundingBox>> {
        let Some(query) = build_search_query(
            &address.name,
            address.region.as_deref(),
            &self.settings.country_qualifier,
        ) else {
            return Ok(None);
        };

        let places = match self.geocoder.search(&query).await {
            Ok(places) => places,
            Err(e @ GeocodeError::Status { .. }) => {
                warn!(query = %query, error = %e, "Boundary search failed, using fallback boundary");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let best = select_best_boundary(&places, &self.settings.scoring);
        match &best {
            Some(candidate) => debug!(
                query = %query,
                place_type = %candidate.place_type,
                score = candidate.score,
                "Selected boundary from search"
            ),
            None => debug!(
                query = %query,
                candidates = places.len(),
                "No usable boundary candidate"
            ),
        }
        Ok(best.map(|candidate| candidate.boundary))
    }

    /// Load the persisted neighborhood into an empty slot.
    ///
    /// Returns the current value untouched if the slot is already populated.
    /// Absent or unusable records yield `None` without error.
    pub fn restore_from_cache(&self) -> Option<ResolvedNeighborhood> {
        let mut state = self.state.write();
        if state.neighborhood.is_some() {
            return state.neighborhood.clone();
        }

        let raw = match self.store.load(&self.settings.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted neighborhood");
                return None;
            }
        };

        let Some(restored) = NeighborhoodRecord::parse(&raw).and_then(NeighborhoodRecord::into_state)
        else {
            debug!("Persisted neighborhood is unusable, ignoring");
            return None;
        };

        *state = restored;
        let neighborhood = state.neighborhood.clone();
        if let Some(n) = &neighborhood {
            info!(name = %n.address.name, "Restored neighborhood from cache");
        }
        neighborhood
    }

    /// Forget the neighborhood and remove the persisted record
    pub fn clear(&self) {
        *self.state.write() = NeighborhoodState::default();
        if let Err(e) = self.store.remove(&self.settings.storage_key) {
            warn!(error = %e, "Failed to remove persisted neighborhood");
        }
        info!("Neighborhood cleared");
    }

    /// Error path: the slot goes back to empty, the persisted record stays
    fn reset(&self) {
        let mut state = self.state.write();
        state.neighborhood = None;
        state.last_location = None;
    }

    fn persist(&self, state: &NeighborhoodState) {
        let record = NeighborhoodRecord::from_state(state);
        let result = record
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.store
                    .save(&self.settings.storage_key, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!(error = %e, "Failed to persist neighborhood");
        }
    }
}
