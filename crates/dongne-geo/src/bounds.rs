//! Validated bounding boxes
//!
//! A [`BoundingBox`] can only be built through [`BoundingBox::new`] (or
//! deserialization, which goes through the same check), so every instance
//! satisfies `sw.lat <= ne.lat && sw.lng <= ne.lng` with finite corners.

use crate::{GeoError, GeoPoint, GeoResult};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle used as a coarse spatial filter region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundingBox")]
pub struct BoundingBox {
    sw: GeoPoint,
    ne: GeoPoint,
}

/// Unvalidated wire shape
#[derive(Deserialize)]
struct RawBoundingBox {
    sw: GeoPoint,
    ne: GeoPoint,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = GeoError;

    fn try_from(raw: RawBoundingBox) -> GeoResult<Self> {
        BoundingBox::new(raw.sw, raw.ne)
    }
}

impl BoundingBox {
    /// Build a box from its southwest and northeast corners
    ///
    /// # Errors
    /// * `GeoError::NonFinite` - a coordinate is NaN or infinite
    /// * `GeoError::Inverted` - southwest lies north or east of northeast
    pub fn new(sw: GeoPoint, ne: GeoPoint) -> GeoResult<Self> {
        if !sw.is_finite() {
            return Err(GeoError::NonFinite(format!("southwest {:?}", sw)));
        }
        if !ne.is_finite() {
            return Err(GeoError::NonFinite(format!("northeast {:?}", ne)));
        }
        if sw.lat > ne.lat || sw.lng > ne.lng {
            return Err(GeoError::Inverted {
                sw_lat: sw.lat,
                sw_lng: sw.lng,
                ne_lat: ne.lat,
                ne_lng: ne.lng,
            });
        }
        Ok(Self { sw, ne })
    }

    /// Parse a Nominatim `boundingbox` array: `[min_lat, max_lat, min_lon, max_lon]`
    /// as decimal strings. Extra trailing entries are ignored.
    pub fn from_nominatim<S: AsRef<str>>(parts: &[S]) -> GeoResult<Self> {
        if parts.len() < 4 {
            return Err(GeoError::Malformed(format!(
                "expected 4 values, got {}",
                parts.len()
            )));
        }

        let mut values = [0.0_f64; 4];
        for (slot, raw) in values.iter_mut().zip(parts) {
            let raw = raw.as_ref().trim();
            *slot = raw
                .parse::<f64>()
                .map_err(|_| GeoError::Malformed(format!("'{}' is not a number", raw)))?;
        }

        let [min_lat, max_lat, min_lon, max_lon] = values;
        Self::new(GeoPoint::new(min_lat, min_lon), GeoPoint::new(max_lat, max_lon))
    }

    /// Square of half-side `delta_deg` centered on `center`
    pub fn around(center: GeoPoint, delta_deg: f64) -> GeoResult<Self> {
        let delta = delta_deg.abs();
        Self::new(center.offset(-delta, -delta), center.offset(delta, delta))
    }

    pub fn sw(&self) -> GeoPoint {
        self.sw
    }

    pub fn ne(&self) -> GeoPoint {
        self.ne
    }

    /// Latitude span in degrees
    pub fn height(&self) -> f64 {
        self.ne.lat - self.sw.lat
    }

    /// Longitude span in degrees
    pub fn width(&self) -> f64 {
        self.ne.lng - self.sw.lng
    }

    /// Δlat × Δlng, in square degrees
    pub fn area(&self) -> f64 {
        self.height() * self.width()
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.sw.lat + self.ne.lat) / 2.0,
            (self.sw.lng + self.ne.lng) / 2.0,
        )
    }

    /// Edges are inclusive
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.sw.lat
            && point.lat <= self.ne.lat
            && point.lng >= self.sw.lng
            && point.lng <= self.ne.lng
    }
}
