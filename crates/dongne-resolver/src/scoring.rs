// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Boundary candidate scoring
//!
//! A search returns everything matching the query text: the administrative
//! area, but also shops and buildings carrying the same name. Administrative
//! kinds get a bonus large enough that any of them beats any non-administrative
//! candidate; among equals the larger box wins.

use crate::geocoding::SearchPlace;
use dongne_config::{ResolverConfig, ADMIN_AREA_BONUS, MIN_CANDIDATE_AREA};
use dongne_geo::BoundingBox;
use tracing::trace;

/// Place types treated as administrative areas
pub const ADMIN_LIKE_TYPES: [&str; 9] = [
    "administrative",
    "suburb",
    "neighbourhood",
    "residential",
    "village",
    "town",
    "quarter",
    "district",
    "city_block",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringParams {
    /// Boxes smaller than this (deg²) are points, not areas
    pub min_area: f64,
    pub admin_bonus: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            min_area: MIN_CANDIDATE_AREA,
            admin_bonus: ADMIN_AREA_BONUS,
        }
    }
}

impl From<&ResolverConfig> for ScoringParams {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            min_area: config.min_candidate_area,
            admin_bonus: config.admin_bonus,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub boundary: BoundingBox,
    pub score: f64,
    pub place_type: String,
}

/// `type`, falling back to `class`, lowercased
pub fn place_type(place: &SearchPlace) -> String {
    place
        .place_type
        .as_deref()
        .or(place.class.as_deref())
        .unwrap_or_default()
        .to_lowercase()
}

pub fn is_admin_like(place_type: &str) -> bool {
    ADMIN_LIKE_TYPES.contains(&place_type)
        || place_type.contains("admin")
        || place_type.contains("district")
}

/// Score one candidate. `None` if its box is missing, invalid or too small.
pub fn score_candidate(place: &SearchPlace, params: &ScoringParams) -> Option<ScoredCandidate> {
    let boundary = BoundingBox::from_nominatim(place.boundingbox.as_deref()?).ok()?;
    let area = boundary.area();
    if area < params.min_area {
        return None;
    }

    let place_type = place_type(place);
    let bonus = if is_admin_like(&place_type) {
        params.admin_bonus
    } else {
        0.0
    };
    Some(ScoredCandidate {
        boundary,
        score: bonus + area,
        place_type,
    })
}

/// Highest-scoring candidate; the earliest wins a tie
pub fn select_best_boundary(places: &[SearchPlace], params: &ScoringParams) -> Option<ScoredCandidate> {
    let mut best: Option<ScoredCandidate> = None;
    for candidate in places.iter().filter_map(|p| score_candidate(p, params)) {
        trace!(
            place_type = %candidate.place_type,
            score = candidate.score,
            "Scored boundary candidate"
        );
        match &best {
            Some(current) if candidate.score <= current.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}
