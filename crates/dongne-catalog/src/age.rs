//! Age groups
//!
//! 유치 0–6, 초등 7–12, 중등 13–15, 고등 16 and up. Listings order groups
//! oldest first.

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Age bucket. Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgeGroup {
    High,
    Middle,
    Elementary,
    Preschool,
}

/// Display order of age groups
pub const AGE_GROUP_ORDER: [AgeGroup; 4] = [
    AgeGroup::High,
    AgeGroup::Middle,
    AgeGroup::Elementary,
    AgeGroup::Preschool,
];

impl AgeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::High => "고등",
            AgeGroup::Middle => "중등",
            AgeGroup::Elementary => "초등",
            AgeGroup::Preschool => "유치",
        }
    }

    /// Bucket for an age in full years
    pub fn from_age(age: u32) -> AgeGroup {
        match age {
            0..=6 => AgeGroup::Preschool,
            7..=12 => AgeGroup::Elementary,
            13..=15 => AgeGroup::Middle,
            _ => AgeGroup::High,
        }
    }

    pub fn parse(label: &str) -> Option<AgeGroup> {
        AGE_GROUP_ORDER.into_iter().find(|group| group.label() == label)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = CatalogError;

    fn from_str(s: &str) -> CatalogResult<Self> {
        AgeGroup::parse(s).ok_or_else(|| CatalogError::UnknownAgeGroup(s.to_string()))
    }
}

impl TryFrom<String> for AgeGroup {
    type Error = CatalogError;

    fn try_from(value: String) -> CatalogResult<Self> {
        value.parse()
    }
}

impl From<AgeGroup> for String {
    fn from(group: AgeGroup) -> Self {
        group.label().to_string()
    }
}

/// Age groups covering the given ages, deduplicated, in display order
pub fn groups_from_ages(ages: &[u32]) -> Vec<AgeGroup> {
    ages.iter()
        .map(|&age| AgeGroup::from_age(age))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
