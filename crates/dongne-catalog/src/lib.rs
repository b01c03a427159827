// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# dongne-catalog

Academy listing helpers that sit on top of the resolved neighborhood:

- [`Subject`]: the ten canonical subjects and the alias table that folds raw
  backend subject names onto them ("로봇" → 코딩, "피아노" → 음악, ...)
- [`AgeGroup`]: age buckets (유치, 초등, 중등, 고등) and their display order
- [`Academy`] / [`AcademyFilter`]: an academy row and the subject + age +
  bounding-box filter applied to map listings

Cards and detail pages show raw subject names untouched; filters and map
markers work on canonical subjects only.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod academy;
pub mod age;
pub mod subjects;

pub use academy::{Academy, AcademyFilter};
pub use age::{groups_from_ages, AgeGroup, AGE_GROUP_ORDER};
pub use subjects::{
    canonical_subjects, display_subjects, is_valid_subject, primary_subject, Subject, SUBJECT_LIST,
};

use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    #[error("Unknown age group: {0}")]
    UnknownAgeGroup(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
