// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Persisted neighborhood record and key-value stores

pub mod record;
pub mod store;

pub use record::{NeighborhoodRecord, SelectedAddress};
pub use store::{JsonFileStore, MemoryStore, NeighborhoodStore};
