// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dongne-observability
//!
//! Logging setup shared by every dongne crate and tool.
//!
//! Provides consistent `tracing` output with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: File-based log rotation into timestamped run folders

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known dongne crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "dongne",
    "dongne-config",
    "dongne-geo",
    "dongne-catalog",
    "dongne-resolver",
];

/// Observability setup errors
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("A global subscriber is already installed")]
    AlreadyInitialized,
}
