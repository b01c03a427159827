// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # dongne configuration
//!
//! Settings for the geocoder endpoints, boundary scoring, the persisted
//! neighborhood store and device positioning. Values are layered: the
//! `dongne_configuration.toml` file, then `DONGNE_*` environment variables, then
//! CLI overrides.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dongne_config::{load_config, DongneConfig};
//!
//! // Load configuration with automatic file discovery and overrides
//! let config = load_config(None, None).expect("Failed to load config");
//!
//! println!("Reverse endpoint: {}", config.geocoder.reverse_url);
//! println!("Fallback box: {} deg", config.resolver.fallback_delta_deg);
//! ```
//!
//! Every section carries defaults, so an empty (or missing) section falls back
//! to the public Nominatim endpoints and the standard Korean locale settings.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file name searched for by [`find_config_file`]
pub const CONFIG_FILE_NAME: &str = "dongne_configuration.toml";

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Re-export for convenience
pub use serde;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration file found: {0}")]
    FileNotFound(String),

    #[error("Cannot read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed TOML: {0}")]
    ParseError(String),

    #[error("Configuration rejected: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = DongneConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: DongneConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.storage.key, config.storage.key);
        assert_eq!(parsed.geocoder.search_limit, 10);
    }

    #[test]
    fn test_parse_error_conversion() {
        let err: ConfigError = toml::from_str::<DongneConfig>("[geocoder\n")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
