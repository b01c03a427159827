//! Configuration validation
//!
//! Ensures configuration values are within valid ranges before the resolver
//! is wired up.

use crate::{ConfigError, ConfigResult, DongneConfig};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Required fields (endpoints, client identifier, storage key)
/// - Valid value ranges (limits, timeouts, fallback box size)
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &DongneConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_required_fields(config, &mut errors);
    validate_value_ranges(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_required_fields(config: &DongneConfig, errors: &mut Vec<ConfigValidationError>) {
    let required = [
        ("geocoder.reverse_url", &config.geocoder.reverse_url),
        ("geocoder.search_url", &config.geocoder.search_url),
        ("geocoder.user_agent", &config.geocoder.user_agent),
        ("storage.key", &config.storage.key),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ConfigValidationError::MissingRequired {
                field: field.to_string(),
            });
        }
    }
}

fn validate_value_ranges(config: &DongneConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.geocoder.search_limit == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "geocoder.search_limit".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    if !(config.geocoder.http_timeout_secs.is_finite() && config.geocoder.http_timeout_secs > 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "geocoder.http_timeout_secs".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    let delta = config.resolver.fallback_delta_deg;
    if !(delta > 0.0 && delta <= 1.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "resolver.fallback_delta_deg".to_string(),
            reason: "must be in (0.0, 1.0]".to_string(),
        });
    }

    if !(config.resolver.min_candidate_area >= 0.0) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "resolver.min_candidate_area".to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    if config.geolocation.timeout_ms == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "geolocation.timeout_ms".to_string(),
            reason: "must be positive".to_string(),
        });
    }
}
