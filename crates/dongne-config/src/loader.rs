// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Precedence, lowest first: TOML file, `DONGNE_*` environment variables,
//! CLI overrides.

use crate::{ConfigError, ConfigResult, DongneConfig, CONFIG_FILE_NAME};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Find the dongne configuration file
///
/// Search order:
/// 1. `DONGNE_CONFIG_PATH` environment variable
/// 2. Current working directory: `./dongne_configuration.toml`
/// 3. Parent directory and up to 5 ancestor levels
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("DONGNE_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by DONGNE_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    // cwd first, then up to 5 ancestors
    let search_paths: Vec<PathBuf> = env::current_dir()
        .map(|cwd| {
            cwd.ancestors()
                .take(6)
                .map(|dir| dir.join(CONFIG_FILE_NAME))
                .collect()
        })
        .unwrap_or_default();

    if let Some(found) = search_paths.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet DONGNE_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DongneConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: DongneConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `DONGNE_LOG_LEVEL` -> `system.log_level`
/// - `DONGNE_DATA_DIR` -> `system.data_dir`
/// - `DONGNE_REVERSE_URL` -> `geocoder.reverse_url`
/// - `DONGNE_SEARCH_URL` -> `geocoder.search_url`
/// - `DONGNE_USER_AGENT` -> `geocoder.user_agent`
/// - `DONGNE_HTTP_TIMEOUT_SECS` -> `geocoder.http_timeout_secs`
/// - `DONGNE_FALLBACK_DELTA_DEG` -> `resolver.fallback_delta_deg`
/// - `DONGNE_STORAGE_DIR` -> `storage.dir`
/// - `DONGNE_GEOLOCATION_TIMEOUT_MS` -> `geolocation.timeout_ms`
pub fn apply_environment_overrides(config: &mut DongneConfig) {
    if let Ok(value) = env::var("DONGNE_LOG_LEVEL") {
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("DONGNE_DATA_DIR") {
        config.system.data_dir = PathBuf::from(value);
    }

    if let Ok(value) = env::var("DONGNE_REVERSE_URL") {
        config.geocoder.reverse_url = value;
    }
    if let Ok(value) = env::var("DONGNE_SEARCH_URL") {
        config.geocoder.search_url = value;
    }
    if let Ok(value) = env::var("DONGNE_USER_AGENT") {
        config.geocoder.user_agent = value;
    }
    if let Ok(value) = env::var("DONGNE_HTTP_TIMEOUT_SECS") {
        if let Ok(secs) = value.parse::<f64>() {
            config.geocoder.http_timeout_secs = secs;
        }
    }

    if let Ok(value) = env::var("DONGNE_FALLBACK_DELTA_DEG") {
        if let Ok(delta) = value.parse::<f64>() {
            config.resolver.fallback_delta_deg = delta;
        }
    }

    if let Ok(value) = env::var("DONGNE_STORAGE_DIR") {
        config.storage.dir = PathBuf::from(value);
    }

    if let Ok(value) = env::var("DONGNE_GEOLOCATION_TIMEOUT_MS") {
        if let Ok(ms) = value.parse::<u64>() {
            config.geolocation.timeout_ms = ms;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"user_agent": "my-app/2.0", "storage_dir": "/tmp"}`)
pub fn apply_cli_overrides(config: &mut DongneConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("log_level") {
        config.system.log_level = value.clone();
    }

    if let Some(value) = cli_args.get("reverse_url") {
        config.geocoder.reverse_url = value.clone();
    }
    if let Some(value) = cli_args.get("search_url") {
        config.geocoder.search_url = value.clone();
    }
    if let Some(value) = cli_args.get("user_agent") {
        config.geocoder.user_agent = value.clone();
    }
    if let Some(value) = cli_args.get("search_limit") {
        if let Ok(limit) = value.parse::<u32>() {
            config.geocoder.search_limit = limit;
        }
    }

    if let Some(value) = cli_args.get("fallback_delta_deg") {
        if let Ok(delta) = value.parse::<f64>() {
            config.resolver.fallback_delta_deg = delta;
        }
    }

    if let Some(value) = cli_args.get("storage_dir") {
        config.storage.dir = PathBuf::from(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("DONGNE_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("DONGNE_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nope.toml");

        env::set_var("DONGNE_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("DONGNE_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[geocoder]").unwrap();
        writeln!(file, "search_limit = 5").unwrap();
        writeln!(file, "[storage]").unwrap();
        writeln!(file, "key = \"neighborhood-test\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.geocoder.search_limit, 5);
        assert_eq!(config.storage.key, "neighborhood-test");
        assert_eq!(config.geolocation.timeout_ms, 10_000);
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = DongneConfig::default();

        env::set_var("DONGNE_USER_AGENT", "env-agent/1.0");
        env::set_var("DONGNE_GEOLOCATION_TIMEOUT_MS", "2500");
        env::set_var("DONGNE_FALLBACK_DELTA_DEG", "not-a-number");

        apply_environment_overrides(&mut config);

        env::remove_var("DONGNE_USER_AGENT");
        env::remove_var("DONGNE_GEOLOCATION_TIMEOUT_MS");
        env::remove_var("DONGNE_FALLBACK_DELTA_DEG");

        assert_eq!(config.geocoder.user_agent, "env-agent/1.0");
        assert_eq!(config.geolocation.timeout_ms, 2500);
        // Unparsable values leave the default in place
        assert_eq!(config.resolver.fallback_delta_deg, 0.02);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = DongneConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("search_url".to_string(), "http://127.0.0.1:9/search".to_string());
        cli_args.insert("search_limit".to_string(), "3".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.geocoder.search_url, "http://127.0.0.1:9/search");
        assert_eq!(config.geocoder.search_limit, 3);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[geocoder]").unwrap();
        writeln!(file, "user_agent = \"file-agent\"").unwrap();
        writeln!(file, "reverse_url = \"http://file/reverse\"").unwrap();

        env::set_var("DONGNE_USER_AGENT", "env-agent");
        env::set_var("DONGNE_REVERSE_URL", "http://env/reverse");

        let mut cli_args = HashMap::new();
        cli_args.insert("user_agent".to_string(), "cli-agent".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();

        env::remove_var("DONGNE_USER_AGENT");
        env::remove_var("DONGNE_REVERSE_URL");

        // CLI wins for user agent, env wins for reverse url (no CLI override)
        assert_eq!(config.geocoder.user_agent, "cli-agent");
        assert_eq!(config.geocoder.reverse_url, "http://env/reverse");
    }
}
