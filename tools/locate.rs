// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Neighborhood lookup tool

Resolves a position to a neighborhood, restores the persisted one, or clears
it, and prints the result as JSON on stdout. Logs go to stderr.

Usage:
  cargo run --bin dongne-locate -- locate --lat 37.3826 --lng 126.6569
  cargo run --bin dongne-locate -- restore
  cargo run --bin dongne-locate -- clear

Debug logging per crate: `--debug-dongne-resolver`, `--debug-all`, or
`DONGNE_DEBUG=dongne-resolver`.
*/

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use dongne::config::{
    find_config_file, load_config, validate_config, ConfigError, DongneConfig,
};
use dongne::geo::GeoPoint;
use dongne::observability::{debug_flags_help, init_logging, parse_debug_flags, LoggingConfig};
use dongne::resolver::{FixedLocation, NeighborhoodResolver};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dongne-locate", version, about = "Resolve and manage the current neighborhood")]
struct Cli {
    /// Configuration file (default: search for dongne_configuration.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the persisted neighborhood record
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Geocoder User-Agent header
    #[arg(long)]
    user_agent: Option<String>,

    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve the neighborhood at a position and persist it
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Print the persisted neighborhood, if any
    Restore,
    /// Forget the persisted neighborhood
    Clear,
}

impl Cli {
    fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(dir) = &self.storage_dir {
            overrides.insert("storage_dir".to_string(), dir.display().to_string());
        }
        if let Some(agent) = &self.user_agent {
            overrides.insert("user_agent".to_string(), agent.clone());
        }
        if let Some(level) = &self.log_level {
            overrides.insert("log_level".to_string(), level.clone());
        }
        overrides
    }
}

/// Explicit file, else a discovered one, else built-in defaults
fn load(cli: &Cli) -> Result<DongneConfig> {
    let overrides = cli.overrides();
    let config = match &cli.config {
        Some(path) => load_config(Some(path.as_path()), Some(&overrides))?,
        None => match find_config_file() {
            Ok(path) => load_config(Some(path.as_path()), Some(&overrides))?,
            Err(ConfigError::FileNotFound(_)) => {
                let mut config = DongneConfig::default();
                dongne::config::apply_environment_overrides(&mut config);
                dongne::config::apply_cli_overrides(&mut config, &overrides);
                config
            }
            Err(e) => return Err(e.into()),
        },
    };
    validate_config(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let debug_flags = parse_debug_flags();
    let args = std::env::args().filter(|arg| !arg.starts_with("--debug-"));
    let matches = Cli::command()
        .after_help(debug_flags_help())
        .get_matches_from(args);
    let cli = Cli::from_arg_matches(&matches)?;

    let config = load(&cli).context("Failed to load configuration")?;

    let logging = LoggingConfig {
        log_dir: Some(config.system.data_dir.join("logs")),
        ..LoggingConfig::with_level(config.system.log_level.clone())
    };
    let _guard = init_logging(&debug_flags, &logging)?;

    let output = match cli.command {
        Command::Locate { lat, lng } => {
            let point = GeoPoint::new(lat, lng);
            let resolver = NeighborhoodResolver::from_config(&config, Arc::new(FixedLocation(point)))?;
            let resolved = resolver
                .locate()
                .await
                .with_context(|| format!("Failed to resolve neighborhood at {point}"))?;
            serde_json::to_string_pretty(&resolved)?
        }
        Command::Restore => {
            let resolver = resolver_without_device(&config)?;
            serde_json::to_string_pretty(&resolver.restore_from_cache())?
        }
        Command::Clear => {
            let resolver = resolver_without_device(&config)?;
            resolver.clear();
            info!(store_dir = %config.storage.dir.display(), "Cleared");
            serde_json::to_string_pretty(&serde_json::json!({ "cleared": true }))?
        }
    };

    println!("{output}");
    Ok(())
}

fn resolver_without_device(config: &DongneConfig) -> Result<NeighborhoodResolver> {
    Ok(NeighborhoodResolver::from_config(
        config,
        Arc::new(dongne::resolver::NoLocation),
    )?)
}
