// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization
//!
//! Console output (stderr) always; with the `file-logging` feature, also a JSON log per
//! run in a timestamped folder with retention cleanup.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};
use crate::ObservabilityError;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Logging initialization result. Keep it alive for the lifetime of the
/// process; dropping it flushes and closes file writers.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving file logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the filter for the given debug flags and default level
pub fn build_filter(debug_flags: &CrateDebugFlags, level: &str) -> Result<EnvFilter, ObservabilityError> {
    let filter = debug_flags.to_filter_string(level);
    EnvFilter::try_new(&filter).map_err(|e| ObservabilityError::InvalidFilter {
        filter,
        reason: e.to_string(),
    })
}

/// Initialize the global subscriber
///
/// Creates, when file logging is enabled and `config.log_dir` is set:
/// ```text
/// <log_dir>/
///   └── run_20250101_120000/
///       └── dongne.log
/// ```
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_filter = build_filter(debug_flags, &config.level)?;
    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(debug_flags.any_enabled())
            .with_file(false)
            .with_line_number(false)
            .with_filter(console_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_filter(console_filter)
            .boxed(),
    };
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let mut file_guards = Vec::new();
    #[cfg_attr(not(feature = "file-logging"), allow(unused_mut))]
    let mut run_folder: Option<PathBuf> = None;

    #[cfg(feature = "file-logging")]
    if let Some(base_log_dir) = &config.log_dir {
        use anyhow::Context;

        let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
        let folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&folder)
            .with_context(|| format!("Failed to create log directory: {}", folder.display()))?;

        cleanup_old_logs(base_log_dir, config.retention_days, config.retention_runs)?;

        let appender = tracing_appender::rolling::daily(&folder, "dongne.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        file_guards.push(guard);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(build_filter(debug_flags, &config.level)?)
            .boxed();
        layers.push(file_layer);
        run_folder = Some(folder);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|_| ObservabilityError::AlreadyInitialized)?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir: run_folder,
    })
}

/// Initialize console logging with default settings
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingConfig::default())
}

/// Parse the timestamp out of a `run_YYYYmmdd_HHMMSS` folder name
pub fn parse_run_timestamp(dir_name: &str) -> Option<DateTime<Utc>> {
    let raw = dir_name.strip_prefix(RUN_PREFIX)?;
    let naive = NaiveDateTime::parse_from_str(raw, RUN_TIMESTAMP_FORMAT).ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Decide which run folders fall outside the retention policy
///
/// Folders older than `retention_days` go first; of the remainder only the
/// newest `retention_runs` are kept.
pub fn plan_log_cleanup(
    mut runs: Vec<(PathBuf, DateTime<Utc>)>,
    now: DateTime<Utc>,
    retention_days: u64,
    retention_runs: usize,
) -> Vec<PathBuf> {
    let cutoff = now - Duration::days(retention_days as i64);
    runs.sort_by_key(|(_, dt)| *dt);

    let (expired, kept): (Vec<_>, Vec<_>) = runs.into_iter().partition(|(_, dt)| *dt < cutoff);
    let mut doomed: Vec<PathBuf> = expired.into_iter().map(|(path, _)| path).collect();

    if kept.len() > retention_runs {
        let excess = kept.len() - retention_runs;
        doomed.extend(kept.into_iter().take(excess).map(|(path, _)| path));
    }

    doomed
}

#[cfg(feature = "file-logging")]
fn cleanup_old_logs(base_log_dir: &Path, retention_days: u64, retention_runs: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let timestamp = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_run_timestamp);
        if let Some(dt) = timestamp {
            runs.push((path, dt));
        }
    }

    for path in plan_log_cleanup(runs, Utc::now(), retention_days, retention_runs) {
        if let Err(e) = std::fs::remove_dir_all(&path) {
            tracing::warn!("Failed to remove old log directory {}: {}", path.display(), e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_run_timestamp() {
        assert_eq!(parse_run_timestamp("run_20250101_120000"), Some(at(2025, 1, 1)));
        assert_eq!(parse_run_timestamp("run_garbage"), None);
        assert_eq!(parse_run_timestamp("20250101_120000"), None);
    }

    #[test]
    fn test_cleanup_by_age_and_count() {
        let now = at(2025, 3, 1);
        let runs = vec![
            (PathBuf::from("c"), at(2025, 2, 27)),
            (PathBuf::from("old"), at(2024, 12, 1)),
            (PathBuf::from("a"), at(2025, 2, 20)),
            (PathBuf::from("b"), at(2025, 2, 25)),
        ];

        let doomed = plan_log_cleanup(runs, now, 30, 2);
        assert_eq!(doomed, vec![PathBuf::from("old"), PathBuf::from("a")]);
    }

    #[test]
    fn test_cleanup_keeps_everything_within_policy() {
        let now = at(2025, 3, 1);
        let runs = vec![(PathBuf::from("a"), at(2025, 2, 28))];
        assert!(plan_log_cleanup(runs, now, 30, 10).is_empty());
    }

    #[cfg(feature = "file-logging")]
    #[test]
    fn test_cleanup_old_logs_removes_only_stale_runs() {
        let temp = tempfile::TempDir::new().unwrap();
        let run_dir = |days_ago: i64| {
            let stamp = (Utc::now() - Duration::days(days_ago)).format(RUN_TIMESTAMP_FORMAT);
            let path = temp.path().join(format!("{RUN_PREFIX}{stamp}"));
            std::fs::create_dir(&path).unwrap();
            path
        };
        let newest = run_dir(1);
        let older = run_dir(2);
        let expired = run_dir(60);
        std::fs::create_dir(temp.path().join("notes")).unwrap();
        std::fs::write(temp.path().join("stray.log"), "x").unwrap();

        cleanup_old_logs(temp.path(), 30, 1).unwrap();

        assert!(newest.exists());
        assert!(!older.exists());
        assert!(!expired.exists());
        assert!(temp.path().join("notes").exists());
        assert!(temp.path().join("stray.log").exists());
    }

    #[test]
    fn test_build_filter_rejects_garbage() {
        let flags = CrateDebugFlags::default();
        assert!(build_filter(&flags, "info").is_ok());
        assert!(matches!(
            build_filter(&flags, "dongne=notalevel"),
            Err(ObservabilityError::InvalidFilter { .. })
        ));
    }
}
