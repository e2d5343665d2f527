//! Structured logging for the Strata tools.
//!
//! Sets up span-based, filterable logging via the `tracing` ecosystem:
//! console output with uptime timestamps and thread names (region workers are
//! named), plus JSON file logging in debug builds. The level comes from
//! `RUST_LOG` when set, else from the settings' `debug.log_level`.

use std::fs::File;
use std::path::Path;

use strata_config::Settings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";
const LOG_FILE: &str = "strata.log";

fn filter_string(settings: Option<&Settings>) -> String {
    match settings {
        Some(settings) if !settings.debug.log_level.is_empty() => {
            settings.debug.log_level.clone()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Create `log_dir` if needed and truncate the log file inside it.
fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE)).ok()
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - Optional directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `settings` - Optional settings supplying the log level
///
/// # Examples
///
/// ```no_run
/// use strata_config::Settings;
/// use strata_log::init_logging;
///
/// let settings = Settings::default();
/// init_logging(None, false, Some(&settings));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, settings: Option<&Settings>) {
    let filter_str = filter_string(settings);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && let Some(log_file) = open_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// The filter used when neither `RUST_LOG` nor the settings say otherwise.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{filter}").contains("info"));
    }

    #[test]
    fn test_settings_level_is_used() {
        let mut settings = Settings::default();
        settings.debug.log_level = "strata_world=trace,warn".to_string();
        assert_eq!(filter_string(Some(&settings)), "strata_world=trace,warn");
    }

    #[test]
    fn test_empty_settings_level_falls_back() {
        let mut settings = Settings::default();
        settings.debug.log_level.clear();
        assert_eq!(filter_string(Some(&settings)), DEFAULT_FILTER);
        assert_eq!(filter_string(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,strata_world=trace",
            "warn,strata_terrain=debug",
            "error",
        ];

        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {filter_str}");
        }
    }

    #[test]
    fn test_log_file_created_in_nested_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_dir = temp_dir.path().join("config").join("logs");
        std::fs::create_dir_all(&log_dir).unwrap();
        std::fs::write(log_dir.join(LOG_FILE), "previous run").unwrap();

        let file = open_log_file(&log_dir);
        assert!(file.is_some(), "log file not created");
        let contents = std::fs::read_to_string(log_dir.join(LOG_FILE)).unwrap();
        assert!(contents.is_empty(), "log file should be truncated");

        let fresh = temp_dir.path().join("fresh");
        assert!(open_log_file(&fresh).is_some());
        assert!(fresh.join(LOG_FILE).exists());
    }

    #[test]
    fn test_log_file_unavailable_when_dir_is_a_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();
        assert!(open_log_file(&blocker).is_none());
    }
}
