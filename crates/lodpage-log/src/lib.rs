//! Structured logging for lodpage.
//!
//! Console output with uptime timestamps and module paths, plus an optional
//! JSON log file for inspecting long builds afterwards. The filter comes from
//! `RUST_LOG` when set, otherwise from [`LogSettings::level`].

use std::path::Path;

use lodpage_config::LogSettings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
///
/// Only the binary calls this; library crates just emit events.
///
/// # Examples
///
/// ```no_run
/// use lodpage_config::LogSettings;
/// use lodpage_log::init_logging;
///
/// init_logging(&LogSettings::default());
/// ```
pub fn init_logging(settings: &LogSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_string(settings)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_file) = settings.file.as_deref().and_then(open_log_file) {
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

/// The filter string used when `RUST_LOG` is not set.
pub fn filter_string(settings: &LogSettings) -> String {
    if settings.level.trim().is_empty() {
        DEFAULT_FILTER.to_string()
    } else {
        settings.level.clone()
    }
}

fn open_log_file(path: &Path) -> Option<std::fs::File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && std::fs::create_dir_all(parent).is_err()
    {
        return None;
    }
    std::fs::File::create(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let settings = LogSettings::default();
        assert_eq!(filter_string(&settings), "info");
    }

    #[test]
    fn test_blank_level_falls_back() {
        let settings = LogSettings {
            level: "  ".to_string(),
            file: None,
        };
        assert_eq!(filter_string(&settings), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filter_parses() {
        let settings = LogSettings {
            level: "warn,lodpage_build=debug".to_string(),
            file: None,
        };
        let filter = EnvFilter::try_new(filter_string(&settings)).unwrap();
        assert!(format!("{filter}").contains("lodpage_build=debug"));
    }

    #[test]
    fn test_open_log_file_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("lodpage.log");
        assert!(open_log_file(&path).is_some());
        assert!(path.exists());
    }
}
