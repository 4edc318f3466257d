//! Structured logging setup. The terminal is owned by the UI, so events go to
//! a plain-text log file or nowhere at all.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Build the event filter: `RUST_LOG` when set and valid, otherwise the
/// configured directive.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|source| LoggingError::Filter {
        filter: config.filter.clone(),
        source,
    })
}

/// Install the global subscriber. Returns `Ok(false)` when no log file is
/// configured and nothing was installed.
pub fn init(config: &LoggingConfig) -> Result<bool, LoggingError> {
    let Some(path) = &config.file else {
        return Ok(false);
    };

    let filter = build_filter(config)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::FileOpen {
            path: path.clone(),
            source,
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    tracing::info!(file = %path.display(), "logging initialized");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_file_installs_nothing() {
        let config = LoggingConfig::default();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_bad_log_path_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            filter: "info".into(),
            // A directory can't be opened for appending
            file: Some(dir.path().to_path_buf()),
        };
        match init(&config) {
            Err(LoggingError::FileOpen { path, .. }) => assert_eq!(path, dir.path()),
            other => panic!("expected FileOpen error, got {other:?}"),
        }
    }
}
