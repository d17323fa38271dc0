//! Tracing subscriber initialization.
//!
//! The binary logs to a file by default so that stdout stays clean for table
//! output (and JSON). `--log-stderr` switches to stderr for quick debugging.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Append to a file, creating parent directories as needed.
    File(PathBuf),
    /// Write to stderr.
    Stderr,
}

/// `RUST_LOG` if set and valid, otherwise `default_directive`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Split a log path into `(directory, file name)`, creating the directory.
fn prepare_log_file(log_path: &Path) -> Result<(PathBuf, String), LoggingError> {
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?
        .to_string();

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    Ok((directory, file_name))
}

/// Install the global subscriber. Respects `RUST_LOG`, defaults to `info`.
///
/// # Errors
///
/// Fails if the log directory cannot be created or a subscriber is already set.
pub fn init(destination: &LogDestination) -> Result<(), LoggingError> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter("info"));

    match destination {
        LogDestination::File(path) => {
            let (directory, file_name) = prepare_log_file(path)?;
            let file_appender = tracing_appender::rolling::never(directory, file_name);
            builder
                .with_writer(file_appender)
                .with_ansi(false)
                .try_init()
        }
        LogDestination::Stderr => builder.with_writer(std::io::stderr).try_init(),
    }
    .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn prepare_log_file_creates_missing_directory() {
        let test_dir = std::env::temp_dir().join("rowgrid_test_logs_create");
        let _ = fs::remove_dir_all(&test_dir);

        let (directory, file_name) =
            prepare_log_file(&test_dir.join("nested").join("app.log")).expect("valid path");

        assert!(directory.exists(), "Log directory should be created: {:?}", directory);
        assert_eq!(file_name, "app.log");

        let _ = fs::remove_dir_all(&test_dir);
    }

    #[test]
    fn prepare_log_file_bare_name_uses_current_directory() {
        let (directory, file_name) =
            prepare_log_file(Path::new("rowgrid.log")).expect("valid path");
        assert_eq!(directory, PathBuf::from("."));
        assert_eq!(file_name, "rowgrid.log");
    }

    #[test]
    fn prepare_log_file_rejects_path_without_file_name() {
        let result = prepare_log_file(Path::new("/"));
        assert!(matches!(result, Err(LoggingError::InvalidPath(_))));
    }

    #[test]
    #[serial(tracing_init)]
    fn init_twice_reports_already_set() {
        let test_dir = std::env::temp_dir().join("rowgrid_test_logs_init");
        let destination = LogDestination::File(test_dir.join("init.log"));

        // The first call may also fail if another test installed a subscriber.
        let _ = init(&destination);
        let second = init(&destination);

        assert!(matches!(second, Err(LoggingError::SubscriberAlreadySet)));
        assert!(test_dir.exists());

        let _ = fs::remove_dir_all(&test_dir);
    }
}
