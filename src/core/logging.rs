//! Process logging bootstrap
//!
//! Events go to stderr and are appended to the workspace log file. Logging
//! must never take the process down, so every failure here degrades to a
//! narrower set of sinks instead of returning an error.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the global subscriber.
///
/// The filter defaults to `INFO` and honours `RUST_LOG`. Returns `false`
/// when the log file could not be opened and only stderr is active.
pub fn init(log_file: &Path) -> bool {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(directives.as_deref());

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let file = open_log_file(log_file);
    let file_active = file.is_some();
    let file_layer = file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    // A subscriber may already be installed (tests, embedding); keep it
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    file_active
}

/// Filter built from `RUST_LOG`-style directives; `INFO` applies only when none are given
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return None;
        }
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_subscriber::Layer;
    use tracing_subscriber::Registry;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_open_log_file_creates_parent_and_appends() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("logs/integra.log");

        {
            use std::io::Write;
            let mut file = open_log_file(&path).expect("log file should open");
            writeln!(file, "first").unwrap();
        }
        {
            use std::io::Write;
            let mut file = open_log_file(&path).expect("log file should reopen");
            writeln!(file, "second").unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    fn max_level(filter: &EnvFilter) -> Option<LevelFilter> {
        <EnvFilter as Layer<Registry>>::max_level_hint(filter)
    }

    #[test]
    fn test_env_filter_defaults_to_info() {
        assert_eq!(max_level(&env_filter(None)), Some(LevelFilter::INFO));
        assert_eq!(max_level(&env_filter(Some(""))), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_env_filter_honours_directives() {
        assert_eq!(max_level(&env_filter(Some("warn"))), Some(LevelFilter::WARN));
        assert_eq!(max_level(&env_filter(Some("debug"))), Some(LevelFilter::DEBUG));
        assert_eq!(
            max_level(&env_filter(Some("integra=debug"))),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_open_log_file_unwritable_location() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(open_log_file(&blocker.join("integra.log")).is_none());
    }
}
