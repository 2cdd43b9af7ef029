//! Diagnostics setup
//!
//! Records go to stdout, so every diagnostic is written to stderr (and
//! optionally a log file). Verbosity is decided once at startup.

use crate::error::{Result, SensorError};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used without `-v`
pub const QUIET_FILTER: &str = "warn";

/// Filter used with `-v`
pub const VERBOSE_FILTER: &str = "info,mpu60x0_logger=debug";

/// Process-wide diagnostics settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogSettings {
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl LogSettings {
    pub fn new(verbose: bool, log_file: Option<PathBuf>) -> Self {
        Self { verbose, log_file }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            VERBOSE_FILTER
        } else {
            QUIET_FILTER
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// Install the global subscriber
///
/// The returned guard must be held until exit when a log file is used,
/// otherwise buffered lines are lost.
pub fn init(settings: &LogSettings) -> Result<Option<WorkerGuard>> {
    let (file_writer, guard) = match settings.log_file {
        Some(ref path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(settings.filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_writer.map(|w| fmt::layer().with_writer(w).with_ansi(false)))
        .try_init()
        .map_err(|e| SensorError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

/// Open the log file, creating its directory if needed
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SensorError::Config(format!("Invalid log file path {:?}", path)))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| SensorError::Config(format!("Failed to open log file {:?}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_follows_verbosity() {
        assert_eq!(LogSettings::default().default_directive(), "warn");
        assert_eq!(
            LogSettings::new(true, None).default_directive(),
            "info,mpu60x0_logger=debug"
        );
    }

    #[test]
    fn test_file_appender_rejects_directory_path() {
        assert!(file_appender(Path::new("/")).is_err());
    }

    #[test]
    fn test_file_appender_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("diag.log");

        file_appender(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_appender_unusable_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"").unwrap();

        let result = file_appender(&blocker.join("diag.log"));
        assert!(matches!(result, Err(SensorError::Config(_))));
    }
}
