// src/util/log.rs

//! File-based logging. The terminal belongs to the UI, so nothing is
//! written to stdout or stderr while the app is running.
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::{LazyLock, OnceLock};
use chrono::Local;

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Global logger instance. `None` when the log directory is not writable.
pub static LOGGER: LazyLock<Option<Logger>> = LazyLock::new(|| {
    let dir = LOG_DIR.get().cloned().unwrap_or_else(default_log_dir);
    Logger::new(&dir).ok()
});

/// Unit tests log under the system temp dir instead of the working copy.
fn default_log_dir() -> PathBuf {
    if cfg!(test) {
        std::env::temp_dir().join("ai-master-test-logs")
    } else {
        PathBuf::from("./logs")
    }
}

/// Sets the directory used by [`LOGGER`]. Only the first call has an effect,
/// and only before the first log line is written.
pub fn init(log_dir: &Path) {
    let _ = LOG_DIR.set(log_dir.to_path_buf());
}

/// Log severity levels
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn filename(&self) -> &str {
        match self {
            LogLevel::Error => "error.log",
            LogLevel::Warn => "warn.log",
            LogLevel::Info => "info.log",
            LogLevel::Debug => "debug.log",
        }
    }
}

/// Logger that writes to separate files by severity
pub struct Logger {
    log_dir: PathBuf,
    error_file: Mutex<File>,
    warn_file: Mutex<File>,
    info_file: Mutex<File>,
    debug_file: Mutex<File>,
}

impl Logger {
    /// Create a new logger in `log_dir`. Existing files are truncated.
    pub fn new(log_dir: &Path) -> std::io::Result<Self> {
        DEBUG_ENABLED.get_or_init(|| {
            std::env::var("DEBUG").unwrap_or_default() == "true"
        });

        create_dir_all(log_dir)?;

        let open = |level: LogLevel| File::create(log_dir.join(level.filename()));

        Ok(Self {
            log_dir: log_dir.to_path_buf(),
            error_file: Mutex::new(open(LogLevel::Error)?),
            warn_file: Mutex::new(open(LogLevel::Warn)?),
            info_file: Mutex::new(open(LogLevel::Info)?),
            debug_file: Mutex::new(open(LogLevel::Debug)?),
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    fn write_log(&self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let formatted = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        let file = match level {
            LogLevel::Error => &self.error_file,
            LogLevel::Warn => &self.warn_file,
            LogLevel::Info => &self.info_file,
            LogLevel::Debug => &self.debug_file,
        };

        if let Ok(mut file) = file.lock() {
            let _ = file.write_all(formatted.as_bytes());
            let _ = file.flush();
        }
    }

    pub fn error(&self, message: &str) {
        self.write_log(LogLevel::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.write_log(LogLevel::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.write_log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.write_log(LogLevel::Debug, message);
    }
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
            logger.error(&format!($($arg)*));
        }
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
            logger.warn(&format!($($arg)*));
        }
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
            logger.info(&format!($($arg)*));
        }
    }};
}

/// Convenience macro for debug logging with formatting
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if *$crate::util::log::DEBUG_ENABLED.get().unwrap_or(&false) {
            if let Some(logger) = $crate::util::log::LOGGER.as_ref() {
                logger.debug(&format!($($arg)*));
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_logger_creation() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::new(temp_dir.path()).expect("Failed to create logger");
        assert_eq!(logger.log_dir(), temp_dir.path());

        logger.error("Test error");
        logger.warn("Test warning");
        logger.info("Test info");
        logger.debug("Test debug");

        for name in ["error.log", "warn.log", "info.log", "debug.log"] {
            assert!(temp_dir.path().join(name).exists(), "{} missing", name);
        }

        let errors = fs::read_to_string(temp_dir.path().join("error.log")).unwrap();
        assert!(errors.contains("[ERROR] Test error"));
        assert!(!errors.contains("Test warning"));
    }

    #[test]
    fn test_global_logger_stays_out_of_working_dir() {
        assert!(default_log_dir().starts_with(std::env::temp_dir()));

        crate::log_error!("written by the global logger");
        if let Some(logger) = LOGGER.as_ref() {
            assert!(!logger.log_dir().starts_with("./logs"));
            assert!(logger.log_dir().starts_with(std::env::temp_dir()));
        }
    }
}
