//! Logging init: file from `[logging]` (or the XDG state dir), stderr as fallback.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// sqlx logs every statement at info; keep it to slow queries and errors.
pub const DEFAULT_FILTER: &str = "info,pagecheck=debug,pagecheck_core=debug,sqlx=warn";

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(std::fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(std::fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

/// Filter directives in effect: `RUST_LOG` if set and non-blank, else the
/// configured filter, else `DEFAULT_FILTER`.
fn filter_directives(cfg: &LoggingConfig, rust_log: Option<String>) -> String {
    rust_log
        .filter(|v| !v.trim().is_empty())
        .or_else(|| Some(cfg.filter.clone()).filter(|f| !f.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn env_filter(cfg: &LoggingConfig) -> EnvFilter {
    let directives = filter_directives(cfg, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("pagecheck: ignoring log filter {directives:?}: {e}");
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Default log file: `~/.local/state/pagecheck/pagecheck.log`.
pub fn default_log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagecheck")?;
    Ok(xdg_dirs.get_state_home().join("pagecheck").join("pagecheck.log"))
}

/// Log file for this configuration: `[logging] file` if set, else the default.
pub fn log_file_path(cfg: &LoggingConfig) -> Result<PathBuf> {
    match &cfg.file {
        Some(path) => Ok(path.clone()),
        None => default_log_file_path(),
    }
}

/// Initialize structured logging to the configured log file.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging(cfg: &LoggingConfig) -> Result<()> {
    let log_file_path = log_file_path(cfg)?;
    if let Some(dir) = log_file_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let writer: BoxMakeWriter = BoxMakeWriter::new(FileMakeWriter(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))?;

    tracing::info!("pagecheck logging initialized at {}", log_file_path.display());

    Ok(())
}

/// Initialize logging to stderr only (no file). Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stderr(cfg: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(cfg))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn with_filter(filter: &str) -> LoggingConfig {
        LoggingConfig {
            filter: filter.to_string(),
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn rust_log_overrides_configured_filter() {
        let got = filter_directives(&with_filter("warn"), Some("trace".to_string()));
        assert_eq!(got, "trace");
    }

    #[test]
    fn configured_filter_used_without_rust_log() {
        assert_eq!(filter_directives(&with_filter("warn"), None), "warn");
        assert_eq!(
            filter_directives(&with_filter("warn"), Some("  ".to_string())),
            "warn"
        );
    }

    #[test]
    fn blank_configured_filter_falls_back_to_default() {
        assert_eq!(filter_directives(&with_filter(""), None), DEFAULT_FILTER);
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn configured_file_overrides_state_dir() {
        let cfg = LoggingConfig {
            file: Some(PathBuf::from("/var/log/pagecheck.log")),
            ..LoggingConfig::default()
        };
        assert_eq!(
            log_file_path(&cfg).unwrap(),
            Path::new("/var/log/pagecheck.log")
        );
    }

    #[test]
    fn default_file_is_under_pagecheck_state_dir() {
        let Ok(path) = default_log_file_path() else {
            return; // no HOME in this environment
        };
        assert!(path.ends_with("pagecheck/pagecheck.log"));
    }
}
