//! Named loggers with console output and an optional size-rotating file.
//!
//! There is no global logging state. Each [`get_logger`] call builds its
//! own `tracing` dispatcher from a [`LoggingConfig`], so calling it twice
//! for the same name never attaches a sink twice, and a disabled config
//! yields a logger that drops everything.
//!
//! Lines look like:
//!
//! ```text
//! 2026-01-02T03:04:05.678901Z - pipeline - INFO - saved 10 rows
//! ```
//!
//! # Examples
//! ```
//! use shared_utils::logging::{get_logger, LoggingConfig};
//! let tmp = tempfile::tempdir().unwrap();
//! let config = LoggingConfig::default().with_base_dir(tmp.path());
//! let log = get_logger("demo", Some("logs/demo.log".as_ref()), &config).unwrap();
//! log.info("Logger initialized successfully.");
//! let text = std::fs::read_to_string(tmp.path().join("logs/demo.log")).unwrap();
//! assert!(text.contains(" - demo - INFO - Logger initialized successfully."));
//! ```

use std::fmt::{self, Write as _};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{Dispatch, Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use crate::config::{ensure_dir, Settings};
use crate::error::{Error, Result};

/// Size at which the log file is rotated.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
/// Number of rotated files kept next to the live one.
pub const DEFAULT_BACKUP_COUNT: usize = 3;

/// Everything [`get_logger`] needs to build a logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// When `false`, loggers are built without any sink.
    pub enabled: bool,
    pub level: Level,
    /// Relative log-file paths are resolved against this directory.
    pub base_dir: PathBuf,
    pub max_file_bytes: u64,
    pub backup_count: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            enabled: true,
            level: Level::INFO,
            base_dir: PathBuf::from("."),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
        }
    }
}

impl LoggingConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        LoggingConfig {
            enabled: settings.log_enabled,
            base_dir: settings.base_dir.clone(),
            ..Default::default()
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_rotation(mut self, max_file_bytes: u64, backup_count: usize) -> Self {
        self.max_file_bytes = max_file_bytes;
        self.backup_count = backup_count;
        self
    }
}

/// A named logger handle.
///
/// Cheap to clone; clones share the same sinks.
#[derive(Debug, Clone)]
pub struct Logger {
    name: Arc<str>,
    enabled: bool,
    dispatch: Dispatch,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs `f` with this logger as the thread's default dispatcher, so any
    /// `tracing` event emitted inside `f` goes to this logger's sinks.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.in_scope(|| tracing::debug!("{message}"));
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.in_scope(|| tracing::info!("{message}"));
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.in_scope(|| tracing::warn!("{message}"));
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.in_scope(|| tracing::error!("{message}"));
    }
}

/// Builds a logger called `name`.
///
/// With logging enabled, events at `config.level` and above go to stderr
/// and, if `log_file` is given, to `config.base_dir/log_file` through a
/// size-rotating writer. Parent directories of the log file are created.
///
/// # Errors
/// - [`Error::Logging`] if `log_file` has no file name.
/// - [`Error::Io`] if the log directory or file cannot be created.
pub fn get_logger(name: &str, log_file: Option<&Path>, config: &LoggingConfig) -> Result<Logger> {
    let name: Arc<str> = Arc::from(name);
    if !config.enabled {
        return Ok(Logger {
            name,
            enabled: false,
            dispatch: Dispatch::none(),
        });
    }

    let console = tracing_subscriber::fmt::layer()
        .event_format(LineFormat { name: name.clone() })
        .with_writer(io::stderr)
        .with_ansi(false);

    let file = match log_file {
        Some(rel) => {
            let writer = RotatingFile::open(
                resolve_log_path(&config.base_dir, rel)?,
                config.max_file_bytes,
                config.backup_count,
            )?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LineFormat { name: name.clone() })
                    .with_writer(Mutex::new(writer))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(LevelFilter::from_level(config.level));

    Ok(Logger {
        name,
        enabled: true,
        dispatch: Dispatch::new(subscriber),
    })
}

fn resolve_log_path(base_dir: &Path, log_file: &Path) -> Result<PathBuf> {
    if log_file.file_name().is_none() {
        return Err(Error::Logging(format!(
            "log file path {} has no file name",
            log_file.display()
        )));
    }
    let path = base_dir.join(log_file);
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(path)
}

// ---------------------------------------------------------------------------
// Line format
// ---------------------------------------------------------------------------

/// `<timestamp> - <name> - <LEVEL> - <message>`
struct LineFormat {
    name: Arc<str>,
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        SystemTime.format_time(&mut writer)?;
        write!(writer, " - {} - {} - ", self.name, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ---------------------------------------------------------------------------
// Size-rotating file
// ---------------------------------------------------------------------------

/// Append-only file that rolls over to `<path>.1 .. <path>.N` once the next
/// write would bring it to `max_bytes` or more.
///
/// Rotation is disabled when either `max_bytes` or `backups` is zero; the
/// file then grows without bound. An empty file is never rolled over, so a
/// single write larger than `max_bytes` still lands in the live file.
#[derive(Debug)]
struct RotatingFile {
    path: PathBuf,
    file: File,
    written: u64,
    max_bytes: u64,
    backups: usize,
}

impl RotatingFile {
    fn open(path: PathBuf, max_bytes: u64, backups: usize) -> Result<Self> {
        let file = open_append(&path).map_err(|e| Error::io(&path, e))?;
        let written = file.metadata().map_err(|e| Error::io(&path, e))?.len();
        Ok(RotatingFile {
            path,
            file,
            written,
            max_bytes,
            backups,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        for i in (1..self.backups).rev() {
            let src = self.backup_path(i);
            if src.exists() {
                fs::rename(&src, self.backup_path(i + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;
        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.max_bytes > 0
            && self.backups > 0
            && self.written > 0
            && self.written + buf.len() as u64 >= self.max_bytes
        {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_writes_formatted_lines_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default().with_base_dir(tmp.path());
        let log = get_logger("demo_logger", Some(Path::new("logs/demo.log")), &config).unwrap();
        assert!(log.is_enabled());
        assert_eq!(log.name(), "demo_logger");

        log.info("Logger initialized successfully.");
        log.warn("This is a warning message.");
        log.error("This is an error message.");

        let text = read(&tmp.path().join("logs/demo.log"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "{text}");
        assert!(lines[0].ends_with(" - demo_logger - INFO - Logger initialized successfully."));
        assert!(lines[1].ends_with(" - demo_logger - WARN - This is a warning message."));
        assert!(lines[2].ends_with(" - demo_logger - ERROR - This is an error message."));
    }

    #[test]
    fn test_level_filter() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default()
            .with_base_dir(tmp.path())
            .with_level(Level::WARN);
        let log = get_logger("quiet", Some(Path::new("q.log")), &config).unwrap();
        log.debug("hidden debug");
        log.info("hidden info");
        log.warn("shown");
        let text = read(&tmp.path().join("q.log"));
        assert!(!text.contains("hidden"));
        assert!(text.contains(" - quiet - WARN - shown"));
    }

    #[test]
    fn test_debug_level_passes_debug() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default()
            .with_base_dir(tmp.path())
            .with_level(Level::DEBUG);
        let log = get_logger("verbose", Some(Path::new("v.log")), &config).unwrap();
        log.debug("details");
        assert!(read(&tmp.path().join("v.log")).contains(" - verbose - DEBUG - details"));
    }

    #[test]
    fn test_disabled_logger_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default()
            .with_base_dir(tmp.path())
            .with_enabled(false);
        let log = get_logger("off", Some(Path::new("logs/off.log")), &config).unwrap();
        assert!(!log.is_enabled());
        log.error("dropped");
        assert!(!tmp.path().join("logs").exists());
    }

    #[test]
    fn test_repeated_construction_does_not_duplicate_sinks() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default().with_base_dir(tmp.path());
        let _first = get_logger("dup", Some(Path::new("dup.log")), &config).unwrap();
        let second = get_logger("dup", Some(Path::new("dup.log")), &config).unwrap();
        second.info("once");
        let text = read(&tmp.path().join("dup.log"));
        assert_eq!(text.matches("once").count(), 1, "{text}");
    }

    #[test]
    fn test_in_scope_routes_library_events() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default().with_base_dir(tmp.path());
        let log = get_logger("lib", Some(Path::new("lib.log")), &config).unwrap();
        let value = log.in_scope(|| {
            tracing::info!(rows = 3, "saved");
            42
        });
        assert_eq!(value, 42);
        assert!(read(&tmp.path().join("lib.log")).contains(" - lib - INFO - saved rows=3"));
    }

    #[test]
    fn test_rejects_log_path_without_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default().with_base_dir(tmp.path());
        let err = get_logger("bad", Some(Path::new("..")), &config).unwrap_err();
        assert!(matches!(err, Error::Logging(_)), "got {err:?}");
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            base_dir: PathBuf::from("/srv/app"),
            log_enabled: false,
        };
        let config = LoggingConfig::from_settings(&settings);
        assert!(!config.enabled);
        assert_eq!(config.base_dir, PathBuf::from("/srv/app"));
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
        assert_eq!(config.backup_count, DEFAULT_BACKUP_COUNT);
    }

    // --- rotation ---

    #[test]
    fn test_rotation_keeps_bounded_backups() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default()
            .with_base_dir(tmp.path())
            .with_rotation(200, 2);
        let log = get_logger("rot", Some(Path::new("rot.log")), &config).unwrap();
        for i in 0..30 {
            log.info(format_args!("line {i:02} of rotation test"));
        }
        let live = tmp.path().join("rot.log");
        let first = tmp.path().join("rot.log.1");
        let second = tmp.path().join("rot.log.2");
        assert!(live.exists() && first.exists() && second.exists());
        assert!(!tmp.path().join("rot.log.3").exists());
        for p in [&live, &first, &second] {
            assert!(fs::metadata(p).unwrap().len() <= 200);
        }
        assert!(read(&live).contains("line 29 of rotation test"));
    }

    #[test]
    fn test_rotating_file_without_backups_never_rolls_over() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("t.log");
        let mut f = RotatingFile::open(path.clone(), 10, 0).unwrap();
        f.write_all(b"0123456789").unwrap();
        f.write_all(b"abc").unwrap();
        f.flush().unwrap();
        assert_eq!(read(&path), "0123456789abc");
        assert!(!tmp.path().join("t.log.1").exists());
    }

    #[test]
    fn test_logger_without_backups_keeps_every_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let config = LoggingConfig::default()
            .with_base_dir(tmp.path())
            .with_rotation(120, 0);
        let log = get_logger("keep", Some(Path::new("keep.log")), &config).unwrap();
        for i in 0..5 {
            log.info(format_args!("entry {i}"));
        }
        let text = read(&tmp.path().join("keep.log"));
        for i in 0..5 {
            assert!(text.contains(&format!("entry {i}")), "entry {i} missing: {text}");
        }
        assert!(!tmp.path().join("keep.log.1").exists());
    }

    #[test]
    fn test_rotating_file_rolls_over_on_reaching_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("e.log");
        let mut f = RotatingFile::open(path.clone(), 10, 1).unwrap();
        f.write_all(b"12345").unwrap();
        // 5 + 5 == limit, so this write goes to a fresh file.
        f.write_all(b"67890").unwrap();
        assert_eq!(read(&path), "67890");
        assert_eq!(read(&tmp.path().join("e.log.1")), "12345");
    }

    #[test]
    fn test_rotating_file_oversized_first_write_stays_live() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("big.log");
        let mut f = RotatingFile::open(path.clone(), 4, 2).unwrap();
        f.write_all(b"far too long").unwrap();
        assert_eq!(read(&path), "far too long");
        assert!(!tmp.path().join("big.log.1").exists());
    }

    #[test]
    fn test_rotating_file_resumes_existing_size() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("r.log");
        fs::write(&path, b"12345678").unwrap();
        let mut f = RotatingFile::open(path.clone(), 10, 1).unwrap();
        f.write_all(b"xyz").unwrap();
        assert_eq!(read(&path), "xyz");
        assert_eq!(read(&tmp.path().join("r.log.1")), "12345678");
    }
}
