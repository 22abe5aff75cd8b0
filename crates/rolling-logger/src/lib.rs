//! Rolling File Logger
//!
//! Installs a global `tracing` subscriber that writes to a size-rotated log
//! file (`<app>.log`, `<app>.log.1`, ...) and to stderr. `log` records are
//! bridged into the same pipeline. The most recent formatted lines are kept
//! in a circular buffer so the app can show them without touching the disk.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub use tracing_subscriber::filter::LevelFilter;

/// Rotation and buffering limits
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Rotate once the active file would grow past this size
    pub max_bytes: u64,
    /// Rotated files kept besides the active one
    pub max_files: usize,
    /// Lines retained in the in-memory ring
    pub ring_lines: usize,
    /// Most verbose level recorded
    pub level: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_files: 3,
            ring_lines: 200,
            level: LevelFilter::INFO,
        }
    }
}

/// Logger setup errors
#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log file error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Bounded buffer of recent log lines
#[derive(Debug, Clone)]
pub struct LineRing {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LineRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append formatted output, splitting on newlines
    pub fn push_text(&self, text: &str) {
        if self.capacity == 0 {
            return;
        }
        let mut lines = match self.lines.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line.to_string());
        }
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

/// `io::Write` sink that rotates by size
pub struct RollingWriter {
    dir: PathBuf,
    base_name: String,
    file: File,
    size: u64,
    config: LoggerConfig,
    ring: LineRing,
}

impl RollingWriter {
    pub fn open(dir: &Path, app_name: &str, config: LoggerConfig, ring: LineRing) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let base_name = format!("{}.log", app_name);
        let path = dir.join(&base_name);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            base_name,
            file,
            size,
            config,
            ring,
        })
    }

    /// Path of the active log file
    pub fn active_path(&self) -> PathBuf {
        self.dir.join(&self.base_name)
    }

    fn rotated_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.{}", self.base_name, n))
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.config.max_files == 0 {
            self.file = File::create(self.active_path())?;
            self.size = 0;
            return Ok(());
        }
        let oldest = self.rotated_path(self.config.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.config.max_files).rev() {
            let from = self.rotated_path(n);
            if from.exists() {
                fs::rename(&from, self.rotated_path(n + 1))?;
            }
        }
        fs::rename(self.active_path(), self.rotated_path(1))?;
        self.file = OpenOptions::new().create(true).append(true).open(self.active_path())?;
        self.size = 0;
        Ok(())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.size > 0 && self.size + buf.len() as u64 > self.config.max_bytes {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        self.ring.push_text(&String::from_utf8_lossy(&buf[..written]));
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

static RING: OnceLock<LineRing> = OnceLock::new();

/// Initialize the global subscriber. Can only succeed once per process; a
/// failure to open the log file leaves it free for another attempt.
pub fn init_logger_with(log_dir: PathBuf, app_name: &str, config: LoggerConfig) -> Result<(), LoggerError> {
    if RING.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let ring = LineRing::new(config.ring_lines);
    let mut writer = RollingWriter::open(&log_dir, app_name, config, ring.clone())?;
    if RING.set(ring).is_err() {
        return Err(LoggerError::AlreadyInitialized);
    }

    writeln!(
        writer,
        "=== {} started {} ===",
        app_name,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
    )?;

    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(writer)))
        .with(fmt::layer().with_writer(io::stderr))
        .with(config.level);

    #[cfg(target_os = "android")]
    {
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(config.level.to_string().parse().unwrap_or(log::LevelFilter::Info))
                .with_tag(app_name.to_string()),
        );
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|_| LoggerError::AlreadyInitialized)?;
    }

    #[cfg(not(target_os = "android"))]
    {
        use tracing_subscriber::util::SubscriberInitExt;
        subscriber.try_init().map_err(|_| LoggerError::AlreadyInitialized)?;
    }

    log::info!("log directory: {}", log_dir.display());
    Ok(())
}

/// Recent formatted lines, oldest first. Empty before init.
pub fn recent_lines() -> Vec<String> {
    RING.get().map(LineRing::snapshot).unwrap_or_default()
}

pub fn info(msg: &str) {
    tracing::info!(target: "app", "{}", msg);
}

pub fn warn(msg: &str) {
    tracing::warn!(target: "app", "{}", msg);
}

pub fn error(msg: &str) {
    tracing::error!(target: "app", "{}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> LoggerConfig {
        LoggerConfig {
            max_bytes: 64,
            max_files: 2,
            ring_lines: 3,
            level: LevelFilter::INFO,
        }
    }

    #[test]
    fn test_ring_keeps_latest_lines() {
        let ring = LineRing::new(3);
        ring.push_text("a\nb\n");
        ring.push_text("c\nd\n");
        assert_eq!(ring.snapshot(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_ring_ignores_blank_lines() {
        let ring = LineRing::new(5);
        ring.push_text("\n  \nx\n");
        assert_eq!(ring.snapshot(), vec!["x"]);
    }

    #[test]
    fn test_writer_rotates_by_size() {
        let dir = tempfile::tempdir().unwrap();
        let ring = LineRing::new(10);
        let mut writer = RollingWriter::open(dir.path(), "Trips", small_config(), ring).unwrap();

        let line = [b'x'; 40];
        writer.write_all(&line).unwrap();
        writer.write_all(&line).unwrap();
        writer.write_all(&line).unwrap();
        writer.flush().unwrap();

        assert!(dir.path().join("Trips.log").exists());
        assert!(dir.path().join("Trips.log.1").exists());
        assert!(dir.path().join("Trips.log.2").exists());
        assert_eq!(fs::metadata(dir.path().join("Trips.log")).unwrap().len(), 40);
    }

    #[test]
    fn test_writer_drops_files_past_limit() {
        let dir = tempfile::tempdir().unwrap();
        let ring = LineRing::new(10);
        let mut writer = RollingWriter::open(dir.path(), "Trips", small_config(), ring).unwrap();

        for _ in 0..6 {
            writer.write_all(&[b'y'; 50]).unwrap();
        }

        assert!(dir.path().join("Trips.log.2").exists());
        assert!(!dir.path().join("Trips.log.3").exists());
    }

    #[test]
    fn test_init_retries_after_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let config = LoggerConfig {
            ring_lines: 50,
            level: LevelFilter::DEBUG,
            ..small_config()
        };

        let err = init_logger_with(blocker.join("logs"), "Trips", config).unwrap_err();
        assert!(matches!(err, LoggerError::Io(_)));
        assert!(recent_lines().is_empty());

        init_logger_with(dir.path().join("logs"), "Trips", config).unwrap();
        tracing::debug!("debug line kept");
        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.contains("Trips started")));
        assert!(lines.iter().any(|l| l.contains("debug line kept")));

        let again = init_logger_with(dir.path().join("logs"), "Trips", config).unwrap_err();
        assert!(matches!(again, LoggerError::AlreadyInitialized));
    }

    #[test]
    fn test_writer_feeds_ring() {
        let dir = tempfile::tempdir().unwrap();
        let ring = LineRing::new(2);
        let mut writer = RollingWriter::open(dir.path(), "Trips", small_config(), ring.clone()).unwrap();

        writer.write_all(b"one\ntwo\nthree\n").unwrap();

        assert_eq!(ring.snapshot(), vec!["two", "three"]);
    }
}
