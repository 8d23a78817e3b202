//! Log sinks: console, a size-rotated `hwwatch.log` and a per-run `main.log`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use hwwatch_core::config::LogConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const ROTATING_LOG: &str = "hwwatch.log";
pub const RUN_LOG: &str = "main.log";
pub const MAX_LOG_BYTES: u64 = 50_000_000;
pub const LOG_BACKUPS: usize = 5;

pub fn init_logging(config: &LogConfig) -> Result<()> {
    fs::create_dir_all(&config.dir)
        .with_context(|| format!("creating log directory {}", config.dir.display()))?;

    let rotating = RotatingFileWriter::open(config.dir.join(ROTATING_LOG), MAX_LOG_BYTES, LOG_BACKUPS)
        .context("opening rotating log")?;
    let run_log = File::create(config.dir.join(RUN_LOG)).context("opening run log")?;

    let (filter, rejected) = parse_filter(&config.filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Mutex::new(rotating)),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Mutex::new(run_log)),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    if let Some(error) = rejected {
        tracing::warn!(filter = %config.filter, %error, "Invalid log filter, falling back to info");
    }
    Ok(())
}

/// Parse a filter directive, falling back to `info` and returning the parse
/// error when it is invalid.
fn parse_filter(raw: &str) -> (EnvFilter, Option<String>) {
    match EnvFilter::try_new(raw) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e.to_string())),
    }
}

/// Appending file writer that rolls over to `<name>.1` … `<name>.N` once the
/// next write would push it past `max_bytes`.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self { path, max_bytes, backups, file, written })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups > 0 {
            for i in (1..self.backups).rev() {
                let from = backup_path(&self.path, i);
                if from.exists() {
                    fs::rename(&from, backup_path(&self.path, i + 1))?;
                }
            }
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        }
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
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

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_writes_below_threshold_stay_in_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&path, 100, 2).unwrap();

        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();

        assert_eq!(read(&path), "first\nsecond\n");
        assert!(!backup_path(&path, 1).exists());
    }

    #[test]
    fn test_rotation_shifts_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&path, 10, 2).unwrap();

        writer.write_all(b"aaaaaaaa\n").unwrap();
        writer.write_all(b"bbbbbbbb\n").unwrap();
        writer.write_all(b"cccccccc\n").unwrap();
        writer.write_all(b"dddddddd\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "dddddddd\n");
        assert_eq!(read(&backup_path(&path, 1)), "cccccccc\n");
        assert_eq!(read(&backup_path(&path, 2)), "bbbbbbbb\n");
        assert!(!backup_path(&path, 3).exists());
    }

    #[test]
    fn test_reopen_appends_and_counts_existing_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "12345678\n").unwrap();

        let mut writer = RotatingFileWriter::open(&path, 10, 1).unwrap();
        writer.write_all(b"next\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&backup_path(&path, 1)), "12345678\n");
        assert_eq!(read(&path), "next\n");
    }

    #[test]
    fn test_invalid_filter_falls_back_with_error() {
        let (_, rejected) = parse_filter("hwwatch=debug");
        assert!(rejected.is_none());

        let (_, rejected) = parse_filter("hwwatch=loud");
        assert!(rejected.is_some());
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_init_logging_writes_both_sinks_and_truncates_run_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RUN_LOG), "stale line from previous run\n").unwrap();
        fs::write(dir.path().join(ROTATING_LOG), "kept line from previous run\n").unwrap();

        init_logging(&LogConfig {
            dir: dir.path().to_path_buf(),
            filter: "info".into(),
        })
        .unwrap();
        tracing::info!("logging smoke marker");

        let run_log = read(&dir.path().join(RUN_LOG));
        assert!(!run_log.contains("stale line"));
        assert!(run_log.contains("logging smoke marker"));
        assert!(run_log.contains("INFO"));
        assert!(run_log.contains("logging.rs"));

        let rotating = read(&dir.path().join(ROTATING_LOG));
        assert!(rotating.starts_with("kept line from previous run\n"));
        assert!(rotating.contains("logging smoke marker"));
    }

    #[test]
    fn test_zero_backups_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut writer = RotatingFileWriter::open(&path, 10, 0).unwrap();

        writer.write_all(b"aaaaaaaa\n").unwrap();
        writer.write_all(b"bbbbbbbb\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(read(&path), "bbbbbbbb\n");
        assert!(!backup_path(&path, 1).exists());
    }
}
