//! Logger utility for application-wide logging
//!
//! A small logger that bridges the `log` crate to a file, so a
//! validation run leaves a diagnostic trail without polluting the
//! report on stdout.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// File-backed logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Minimum level that gets recorded
    level: Level,
}

impl Logger {
    /// Creates a new logger writing to the given file
    pub fn new(log_file: &str, verbose: bool) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level: if verbose { Level::Debug } else { Level::Info },
        })
    }

    /// Writes one line to the log file
    pub fn log_line(&self, message: &str) -> io::Result<()> {
        if let Some(file) = &mut *self.file.lock().unwrap() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Installs a logger as the global `log` crate backend
    pub fn init_global_logger(log_file: &str, verbose: bool) -> io::Result<()> {
        let global_logger = Logger::new(log_file, verbose)?;
        let max_level = if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };

        // Only called once at startup; a second initialization attempt
        // is reported but not fatal.
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log_line(&message);
        }
    }

    fn flush(&self) {
        // Already flushing in log_line
    }
}
