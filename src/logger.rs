//! Logging setup for fwstamp binaries
//!
//! Everything goes to stderr (or `FWSTAMP_LOG_PATH`): stdout belongs to the
//! build tool that consumes the flag string.

use crate::defaults::{DEFAULT_LOG_LEVEL, ENV_LOG_LEVEL, ENV_LOG_PATH};
use chrono::{Local, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Mutex;

/// JSON-lines logger, one object per record
#[derive(Debug)]
pub struct JsonLogger {
    level: Level,
    target_file: Mutex<Option<File>>,
}

impl JsonLogger {
    /// Create a new JSON logger writing to `log_path`, or stderr when `None`
    pub fn new(level: Level, log_path: Option<String>) -> Self {
        let target_file =
            log_path.and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

        JsonLogger {
            level,
            target_file: Mutex::new(target_file),
        }
    }

    /// Initialize the logger with specified level and source
    ///
    /// Returns the effective level name and where it came from.
    pub fn init_with_level(level_str: &str, source: &str) -> (String, String) {
        let (use_json, actual_level) = parse_level_spec(level_str);
        let filter = LevelFilter::from_str(actual_level).unwrap_or(LevelFilter::Info);

        if use_json {
            let level = filter.to_level().unwrap_or(Level::Error);
            let logger = Box::new(JsonLogger::new(level, env::var(ENV_LOG_PATH).ok()));

            match log::set_boxed_logger(logger) {
                Ok(()) => log::set_max_level(filter),
                Err(e) => eprintln!("Failed to initialize JSON logger: {e}"),
            }
        } else {
            let result = env_logger::Builder::new()
                .filter_level(filter)
                .target(env_logger::Target::Stderr)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "🏷️  [{} {} {}] {}",
                        Local::now().format("%Y-%m-%dT%H:%M:%S"),
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .try_init();

            if let Err(e) = result {
                eprintln!("Failed to initialize logger: {e}");
            }
        }

        (actual_level.to_string(), source.to_string())
    }

    /// Initialize the logger from `FWSTAMP_LOG_LEVEL`, defaulting to warnings only
    pub fn init() {
        let log_level = env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
        Self::init_with_level(&log_level, ENV_LOG_LEVEL);
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut guard) = self.target_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.write_all(line.as_bytes());
                let _ = file.flush();
                return;
            }
        }
        let mut stderr = io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = json!({
            "@timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "@level": record.level().to_string().to_lowercase(),
            "@message": record.args().to_string(),
            "@module": record.target(),
            "@pid": std::process::id(),
            "@file": record.file().unwrap_or("unknown"),
            "@line": record.line().unwrap_or(0),
        });

        self.write_line(&format!("{}\n", entry));
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.target_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
        let _ = io::stderr().flush();
    }
}

/// Split a level string into (json mode, level name)
pub fn parse_level_spec(level_str: &str) -> (bool, &str) {
    if let Some(stripped) = level_str.strip_prefix("json:") {
        (true, stripped)
    } else if level_str == "json" {
        (true, "info")
    } else {
        (false, level_str)
    }
}
