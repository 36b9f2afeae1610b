/*!
 * Console logging and request-scoped log context.
 *
 * The library logs through the `log` facade. Embedding applications can
 * install [`ConsoleLogger`] or any other `log` implementation.
 */

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fmt;
use std::io::Write;
use uuid::Uuid;

use crate::app_config::LogLevel;

// @struct: Colored stderr logger
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    // @creates: New logger with specified level
    pub fn new(level: LevelFilter) -> Self {
        ConsoleLogger { level }
    }

    // @initializes: Global logger
    pub fn init(level: LogLevel) -> Result<(), SetLoggerError> {
        let filter = level.to_level_filter();
        log::set_boxed_logger(Box::new(ConsoleLogger::new(filter)))?;
        log::set_max_level(filter);
        Ok(())
    }

    // @returns: ANSI color code for a level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }

    fn render(record: &Record, timestamp: &str) -> String {
        format!(
            "\x1B[{}m{} {:<5} {}\x1B[0m",
            Self::color_for_level(record.level()),
            timestamp,
            record.level(),
            record.args()
        )
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f").to_string();
            let _ = writeln!(std::io::stderr(), "{}", Self::render(record, &now));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Identifies one alignment request in log output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    /// Context with a fresh random id
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Context with a caller-supplied id
    pub fn with_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Prefix for events emitted by one stage of this request
    pub fn stage(&self, stage: &'static str) -> StageTag<'_> {
        StageTag {
            request_id: &self.request_id,
            stage,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// `[<request_id>] <stage>:` prefix
#[derive(Debug, Clone, Copy)]
pub struct StageTag<'a> {
    request_id: &'a str,
    stage: &'static str,
}

impl fmt::Display for StageTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}:", self.request_id, self.stage)
    }
}
