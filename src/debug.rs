//! Logging bridge for par-glyph.
//!
//! Routes every `log::info!()`/`log::debug!()` etc. to stderr and, when a log
//! file is configured, appends the same records to it.
//!
//! Level precedence: the `--log-level` flag, then `RUST_LOG` (plain level
//! names only, e.g. `debug`), then `warn`.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Level used when neither the flag nor `RUST_LOG` says otherwise
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct BridgeLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

static LOGGER: OnceLock<BridgeLogger> = OnceLock::new();

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Parse a `RUST_LOG`-style value. Module filters are not supported.
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse::<LevelFilter>().ok()
}

/// Resolve the effective level from the CLI flag and the environment.
pub fn resolve_level(cli_level: Option<LevelFilter>, env_value: Option<&str>) -> LevelFilter {
    cli_level
        .or_else(|| env_value.and_then(parse_level))
        .unwrap_or(DEFAULT_LEVEL)
}

/// One formatted log line, without trailing newline.
pub fn format_record(
    timestamp: &str,
    level: log::Level,
    target: &str,
    msg: &dyn fmt::Display,
) -> String {
    format!("[{}] [{:<5}] [{}] {}", timestamp, level, target, msg)
}

impl Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(
            &get_timestamp(),
            record.level(),
            record.target(),
            record.args(),
        );

        let _ = writeln!(io::stderr().lock(), "{}", line);
        if let Some(file) = &self.file {
            let mut file = file.lock();
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Install the logger. Later calls are ignored.
///
/// A log file that cannot be opened is reported on stderr and skipped; it
/// never stops the run.
pub fn init_log_bridge(cli_level: Option<LevelFilter>, log_file: Option<&Path>) {
    let env_value = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, env_value.as_deref());

    let file = log_file.and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => Some(Mutex::new(f)),
            Err(e) => {
                eprintln!(
                    "par-glyph: warning: cannot open log file {}: {}",
                    path.display(),
                    e
                );
                None
            }
        }
    });

    let logger = LOGGER.get_or_init(|| BridgeLogger { level, file });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
