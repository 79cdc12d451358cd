use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Debug topics understood by --debug-filter
pub const TOPICS: [&str; 5] = ["robot", "drive", "weapon", "scan", "round"];

// Writes to stderr so the board on stdout stays clean
#[derive(Debug)]
struct ArenaLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl ArenaLogger {
    fn topic_allowed(&self, target: &str) -> bool {
        match &self.debug_filters {
            Some(filters) => {
                filters.contains(target) || filters.iter().any(|f| target.starts_with(f.as_str()))
            }
            None => true,
        }
    }
}

impl log::Log for ArenaLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Filters narrow debug/trace chatter only; warnings always get through
        match metadata.level() {
            log::Level::Debug | log::Level::Trace => self.topic_allowed(metadata.target()),
            _ => true,
        }
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {target}: {message}",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );

        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // A broken stderr is not worth aborting the simulation for
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", output);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: OnceLock<ArenaLogger> = OnceLock::new();

/// Parses a `--log-level` value, falling back to `Info` for anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(debug_filter: Option<String>) -> Option<HashSet<String>> {
    debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    })
}

// Initialize the logger with optional comma-separated debug topics
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ArenaLogger {
        level,
        debug_filters: parse_filters(debug_filter),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))?;
    if let Some(filters) = &logger.debug_filters {
        for topic in unknown_topics(filters) {
            log::warn!("Unknown debug topic {:?}, known topics: {}", topic, TOPICS.join(", "));
        }
    }
    Ok(())
}

// Filters that match no topic, neither exactly nor as a prefix
fn unknown_topics(filters: &HashSet<String>) -> Vec<&str> {
    let mut unknown: Vec<&str> = filters
        .iter()
        .map(String::as_str)
        .filter(|f| !TOPICS.iter().any(|t| t.starts_with(f)))
        .collect();
    unknown.sort_unstable();
    unknown
}

// Topic macros. `glyph => ...` tags the line with the robot, and
// `glyph, round => ...` adds the round number.
#[macro_export]
macro_rules! debug_robot {
    ($glyph:expr, $round:expr => $($arg:tt)*) => {
        log::debug!(target: "robot", "[R{}][T{:03}] {}", $glyph, $round, format_args!($($arg)*))
    };
    ($glyph:expr => $($arg:tt)*) => {
        log::debug!(target: "robot", "[R{}] {}", $glyph, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "robot", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_drive {
    ($glyph:expr, $round:expr => $($arg:tt)*) => {
        log::debug!(target: "drive", "[R{}][T{:03}] {}", $glyph, $round, format_args!($($arg)*))
    };
    ($glyph:expr => $($arg:tt)*) => {
        log::debug!(target: "drive", "[R{}] {}", $glyph, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "drive", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_weapon {
    ($glyph:expr, $round:expr => $($arg:tt)*) => {
        log::debug!(target: "weapon", "[R{}][T{:03}] {}", $glyph, $round, format_args!($($arg)*))
    };
    ($glyph:expr => $($arg:tt)*) => {
        log::debug!(target: "weapon", "[R{}] {}", $glyph, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "weapon", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_scan {
    ($glyph:expr, $round:expr => $($arg:tt)*) => {
        log::debug!(target: "scan", "[R{}][T{:03}] {}", $glyph, $round, format_args!($($arg)*))
    };
    ($glyph:expr => $($arg:tt)*) => {
        log::debug!(target: "scan", "[R{}] {}", $glyph, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "scan", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug_round {
    ($round:expr => $($arg:tt)*) => {
        log::debug!(target: "round", "[T{:03}] {}", $round, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "round", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};

    fn logger(level: LevelFilter, filter: Option<&str>) -> ArenaLogger {
        ArenaLogger {
            level,
            debug_filters: parse_filters(filter.map(str::to_string)),
        }
    }

    fn meta(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_level_threshold() {
        let l = logger(LevelFilter::Warn, None);
        assert!(l.enabled(&meta(Level::Error, "botgrid")));
        assert!(l.enabled(&meta(Level::Warn, "botgrid")));
        assert!(!l.enabled(&meta(Level::Info, "botgrid")));
    }

    #[test]
    fn test_debug_filter_limits_topics() {
        let l = logger(LevelFilter::Debug, Some("drive, weapon"));
        assert!(l.enabled(&meta(Level::Debug, "drive")));
        assert!(l.enabled(&meta(Level::Debug, "weapon")));
        assert!(!l.enabled(&meta(Level::Debug, "scan")));
        // Non-debug records ignore the topic filter
        assert!(l.enabled(&meta(Level::Info, "scan")));
    }

    #[test]
    fn test_empty_filter_entries_are_dropped() {
        let filters = parse_filters(Some("scan,,".to_string())).unwrap();
        assert_eq!(filters.len(), 1);
        assert!(filters.contains("scan"));
    }

    #[test]
    fn test_unknown_topics_are_reported() {
        let filters = parse_filters(Some("dri,weapon,radar,bogus".to_string())).unwrap();
        assert_eq!(unknown_topics(&filters), vec!["bogus", "radar"]);
    }
}
