//! Configuration defaults and the `key value` arena config file.

use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Board
pub const DEFAULT_WIDTH: i32 = 10;
pub const DEFAULT_HEIGHT: i32 = 10;
pub const DEFAULT_MOUNDS: u32 = 0;
pub const DEFAULT_PITS: u32 = 0;
pub const DEFAULT_FLAME_TRAPS: u32 = 0;

// Game rules
pub const DEFAULT_MAX_ROUNDS: u32 = 100; // Rounds 0..=max_rounds are played
pub const DEFAULT_CONFIG_FILE: &str = "arena_config.txt";
pub const WATCH_LIVE_DELAY_MS: u64 = 1000; // Pause between rounds in watch-live mode

// Robot defaults
pub const DEFAULT_INITIAL_HEALTH: i32 = 100;
pub const DEFAULT_INITIAL_ARMOR: i32 = 5;
pub const DEFAULT_GRENADES: u32 = 10;

// Damage ranges (inclusive)
pub const FLAME_TRAP_DAMAGE: (i32, i32) = (30, 50);
pub const RAILGUN_DAMAGE: (i32, i32) = (10, 20);
pub const HAMMER_DAMAGE: (i32, i32) = (50, 60);
pub const GRENADE_DAMAGE: (i32, i32) = (10, 40);
pub const FLAMETHROWER_DAMAGE: (i32, i32) = (30, 50);

// Weapon geometry
pub const RAILGUN_RANGE_FACTOR: i32 = 3; // Ray continues to 3x the target distance
pub const FLAMETHROWER_DEPTH: i32 = 4;
pub const FLAMETHROWER_HALF_WIDTH: i32 = 1;
pub const GRENADE_RADIUS: i32 = 1;

/// Glyphs handed out to robots in load order, cycling when exhausted.
pub const ROBOT_GLYPHS: [char; 10] = ['@', '$', '#', '%', '&', '!', '^', '*', '~', '+'];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value {value:?} for key {key:?}")]
    InvalidValue { key: String, value: String },
}

/// Arena settings consumed by the game at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
    pub mounds: u32,
    pub pits: u32,
    pub flame_traps: u32,
    pub max_rounds: u32,
    pub watch_live: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mounds: DEFAULT_MOUNDS,
            pits: DEFAULT_PITS,
            flame_traps: DEFAULT_FLAME_TRAPS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            watch_live: false,
        }
    }
}

impl ArenaConfig {
    /// Reads and parses a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&contents))
    }

    /// Parses whitespace-separated `key value` pairs on top of the defaults.
    ///
    /// Unknown keys are ignored. Reading stops at the first value that is not
    /// an integer; everything read before it is kept.
    pub fn parse(contents: &str) -> Self {
        let mut config = ArenaConfig::default();
        let mut tokens = contents.split_whitespace();

        while let Some(key) = tokens.next() {
            let Some(raw) = tokens.next() else {
                warn!("Config key {:?} has no value, ignoring it", key);
                break;
            };
            if let Err(e) = config.apply(key, raw) {
                warn!("Stopped reading config: {}", e);
                break;
            }
        }
        config
    }

    fn apply(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let value: i64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        })?;
        let as_i32 = || {
            i32::try_from(value).map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            })
        };
        // Negative counts mean "none"
        let as_count = || u32::try_from(value.max(0)).unwrap_or(u32::MAX);

        match key {
            "width" => self.width = as_i32()?,
            "height" => self.height = as_i32()?,
            "mounds" => self.mounds = as_count(),
            "pits" => self.pits = as_count(),
            "flamethrowers" => self.flame_traps = as_count(),
            "max_rounds" => self.max_rounds = as_count(),
            "watch_live" => self.watch_live = value != 0,
            other => log::debug!(target: "config", "Ignoring unknown config key {:?}", other),
        }
        Ok(())
    }

    /// Number of hazards that will be placed on the board.
    pub fn hazard_count(&self) -> u32 {
        self.mounds.saturating_add(self.pits).saturating_add(self.flame_traps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 10);
        assert_eq!(config.hazard_count(), 0);
        assert_eq!(config.max_rounds, 100);
        assert!(!config.watch_live);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = ArenaConfig::parse(
            "width 20\nheight 15\nmounds 3 pits 2\nflamethrowers 4\nmax_rounds 50\nwatch_live 1\n",
        );
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 15);
        assert_eq!(config.mounds, 3);
        assert_eq!(config.pits, 2);
        assert_eq!(config.flame_traps, 4);
        assert_eq!(config.max_rounds, 50);
        assert!(config.watch_live);
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let config = ArenaConfig::parse("colour 7 width 12");
        assert_eq!(config.width, 12);
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn test_parse_stops_at_bad_value() {
        let config = ArenaConfig::parse("width 12 height tall mounds 4");
        assert_eq!(config.width, 12);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.mounds, 0);
    }

    #[test]
    fn test_watch_live_zero_is_false() {
        assert!(!ArenaConfig::parse("watch_live 0").watch_live);
        assert!(ArenaConfig::parse("watch_live 7").watch_live);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ArenaConfig::load("/nonexistent/botgrid/arena_config.txt").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
