//! Controls configuration
//!
//! Key bindings are read from a JSON file. Every binding is a single ASCII
//! character; comparisons are case-insensitive.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_RATE;
use crate::sim::Controls;

/// Default location of the controls file, relative to the working directory
pub const DEFAULT_CONTROLS_PATH: &str = "config/controls.json";

// Runtime knobs (not gameplay tuning).

/// Controls file path (`VOLLEY_CONTROLS`)
pub fn controls_path() -> PathBuf {
    env::var_os("VOLLEY_CONTROLS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTROLS_PATH))
}

/// Simulation rate in ticks per second (`VOLLEY_TICK_RATE`)
pub fn tick_rate() -> u32 {
    parse_tick_rate(env::var("VOLLEY_TICK_RATE").ok().as_deref())
}

fn parse_tick_rate(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&rate| rate > 0)
        .unwrap_or(DEFAULT_TICK_RATE)
}

/// Errors raised while loading or resolving controls
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io { path: PathBuf, source: io::Error },
    /// File is not valid controls JSON
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A binding is not exactly one ASCII character
    InvalidKey { field: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "parse {}: {}", path.display(), source)
            }
            ConfigError::InvalidKey { field, value } => {
                write!(f, "{field} must be exactly 1 ASCII character, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::InvalidKey { .. } => None,
        }
    }
}

/// One player's bindings. A player block must name all three keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerControls {
    pub left: String,
    pub right: String,
    pub jump: String,
}

impl PlayerControls {
    fn new(left: &str, right: &str, jump: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            jump: jump.to_string(),
        }
    }
}

/// Controls file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlsConfig {
    pub quit: String,
    pub serve_left: String,
    pub serve_right: String,
    pub player1: PlayerControls,
    pub player2: PlayerControls,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            serve_left: "s".to_string(),
            serve_right: "k".to_string(),
            player1: PlayerControls::new("a", "d", "w"),
            player2: PlayerControls::new("j", "l", "i"),
        }
    }
}

/// Bindings ready for the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedControls {
    pub game: Controls,
    pub quit: u8,
}

/// Validate a single binding, returning it upper-cased
pub fn key_from_config(field: &'static str, value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(b.to_ascii_uppercase()),
        _ => Err(ConfigError::InvalidKey {
            field,
            value: value.to_string(),
        }),
    }
}

impl ControlsConfig {
    /// Parse controls from a JSON string
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load controls from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(path, &json)?;
        log::info!("Loaded controls from {}", path.display());
        Ok(config)
    }

    /// Load controls, falling back to the defaults when the file is missing
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "{} not found, using default controls",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Validate every binding and build the engine mapping
    pub fn resolve(&self) -> Result<ResolvedControls, ConfigError> {
        let game = Controls {
            p1_left: key_from_config("controls.player1.left", &self.player1.left)?,
            p1_right: key_from_config("controls.player1.right", &self.player1.right)?,
            p1_jump: key_from_config("controls.player1.jump", &self.player1.jump)?,
            p2_left: key_from_config("controls.player2.left", &self.player2.left)?,
            p2_right: key_from_config("controls.player2.right", &self.player2.right)?,
            p2_jump: key_from_config("controls.player2.jump", &self.player2.jump)?,
            serve_left: key_from_config("controls.serveLeft", &self.serve_left)?,
            serve_right: key_from_config("controls.serveRight", &self.serve_right)?,
        };
        let quit = key_from_config("controls.quit", &self.quit)?;
        Ok(ResolvedControls { game, quit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tick_rate() {
        assert_eq!(parse_tick_rate(None), DEFAULT_TICK_RATE);
        assert_eq!(parse_tick_rate(Some("60")), 60);
        assert_eq!(parse_tick_rate(Some(" 120 ")), 120);
        assert_eq!(parse_tick_rate(Some("0")), DEFAULT_TICK_RATE);
        assert_eq!(parse_tick_rate(Some("fast")), DEFAULT_TICK_RATE);
    }

    #[test]
    fn test_default_resolves_to_engine_defaults() {
        let resolved = ControlsConfig::default().resolve().unwrap();
        assert_eq!(resolved.game, Controls::default());
        assert_eq!(resolved.quit, b'Q');
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "quit": "x", "player2": { "left": "4", "right": "6", "jump": "8" } }"#;
        let config = ControlsConfig::from_json(Path::new("controls.json"), json).unwrap();
        assert_eq!(config.quit, "x");
        assert_eq!(config.player2.jump, "8");
        assert_eq!(config.player1.left, "a");
        assert_eq!(config.serve_left, "s");

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.quit, b'X');
        assert_eq!(resolved.game.p2_jump, b'8');
        assert_eq!(resolved.game.p1_jump, b'W');
    }

    #[test]
    fn test_incomplete_player_block_is_rejected() {
        let json = r#"{ "player1": { "left": "a" } }"#;
        let err = ControlsConfig::from_json(Path::new("controls.json"), json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_camel_case_fields() {
        let json = r#"{ "serveLeft": "z", "serveRight": "m" }"#;
        let resolved = ControlsConfig::from_json(Path::new("c.json"), json)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(resolved.game.serve_left, b'Z');
        assert_eq!(resolved.game.serve_right, b'M');
    }

    #[test]
    fn test_key_from_config_rejects_bad_bindings() {
        assert_eq!(key_from_config("f", "a").unwrap(), b'A');
        assert_eq!(key_from_config("f", " ").unwrap(), b' ');

        for bad in ["", "ab", "é"] {
            let err = key_from_config("controls.player1.left", bad).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidKey { .. }));
            assert!(err.to_string().contains("controls.player1.left"));
        }
    }

    #[test]
    fn test_resolve_names_offending_field() {
        let mut config = ControlsConfig::default();
        config.player2.right = "right".to_string();
        let err = config.resolve().unwrap_err();
        assert!(err.to_string().starts_with("controls.player2.right"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ControlsConfig::from_json(Path::new("bad.json"), "{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("parse bad.json"));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("terminal-volley-missing-controls.json");
        let _ = fs::remove_file(&path);
        let config = ControlsConfig::load_or_default(&path).unwrap();
        assert_eq!(config, ControlsConfig::default());

        assert!(matches!(
            ControlsConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "terminal-volley-controls-{}.json",
            std::process::id()
        ));
        let json = serde_json::to_string(&ControlsConfig {
            quit: "p".to_string(),
            ..ControlsConfig::default()
        })
        .unwrap();
        fs::write(&path, json).unwrap();

        let config = ControlsConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(config.resolve().unwrap().quit, b'P');
    }
}
