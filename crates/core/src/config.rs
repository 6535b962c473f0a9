//! Static game configuration.
//!
//! Keys use camelCase so a TOML file reads like the option names in the docs:
//!
//! ```toml
//! columns = 8
//! rows = 8
//! tileSize = 50.0
//! palette = ["red", "orange", "yellow", "green", "blue", "purple"]
//! decayFactor = 0.6
//! settleEpsilon = 1.0
//! rollbackDelayMs = 200
//! cascadePauseMs = 200
//! ```
//!
//! Environment variables:
//!
//! - `GEMS_CONFIG`: path of a TOML file (missing file falls back to defaults)
//! - `GEMS_SEED`: RNG seed override

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    TileColor, DEFAULT_CASCADE_PAUSE_MS, DEFAULT_COLUMNS, DEFAULT_DECAY_FACTOR,
    DEFAULT_MAX_CHAIN_DEPTH, DEFAULT_ROLLBACK_DELAY_MS, DEFAULT_ROWS, DEFAULT_SETTLE_EPSILON,
    DEFAULT_TILE_SIZE, MAX_DIMENSION,
};

/// Environment variable holding the config file path
pub const CONFIG_PATH_ENV: &str = "GEMS_CONFIG";

/// Environment variable overriding the RNG seed
pub const SEED_ENV: &str = "GEMS_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub columns: u8,
    pub rows: u8,
    /// Offset units per row; only scales animation offsets
    pub tile_size: f32,
    pub palette: Vec<TileColor>,
    pub decay_factor: f32,
    pub settle_epsilon: f32,
    pub rollback_delay_ms: u32,
    pub cascade_pause_ms: u32,
    pub max_chain_depth: u32,
    /// Fixed seed; `None` lets the caller pick one
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            tile_size: DEFAULT_TILE_SIZE,
            palette: TileColor::ALL.to_vec(),
            decay_factor: DEFAULT_DECAY_FACTOR,
            settle_epsilon: DEFAULT_SETTLE_EPSILON,
            rollback_delay_ms: DEFAULT_ROLLBACK_DELAY_MS,
            cascade_pause_ms: DEFAULT_CASCADE_PAUSE_MS,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the configuration from `GEMS_CONFIG` and `GEMS_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_or_default(Path::new(path.trim()))?,
            _ => Self::default(),
        };

        if let Ok(raw) = env::var(SEED_ENV) {
            let seed = raw.trim().parse::<u32>().map_err(|_| {
                ConfigError::Validation(format!("{SEED_ENV} must be a u32, got {raw:?}"))
            })?;
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Validation(
                "columns and rows must be > 0".into(),
            ));
        }
        if self.columns > MAX_DIMENSION || self.rows > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "columns and rows must be <= {MAX_DIMENSION}"
            )));
        }
        if !(self.tile_size > 0.0) || !self.tile_size.is_finite() {
            return Err(ConfigError::Validation("tileSize must be > 0".into()));
        }
        if !(self.decay_factor > 0.0 && self.decay_factor < 1.0) {
            return Err(ConfigError::Validation(
                "decayFactor must be in (0, 1)".into(),
            ));
        }
        if !(self.settle_epsilon > 0.0) || !self.settle_epsilon.is_finite() {
            return Err(ConfigError::Validation("settleEpsilon must be > 0".into()));
        }
        if self.max_chain_depth == 0 {
            return Err(ConfigError::Validation(
                "maxChainDepth must be > 0".into(),
            ));
        }

        // A palette below three colors cannot reliably avoid runs of three.
        let mut distinct = self.palette.clone();
        distinct.sort();
        distinct.dedup();
        if distinct.len() != self.palette.len() {
            return Err(ConfigError::Validation(
                "palette contains duplicate colors".into(),
            ));
        }
        if distinct.len() < 3 {
            return Err(ConfigError::Validation(
                "palette needs at least 3 colors".into(),
            ));
        }

        Ok(())
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.columns, 8);
        assert_eq!(config.rows, 8);
        assert_eq!(config.tile_size, 50.0);
        assert_eq!(config.palette.len(), 6);
        assert_eq!(config.decay_factor, 0.6);
        assert_eq!(config.settle_epsilon, 1.0);
        assert_eq!(config.rollback_delay_ms, 200);
        assert_eq!(config.cascade_pause_ms, 200);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("rows = 6\ndecayFactor = 0.5\nseed = 7\n").unwrap();
        assert_eq!(config.rows, 6);
        assert_eq!(config.columns, 8);
        assert_eq!(config.decay_factor, 0.5);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_palette_from_toml() {
        let config =
            GameConfig::from_toml_str("palette = [\"red\", \"green\", \"blue\"]\n").unwrap();
        assert_eq!(
            config.palette,
            vec![TileColor::Red, TileColor::Green, TileColor::Blue]
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "columns = 0",
            "rows = 65",
            "tileSize = 0.0",
            "decayFactor = 1.0",
            "decayFactor = 0.0",
            "settleEpsilon = -1.0",
            "maxChainDepth = 0",
            "palette = [\"red\", \"blue\"]",
            "palette = [\"red\", \"red\", \"blue\"]",
        ];
        for case in cases {
            assert!(
                matches!(
                    GameConfig::from_toml_str(case),
                    Err(ConfigError::Validation(_))
                ),
                "expected validation error for {case:?}"
            );
        }
    }

    #[test]
    fn test_unknown_color_is_parse_error() {
        assert!(matches!(
            GameConfig::from_toml_str("palette = [\"red\", \"teal\", \"blue\"]"),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default(Path::new("/nonexistent/gems.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
