use std::path::PathBuf;

/// Errors raised by the engine when a caller breaks a contract.
///
/// Normal play never produces these: a non-adjacent click reselects and a swap
/// without a match is reverted.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("coordinate ({x}, {y}) is outside the {columns}x{rows} board")]
    OutOfBounds { x: u8, y: u8, columns: u8, rows: u8 },

    #[error("cascade step entered without any match on the board")]
    NoMatches,

    #[error("invalid grid literal: {0}")]
    InvalidGrid(String),

    #[error("board did not settle within {ticks} ticks")]
    DidNotSettle { ticks: u32 },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
