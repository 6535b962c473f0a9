//! Config loading tests

use std::path::PathBuf;

use tui_gems::core::{ConfigError, GameConfig, GameError, Session};
use tui_gems::types::TileColor;

fn temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tui-gems-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_from_file() {
    let path = temp_config(
        "load",
        r#"
columns = 6
rows = 7
palette = ["red", "green", "blue", "yellow"]
rollbackDelayMs = 120
seed = 99
"#,
    );
    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.columns, 6);
    assert_eq!(config.rows, 7);
    assert_eq!(config.rollback_delay_ms, 120);
    assert_eq!(config.seed, Some(99));
    assert_eq!(
        config.palette,
        vec![TileColor::Red, TileColor::Green, TileColor::Blue, TileColor::Yellow]
    );
    assert_eq!(config.cascade_pause_ms, GameConfig::default().cascade_pause_ms);

    let session = Session::new(config).unwrap();
    assert_eq!(session.board().columns(), 6);
    assert_eq!(session.board().rows(), 7);
    assert_eq!(session.seed(), 99);
}

#[test]
fn test_invalid_file_is_rejected() {
    let path = temp_config("invalid", "decayFactor = 1.5\n");
    let err = GameConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn test_unreadable_path_is_file_error() {
    let path = std::env::temp_dir().join("tui-gems-does-not-exist/config.toml");
    assert!(matches!(
        GameConfig::load(&path),
        Err(ConfigError::FileRead { .. })
    ));
    assert_eq!(GameConfig::load_or_default(&path).unwrap(), GameConfig::default());
}

#[test]
fn test_session_rejects_invalid_config() {
    let config = GameConfig {
        palette: vec![TileColor::Red, TileColor::Blue],
        ..GameConfig::default()
    };
    assert!(matches!(
        Session::new(config),
        Err(GameError::Config(ConfigError::Validation(_)))
    ));
}
