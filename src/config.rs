//! Player configuration: presentation preferences loaded leniently from TOML.

use serde::Deserialize;
use std::{fs, path::Path};
use tracing::warn;
use warp_protocol_engine::GameMode;

const DEFAULT_CONFIG_PATH: &str = "config/player.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Log lines printed by the `log` command when no count is given.
    pub log_tail: usize,
    /// Mode used when no command-line flag picks one: "random", "seeded" or
    /// "daily".
    pub default_mode: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            log_tail: 6,
            default_mode: "random".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on
    /// errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<PlayerConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    PlayerConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                PlayerConfig::default()
            }
        }
    }

    /// The configured default game mode, if it names a known one.
    pub fn default_game_mode(&self) -> Option<GameMode> {
        match self.default_mode.as_str() {
            "random" => Some(GameMode::Random),
            "seeded" => Some(GameMode::Seeded),
            "daily" => Some(GameMode::Daily),
            other => {
                warn!("Unknown default_mode \"{other}\" in player config");
                None
            }
        }
    }
}
