//! Game settings: board size, seat count and an optional move script.
//! Loaded from TOML for the CLI.

use std::path::Path;

use serde::Deserialize;

use crate::games::dots_and_boxes::{
    ConfigError, Edge, GameConfig, DEFAULT_GRID_SIZE, DEFAULT_PLAYERS, GRID_SIZE_PRESETS,
};

/// `[game]` table of a settings file.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GameSettings {
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    #[serde(default = "default_player_count")]
    pub player_count: u8,
    /// Moves in text form, e.g. `"h 0 1"`.
    #[serde(default)]
    pub moves: Vec<String>,
}

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

fn default_player_count() -> u8 {
    DEFAULT_PLAYERS
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            player_count: DEFAULT_PLAYERS,
            moves: Vec::new(),
        }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SettingsFile {
    #[serde(default)]
    pub game: GameSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SettingsError {
    #[display("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[display("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
    #[display("line {line}: {message}")]
    BadMove { line: usize, message: String },
}

impl std::error::Error for SettingsError {}

impl GameSettings {
    /// Validate into an engine config. Sizes outside the presets are allowed but logged.
    pub fn to_config(&self) -> Result<GameConfig, ConfigError> {
        let config = GameConfig::new(self.grid_size, self.player_count)?;
        if !GRID_SIZE_PRESETS.contains(&self.grid_size) {
            tracing::warn!(grid_size = self.grid_size, presets = ?GRID_SIZE_PRESETS, "grid size is not one of the presets");
        }
        Ok(config)
    }

    pub fn script(&self) -> Result<Vec<Edge>, SettingsError> {
        parse_script(&self.moves.join("\n"))
    }
}

/// Parse one move per line. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Edge>, SettingsError> {
    let mut moves = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let edge = line.parse::<Edge>().map_err(|e| SettingsError::BadMove {
            line: idx + 1,
            message: e.to_string(),
        })?;
        moves.push(edge);
    }
    Ok(moves)
}

/// Load settings from a TOML file at the given path.
pub fn load_settings(path: &Path) -> Result<SettingsFile, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Try to load settings from well-known paths, returning defaults if none found.
pub fn load_default_settings() -> SettingsFile {
    let candidates = [
        "dots_boxes.toml",
        "../dots_boxes.toml",
        "/etc/dots_boxes/dots_boxes.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_settings(p) {
                Ok(settings) => {
                    tracing::info!(path = %p.display(), "loaded settings");
                    return settings;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load settings");
                }
            }
        }
    }
    tracing::info!("no dots_boxes.toml found, using built-in defaults");
    SettingsFile::default()
}
