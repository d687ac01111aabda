//! Application configuration: built-in defaults, then an optional JSON file,
//! then command-line overrides applied by `main`.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::GameConfig;
use crate::persistence::high_score::DEFAULT_HIGH_SCORE_FILE;
use crate::persistence::HighScoreStore;
use crate::render::GlyphStyle;

/// Everything needed to start a session
///
/// # Example
///
/// ```json
/// {
///   "game": { "grid_width": 30, "grid_height": 15, "tick_interval_ms": 80 },
///   "glyphs": "ascii",
///   "high_score_file": "/home/me/.snake-highscore"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Grid, snake and timing rules
    pub game: GameConfig,
    /// Drawing style
    pub glyphs: GlyphStyle,
    /// Where the high score lives
    pub high_score_file: PathBuf,
    /// Whether to read and write the high score at all
    pub persist_high_score: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            glyphs: GlyphStyle::default(),
            high_score_file: PathBuf::from(DEFAULT_HIGH_SCORE_FILE),
            persist_high_score: true,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn validate(&self) -> Result<()> {
        self.game
            .validate()
            .map_err(|e| anyhow!("Invalid game config: {}", e))
    }

    /// The high score store, unless persistence is turned off
    pub fn high_score_store(&self) -> Option<HighScoreStore> {
        self.persist_high_score
            .then(|| HighScoreStore::new(&self.high_score_file))
    }
}
