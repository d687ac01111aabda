//! High score file
//!
//! The file holds one bare decimal integer and nothing else. A missing file
//! means no game has been recorded yet.

use anyhow::{Context, Result};
use log::{info, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default file name, relative to the working directory
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Reads and writes the high score at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored high score.
    ///
    /// A missing file reads as 0. Content that is not a decimal integer is
    /// logged and also reads as 0, so a damaged file never blocks a game.
    pub fn load(&self) -> Result<u32> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No high score file at {:?}, starting from 0", self.path);
                return Ok(0);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read high score from {:?}", self.path))
            }
        };

        match contents.trim().parse::<u32>() {
            Ok(score) => {
                info!("Loaded high score {} from {:?}", score, self.path);
                Ok(score)
            }
            Err(e) => {
                warn!(
                    "Ignoring malformed high score file {:?} ({}): {:?}",
                    self.path, e, contents
                );
                Ok(0)
            }
        }
    }

    /// Write `score`, replacing whatever the file held.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;

        info!("Saved high score {} to {:?}", score, self.path);
        Ok(())
    }
}
