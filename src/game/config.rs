use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::state::Bounds;

/// Rules of a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points for each food eaten
    pub food_reward: u32,
    /// Milliseconds between two game ticks
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            food_reward: 10,
            tick_interval_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.grid_width, self.grid_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Check that a round can be started with these rules.
    ///
    /// The snake starts at the grid center facing right, so its body must fit
    /// between the center and the left wall.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 3 || self.grid_height < 3 {
            return Err(format!(
                "grid must be at least 3x3, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err("grid dimensions are too large".to_string());
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        let room = self.grid_width / 2 + 1;
        if self.initial_snake_length > room {
            return Err(format!(
                "initial_snake_length ({}) does not fit a grid {} cells wide (max {})",
                self.initial_snake_length, self.grid_width, room
            ));
        }

        if self.food_reward == 0 {
            return Err("food_reward must be positive".to_string());
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.bounds(), Bounds::new(15, 12));
    }

    #[test]
    fn test_validate_rejects_tiny_grid() {
        let config = GameConfig::new(2, 10);
        assert!(config.validate().unwrap_err().contains("3x3"));
    }

    #[test]
    fn test_validate_rejects_snake_longer_than_half_width() {
        let mut config = GameConfig::new(6, 6);
        config.initial_snake_length = 4;
        assert!(config.validate().is_ok());

        config.initial_snake_length = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = GameConfig::default();
        config.initial_snake_length = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.food_reward = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "grid_width": 30 }"#).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.food_reward, 10);
    }
}
