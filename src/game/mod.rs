//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Randomness is injected through the engine so rounds can be replayed in tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::FreeCells;
pub use state::{AdvanceOutcome, Bounds, CollisionType, EndCause, GameState, Phase, Position, Snake};
