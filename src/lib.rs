//! Term Snake - Snake for the terminal
//!
//! This library provides:
//! - Core game logic with no I/O (game module)
//! - Key mapping (input module) and ratatui drawing (render module)
//! - The console abstraction and its crossterm implementation (console module)
//! - High score persistence and application configuration
//! - The interactive turn loop (modes module)

pub mod config;
pub mod console;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
