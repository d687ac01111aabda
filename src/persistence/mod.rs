//! Persistence of the single high-score value between runs

pub mod high_score;

pub use high_score::HighScoreStore;
