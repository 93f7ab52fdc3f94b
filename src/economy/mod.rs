// src/economy/mod.rs

pub mod high_score;
pub mod storage;

pub use high_score::{HighScoreStore, JsonFileHighScoreStore, MemoryHighScoreStore, record_high_score};
pub use storage::{EconomyState, GameStorage};
