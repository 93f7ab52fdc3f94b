// src/economy/high_score.rs

//! The one number that survives a session.

use crate::error::StorageResult;
use log::info;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Host key-value surface holding the high score.
pub trait HighScoreStore {
    /// The stored high score, or 0 if none was ever written.
    fn load(&self) -> StorageResult<u64>;
    fn save(&self, score: u64) -> StorageResult<()>;
}

/// Writes `score` only when it beats the stored one. Returns the high score
/// to display afterwards.
pub fn record_high_score<S: HighScoreStore + ?Sized>(store: &S, score: u64) -> StorageResult<u64> {
    let previous = store.load()?;
    if score > previous {
        store.save(score)?;
        info!("new high score: {} (was {})", score, previous);
        return Ok(score);
    }
    Ok(previous)
}

/// Process-local store, mostly for tests and the headless runner.
#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    score: RwLock<u64>,
}

impl MemoryHighScoreStore {
    pub fn new(score: u64) -> Self {
        Self {
            score: RwLock::new(score),
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> StorageResult<u64> {
        Ok(*self.score.read())
    }

    fn save(&self, score: u64) -> StorageResult<()> {
        *self.score.write() = score;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(rename = "highScore")]
    high_score: u64,
}

/// Keeps `{"highScore": n}` in a JSON file. A missing file reads as 0.
#[derive(Debug, Clone)]
pub struct JsonFileHighScoreStore {
    path: PathBuf,
}

impl JsonFileHighScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileHighScoreStore {
    fn load(&self) -> StorageResult<u64> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&text)?;
        Ok(record.high_score)
    }

    fn save(&self, score: u64) -> StorageResult<()> {
        let text = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
