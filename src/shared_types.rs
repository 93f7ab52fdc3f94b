// src/shared_types.rs

use serde::{Deserialize, Serialize};

/// Which side of the market a trade lands on. Only drives bar styling.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

/// The two ways a session can be played.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Speed ramps toward a blastoff line that ends the run with a win.
    #[default]
    Hyperdrive,
    /// Classic endless flapping; any bar ends the run.
    Flappy,
}

impl GameMode {
    /// The settings screen flips between the two modes with its arrows.
    pub fn toggled(self) -> Self {
        match self {
            GameMode::Hyperdrive => GameMode::Flappy,
            GameMode::Flappy => GameMode::Hyperdrive,
        }
    }
}

/// How a session ended.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}
