// src/types/instruction.rs

use super::placement::ObstaclePlacement;
use crate::shared_types::Outcome;
use serde::Serialize;

/// HUD stats the simulator keeps up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatKey {
    Liquidity,
    Longs,
    Shorts,
    Volume,
    Score,
    Speed,
    TopSpeed,
}

impl StatKey {
    pub fn label(&self) -> &'static str {
        match self {
            StatKey::Liquidity => "LIQUIDITY",
            StatKey::Longs => "LONGS",
            StatKey::Shorts => "SHORTS",
            StatKey::Volume => "VOLUME",
            StatKey::Score => "SCORE",
            StatKey::Speed => "SPEED",
            StatKey::TopSpeed => "TOP SPEED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sound {
    GameBackgroundMusic,
    JumpSound,
    HyperdriveSound,
}

/// Fire-and-forget output for the rendering collaborator. Nothing flows back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Instruction {
    SpawnBars(ObstaclePlacement),
    UpdateStat { stat: StatKey, value: String },
    AppendFeed(String),
    PlaySound(Sound),
    StopSound(Sound),
    /// Flash the "+Fees" marker after a jump.
    ShowFees,
    EndSession(Outcome),
}
