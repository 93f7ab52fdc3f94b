// src/types/event.rs

use crate::shared_types::Direction;
use serde::{Deserialize, Serialize};

/// What the generator decided for one tick, before any amount is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    AddTrade,
    AddLiquidity,
    RemoveLiquidity,
    None,
}

/// A fully resolved market event. Lives for exactly one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AddTrade { amount: u64, direction: Direction },
    AddLiquidity { amount: u64 },
    RemoveLiquidity { amount: u64 },
    None,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::AddTrade { .. } => EventKind::AddTrade,
            GameEvent::AddLiquidity { .. } => EventKind::AddLiquidity,
            GameEvent::RemoveLiquidity { .. } => EventKind::RemoveLiquidity,
            GameEvent::None => EventKind::None,
        }
    }

    /// The message shown in the event feed, if any.
    pub fn feed_message(&self) -> Option<String> {
        match self {
            GameEvent::AddTrade { amount, direction } => {
                Some(format!("{} added: {}", direction.label(), amount))
            }
            GameEvent::AddLiquidity { amount } => Some(format!("+{} liquidity", amount)),
            GameEvent::RemoveLiquidity { amount } => Some(format!("-{} liquidity", amount)),
            GameEvent::None => None,
        }
    }
}
