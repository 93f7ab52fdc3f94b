// src/types/mod.rs

pub mod event;
pub mod instruction;
pub mod placement;

pub use event::{EventKind, GameEvent};
pub use instruction::{Instruction, Sound, StatKey};
pub use placement::ObstaclePlacement;
