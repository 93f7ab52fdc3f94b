// src/lib.rs

// === 1. Declare all the top-level modules ===
pub mod autopilot;
pub mod economy;
pub mod error;
pub mod events;
pub mod session;
pub mod settings;
pub mod shared_types;
pub mod simulators;
pub mod trades;
pub mod types;
pub mod utils;

// === 2. Re-export the public-facing components to create a clean API ===

// --- The session engine ---
pub use session::{GameSession, SessionSummary};

// --- Configuration & errors ---
pub use error::{ConfigError, StorageError};
pub use settings::Settings;

// --- Market side ---
pub use economy::{
    EconomyState, GameStorage, HighScoreStore, JsonFileHighScoreStore, MemoryHighScoreStore,
    record_high_score,
};
pub use events::EventGenerator;
pub use trades::{DeviationCooldown, TradeObstacleMapper};

// --- Flight side ---
pub use simulators::{Collider, Flight, FlightEvent, Phase, TickLoop};

// --- From `types` / `shared_types` ---
pub use shared_types::{Direction, GameMode, Outcome};
pub use types::{EventKind, GameEvent, Instruction, ObstaclePlacement, Sound, StatKey};
