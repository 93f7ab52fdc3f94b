// src/settings/tuning.rs

//! Fixed tuning constants that are not exposed on the settings screen.

// --- Player speed (the SPEED stat, in mi/s) ---
pub const BASE_PLAYER_SPEED: f64 = 125.0;
/// Reached right before hyperdrive engages.
pub const FINAL_PLAYER_SPEED: f64 = 2_777.0;
pub const SPEED_OF_LIGHT: f64 = 186_000.0;
pub const WARP_SPEED: f64 = SPEED_OF_LIGHT * 2.0;
/// How often the SPEED stat is pushed to the HUD, in seconds.
pub const SPEED_STAT_INTERVAL: f64 = 0.2;

// --- Playfield geometry ---
/// Hyperdrive start position as a fraction of the playfield width.
pub const STARTING_PLAYER_X_FRACTION: f64 = 0.2;
/// Flappy mode parks the player a little further in.
pub const FLAPPY_PLAYER_X_FRACTION: f64 = 0.25;
/// The blastoff line sits this far from the right edge.
pub const BLASTOFF_OFFSET: f64 = 50.0;
/// The player tween aims this far past the right edge.
pub const FINAL_PLAYER_X_OFFSET: f64 = 100.0;

// --- Market ---
/// Smallest amount a single event can move.
pub const MIN_EVENT_AMOUNT: u64 = 100;

// --- Scoring ---
/// Every jump collects fees.
pub const JUMP_SCORE: u64 = 10;

// --- Blastoff sequence (seconds since the blastoff line was crossed) ---
pub const BLASTOFF_SPEED_MULTIPLIER: f64 = 10.0;
pub const BLASTOFF_SPEED_RAMP_SECS: f64 = 1.0;
pub const BLASTOFF_RECENTER_SECS: f64 = 3.0;
/// The player is flung off screen at this point.
pub const HYPERSPACE_JUMP_SECS: f64 = 4.1;
pub const BLASTOFF_SEQUENCE_SECS: f64 = 9.0;
