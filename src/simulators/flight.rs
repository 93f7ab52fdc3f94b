// src/simulators/flight.rs

//! Session-level speed and phase state machine.
//!
//! ```text
//! Starting ─start()─▶ Cruising ◀──bar──┐
//!                        │             │  (hyperdrive only)
//!                        └─tweens──▶ Accelerating ─blastoff line─▶ Blastoff ─9s─▶ Ended(Win)
//!
//! any collision with a boundary (or a bar in flappy mode) outside Blastoff ─▶ Ended(Loss)
//! ```

use super::tween::{Easing, Tween};
use crate::settings::Settings;
use crate::settings::tuning::{
    BASE_PLAYER_SPEED, BLASTOFF_OFFSET, BLASTOFF_RECENTER_SECS, BLASTOFF_SEQUENCE_SECS,
    BLASTOFF_SPEED_MULTIPLIER, BLASTOFF_SPEED_RAMP_SECS, FINAL_PLAYER_SPEED,
    FINAL_PLAYER_X_OFFSET, FLAPPY_PLAYER_X_FRACTION, HYPERSPACE_JUMP_SECS, SPEED_STAT_INTERVAL,
    STARTING_PLAYER_X_FRACTION, WARP_SPEED,
};
use crate::shared_types::{GameMode, Outcome};
use crate::utils::scale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Cruising,
    /// Hyperdrive only.
    Accelerating,
    /// Hyperdrive only. Obstacles and market events are off.
    Blastoff,
    Ended(Outcome),
}

impl Phase {
    /// Phases in which market ticks and player input still count.
    pub fn is_live(&self) -> bool {
        matches!(self, Phase::Cruising | Phase::Accelerating)
    }
}

/// What the host reported the player touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collider {
    /// Top, bottom or left edge of the playfield.
    Boundary,
    Bar,
    BlastoffLine,
}

/// Side effects of a flight transition, for the session to act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightEvent {
    SpeedStat(f64),
    BlastoffEngaged,
    Ended(Outcome),
}

#[derive(Debug, Clone, Copy)]
struct Acceleration {
    background: Tween,
    speed_stat: Tween,
    player_x: Tween,
}

#[derive(Debug, Clone, Copy)]
struct BlastoffSequence {
    elapsed: f64,
    background: Tween,
    player_x: Tween,
    in_hyperspace: bool,
}

#[derive(Debug, Clone)]
pub struct Flight {
    mode: GameMode,
    phase: Phase,
    base_background_speed: f64,
    final_background_speed: f64,
    time_to_hyperdrive: f64,
    start_x: f64,
    final_x: f64,
    blastoff_x: f64,
    player_x: f64,
    background_speed: f64,
    player_speed: f64,
    acceleration: Option<Acceleration>,
    blastoff: Option<BlastoffSequence>,
    stat_timer: f64,
}

impl Flight {
    pub fn new(settings: &Settings) -> Self {
        let start_fraction = match settings.mode {
            GameMode::Hyperdrive => STARTING_PLAYER_X_FRACTION,
            GameMode::Flappy => FLAPPY_PLAYER_X_FRACTION,
        };
        let start_x = settings.playfield_width * start_fraction;
        Self {
            mode: settings.mode,
            phase: Phase::Starting,
            base_background_speed: settings.speed,
            final_background_speed: settings.final_speed,
            time_to_hyperdrive: settings.time_to_hyperdrive,
            start_x,
            final_x: settings.playfield_width + FINAL_PLAYER_X_OFFSET,
            blastoff_x: settings.playfield_width - BLASTOFF_OFFSET,
            player_x: start_x,
            background_speed: settings.speed,
            player_speed: BASE_PLAYER_SPEED,
            acceleration: None,
            blastoff: None,
            stat_timer: 0.0,
        }
    }

    /// Leaves `Starting`. Hyperdrive begins ramping up straight away.
    pub fn start(&mut self) -> Vec<FlightEvent> {
        if self.phase != Phase::Starting {
            return vec![];
        }
        self.phase = Phase::Cruising;
        if self.mode == GameMode::Flappy {
            return vec![];
        }
        self.start_tweening();
        vec![FlightEvent::SpeedStat(self.player_speed)]
    }

    /// The closer the player already is to the goal, the shorter the ramp.
    fn start_tweening(&mut self) {
        if self.acceleration.is_some() {
            return;
        }
        let duration = scale(
            self.player_x,
            self.start_x,
            self.final_x,
            self.time_to_hyperdrive,
            0.0,
        )
        .max(0.0);

        self.acceleration = Some(Acceleration {
            background: Tween::new(
                self.base_background_speed,
                self.final_background_speed,
                duration,
                Easing::EaseInCubic,
            ),
            speed_stat: Tween::new(BASE_PLAYER_SPEED, FINAL_PLAYER_SPEED, duration, Easing::EaseInCubic),
            player_x: Tween::new(self.player_x, self.final_x, duration, Easing::EaseInCubic),
        });
        self.phase = Phase::Accelerating;
    }

    fn stop_tweening(&mut self) {
        self.acceleration = None;
        self.background_speed = self.base_background_speed;
        self.player_speed = BASE_PLAYER_SPEED;
    }

    /// Advances the ramps by `dt` seconds of frame time.
    pub fn advance(&mut self, dt: f64) -> Vec<FlightEvent> {
        let mut events = Vec::new();
        match self.phase {
            Phase::Starting | Phase::Ended(_) => return events,
            Phase::Cruising | Phase::Accelerating => {
                if let Some(acceleration) = self.acceleration.as_mut() {
                    self.background_speed = acceleration.background.advance(dt);
                    self.player_speed = acceleration.speed_stat.advance(dt);
                    self.player_x = acceleration.player_x.advance(dt);
                }
                if self.mode == GameMode::Hyperdrive && self.player_x >= self.blastoff_x {
                    events.push(self.engage_blastoff());
                }
            }
            Phase::Blastoff => {
                if let Some(outcome) = self.advance_blastoff(dt) {
                    events.push(outcome);
                    return events;
                }
            }
        }

        if self.mode == GameMode::Hyperdrive {
            self.stat_timer += dt.max(0.0);
            if self.stat_timer >= SPEED_STAT_INTERVAL {
                self.stat_timer %= SPEED_STAT_INTERVAL;
                events.push(FlightEvent::SpeedStat(self.player_speed));
            }
        }
        events
    }

    fn engage_blastoff(&mut self) -> FlightEvent {
        self.acceleration = None;
        self.phase = Phase::Blastoff;
        self.player_speed = WARP_SPEED;
        self.blastoff = Some(BlastoffSequence {
            elapsed: 0.0,
            background: Tween::new(
                self.background_speed,
                self.background_speed * BLASTOFF_SPEED_MULTIPLIER,
                BLASTOFF_SPEED_RAMP_SECS,
                Easing::EaseInCubic,
            ),
            player_x: Tween::new(self.player_x, self.start_x, BLASTOFF_RECENTER_SECS, Easing::EaseInOutCubic),
            in_hyperspace: false,
        });
        FlightEvent::BlastoffEngaged
    }

    fn advance_blastoff(&mut self, dt: f64) -> Option<FlightEvent> {
        let sequence = self.blastoff.as_mut()?;
        sequence.elapsed += dt.max(0.0);
        self.background_speed = sequence.background.advance(dt);
        self.player_x = sequence.player_x.advance(dt);

        if !sequence.in_hyperspace && sequence.elapsed >= HYPERSPACE_JUMP_SECS {
            sequence.in_hyperspace = true;
            sequence.player_x = Tween::new(self.player_x, self.final_x + 1000.0, 0.1, Easing::EaseInCubic);
        }

        if sequence.elapsed >= BLASTOFF_SEQUENCE_SECS {
            return Some(self.end(Outcome::Win));
        }
        None
    }

    fn end(&mut self, outcome: Outcome) -> FlightEvent {
        self.acceleration = None;
        self.blastoff = None;
        self.phase = Phase::Ended(outcome);
        FlightEvent::Ended(outcome)
    }

    /// The host reports a collision. Ignored while blasting off or once over.
    pub fn collide(&mut self, collider: Collider) -> Vec<FlightEvent> {
        if !self.phase.is_live() {
            return vec![];
        }
        match (collider, self.mode) {
            (Collider::Boundary, _) | (Collider::Bar, GameMode::Flappy) => {
                vec![self.end(Outcome::Loss)]
            }
            (Collider::Bar, GameMode::Hyperdrive) => {
                self.stop_tweening();
                self.phase = Phase::Cruising;
                vec![FlightEvent::SpeedStat(self.player_speed)]
            }
            (Collider::BlastoffLine, GameMode::Hyperdrive) => vec![self.engage_blastoff()],
            (Collider::BlastoffLine, GameMode::Flappy) => vec![],
        }
    }

    /// The player cleared whatever it was touching.
    pub fn collide_end(&mut self, collider: Collider) {
        if collider == Collider::Bar
            && self.mode == GameMode::Hyperdrive
            && self.phase == Phase::Cruising
        {
            self.start_tweening();
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn player_x(&self) -> f64 {
        self.player_x
    }

    /// The live SPEED value that background objects scroll at.
    pub fn background_speed(&self) -> f64 {
        self.background_speed
    }

    /// The SPEED stat, in mi/s.
    pub fn player_speed(&self) -> f64 {
        self.player_speed
    }

    pub fn blastoff_x(&self) -> f64 {
        self.blastoff_x
    }
}
