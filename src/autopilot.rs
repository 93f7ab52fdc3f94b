// src/autopilot.rs

//! A crude stand-in for the rendering collaborator: point-mass physics,
//! scrolling bar pairs, box collisions and a bot that jumps toward the next
//! gap. Good enough to drive a [`GameSession`] end to end without a window.

use crate::session::GameSession;
use crate::settings::Settings;
use crate::simulators::{Collider, Phase};
use crate::types::{Instruction, ObstaclePlacement};

/// SPEED is expressed in units per frame at this rate.
pub const FRAME_RATE: f64 = 60.0;
pub const BAR_WIDTH: f64 = 60.0;
pub const PLAYER_WIDTH: f64 = 40.0;
pub const PLAYER_HEIGHT: f64 = 30.0;
/// The bot jumps once it sinks this far below the gap center.
const JUMP_SLACK: f64 = 15.0;

/// A bar pair on its way across the playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollingBars {
    pub x: f64,
    pub placement: ObstaclePlacement,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Bottom edge of the player; y grows downward.
    player_y: f64,
    velocity: f64,
    gravity: f64,
    jump_force: f64,
    falling_velocity: f64,
    width: f64,
    height: f64,
    bars: Vec<ScrollingBars>,
    touching_bar: bool,
}

impl Autopilot {
    pub fn new(settings: &Settings) -> Self {
        Self {
            player_y: 80.0,
            velocity: 0.0,
            gravity: settings.gravity,
            jump_force: settings.jump_force,
            falling_velocity: settings.falling_velocity,
            width: settings.playfield_width,
            height: settings.playfield_height,
            bars: Vec::new(),
            touching_bar: false,
        }
    }

    /// Advances the session and the toy world by one frame. Returns the
    /// instructions the session emitted during it.
    pub fn step(&mut self, session: &mut GameSession, dt: f64) -> Vec<Instruction> {
        session.update(dt);
        let instructions = session.drain_instructions();
        for instruction in &instructions {
            if let Instruction::SpawnBars(placement) = instruction {
                self.bars.push(ScrollingBars {
                    x: self.width,
                    placement: *placement,
                });
            }
        }

        let phase = session.phase();
        if phase == Phase::Blastoff {
            // Gravity is switched off for the warp sequence.
            self.velocity = 0.0;
        }
        if !phase.is_live() {
            return instructions;
        }

        let scroll = session.settings().speed * FRAME_RATE * dt;
        for bars in self.bars.iter_mut() {
            bars.x -= scroll;
        }
        self.bars.retain(|bars| bars.x + BAR_WIDTH > 0.0);

        let player_x = session.flight().player_x();
        let target = self
            .bars
            .iter()
            .find(|bars| bars.x + BAR_WIDTH >= player_x)
            .map(|bars| bars.placement.gap_center_y + bars.placement.gap_size / 4.0)
            .unwrap_or(self.height / 2.0);
        if self.player_y > target + JUMP_SLACK && self.velocity >= 0.0 {
            self.velocity = -self.jump_force;
            session.jump();
        }

        self.velocity = (self.velocity + self.gravity * dt).min(self.falling_velocity);
        self.player_y += self.velocity * dt;

        if self.player_y - PLAYER_HEIGHT <= 0.0 || self.player_y >= self.height {
            session.collide(Collider::Boundary);
            return instructions;
        }

        let hitting = self.bars.iter().any(|bars| self.hits(player_x, bars));
        if hitting && !self.touching_bar {
            session.collide(Collider::Bar);
        } else if !hitting && self.touching_bar {
            session.collide_end(Collider::Bar);
        }
        self.touching_bar = hitting;
        instructions
    }

    fn hits(&self, player_x: f64, bars: &ScrollingBars) -> bool {
        let overlaps_x = bars.x < player_x + PLAYER_WIDTH && bars.x + BAR_WIDTH > player_x;
        let top = self.player_y - PLAYER_HEIGHT;
        overlaps_x
            && (top < bars.placement.top_bar_height()
                || self.player_y > bars.placement.bottom_bar_top())
    }

    pub fn bars(&self) -> &[ScrollingBars] {
        &self.bars
    }

    pub fn player_y(&self) -> f64 {
        self.player_y
    }
}

/// Plays a whole session with the bot at [`FRAME_RATE`], for at most
/// `max_seconds` of simulated time. Returns every instruction emitted.
pub fn play(session: &mut GameSession, max_seconds: f64) -> Vec<Instruction> {
    let mut autopilot = Autopilot::new(session.settings());
    let dt = 1.0 / FRAME_RATE;
    let frames = (max_seconds * FRAME_RATE).ceil() as u64;

    session.start();
    let mut emitted = session.drain_instructions();
    for _ in 0..frames {
        emitted.extend(autopilot.step(session, dt));
        if matches!(session.phase(), Phase::Ended(_)) {
            break;
        }
    }
    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_types::GameMode;

    #[test]
    fn test_bars_scroll_left_and_expire() {
        let settings = Settings {
            mode: GameMode::Flappy,
            add_trade_chance: 100.0,
            add_liquidity_chance: 0.0,
            remove_liquidity_chance: 0.0,
            ..Settings::default()
        };
        let mut session = GameSession::new(settings.clone(), 1).unwrap();
        session.start();
        let mut autopilot = Autopilot::new(&settings);

        // One tick's worth of frames spawns the first pair.
        for _ in 0..43 {
            autopilot.step(&mut session, 1.0 / FRAME_RATE);
        }
        if session.phase().is_live() {
            assert!(!autopilot.bars().is_empty(), "A trade tick should have spawned bars.");
            assert!(autopilot.bars()[0].x < settings.playfield_width);
        }
    }

    #[test]
    fn test_play_drives_the_market() {
        let mut session = GameSession::new(Settings::default(), 42).unwrap();
        let emitted = play(&mut session, 5.0);

        assert!(session.ticks() > 0, "five seconds at 0.7s per tick should tick");
        assert!(
            emitted
                .iter()
                .any(|i| matches!(i, Instruction::AppendFeed(_))),
            "the event feed should have received something"
        );
        assert_ne!(session.phase(), Phase::Starting);
    }
}
