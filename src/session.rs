// src/session.rs

use crate::economy::{GameStorage, HighScoreStore, record_high_score};
use crate::error::{ConfigResult, StorageResult};
use crate::events::EventGenerator;
use crate::settings::Settings;
use crate::settings::tuning::{JUMP_SCORE, WARP_SPEED};
use crate::shared_types::{Direction, GameMode, Outcome};
use crate::simulators::{Collider, Flight, FlightEvent, Phase, TickLoop};
use crate::trades::{DeviationCooldown, TradeObstacleMapper};
use crate::types::{EventKind, GameEvent, Instruction, Sound, StatKey};
use crate::utils::{commify, format_speed};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

/// What the game-over screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub outcome: Outcome,
    pub score: u64,
    pub total_volume: u64,
    pub top_speed: f64,
    pub ticks: u64,
}

/// One game session. Owns every piece of mutable simulation state, so any
/// number of sessions can run side by side.
///
/// The host drives it with [`GameSession::update`] once per frame, reports
/// input and collisions, and drains the resulting instructions.
pub struct GameSession {
    /// Live copy; SPEED follows the current background speed.
    settings: Settings,
    initial_settings: Settings,
    seed: u64,
    rng: StdRng,
    storage: GameStorage,
    generator: EventGenerator,
    mapper: TradeObstacleMapper,
    cooldown: DeviationCooldown,
    flight: Flight,
    tick_loop: TickLoop,
    outbox: Vec<Instruction>,
    ticks: u64,
}

impl GameSession {
    /// Validates the settings and builds a session that has not started yet.
    pub fn new(settings: Settings, seed: u64) -> ConfigResult<Self> {
        settings.validate()?;
        Ok(Self {
            storage: GameStorage::from_settings(&settings),
            generator: EventGenerator::new(&settings),
            mapper: TradeObstacleMapper::new(&settings),
            cooldown: DeviationCooldown::new(settings.deviation_cooldown),
            flight: Flight::new(&settings),
            tick_loop: TickLoop::new(settings.tic_rate),
            rng: StdRng::seed_from_u64(seed),
            initial_settings: settings.clone(),
            settings,
            seed,
            outbox: Vec::new(),
            ticks: 0,
        })
    }

    /// Resets the economy and puts the player in motion.
    pub fn start(&mut self) {
        if self.flight.phase() != Phase::Starting {
            return;
        }
        self.storage.reset();
        self.mapper.reset();
        self.cooldown.reset();
        self.tick_loop.reset();
        self.ticks = 0;

        self.outbox.push(Instruction::PlaySound(Sound::GameBackgroundMusic));
        for stat in [
            StatKey::Liquidity,
            StatKey::Longs,
            StatKey::Shorts,
            StatKey::Volume,
            StatKey::Score,
        ] {
            self.push_stat(stat);
        }

        let events = self.flight.start();
        self.handle_flight_events(events);
        info!(
            "session started (mode {:?}, seed {}, tic rate {}s)",
            self.settings.mode, self.seed, self.settings.tic_rate
        );
    }

    /// Throws the current run away and starts a fresh one with the original
    /// settings and the next RNG draws.
    pub fn restart(&mut self) {
        self.settings = self.initial_settings.clone();
        self.flight = Flight::new(&self.settings);
        self.start();
    }

    /// Per-frame entry point. `dt` is the frame time in seconds.
    /// Returns the number of market ticks that ran.
    pub fn update(&mut self, dt: f64) -> u32 {
        let events = self.flight.advance(dt);
        self.handle_flight_events(events);
        if self.flight.mode() == GameMode::Hyperdrive && self.flight.phase() != Phase::Starting {
            self.storage.record_speed(self.flight.player_speed());
        }
        self.settings.speed = self.flight.background_speed();

        let due = self.tick_loop.advance(dt);
        let mut ran = 0;
        for _ in 0..due {
            if !self.accepts_ticks() {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    fn accepts_ticks(&self) -> bool {
        !self.tick_loop.is_cancelled() && self.flight.phase().is_live()
    }

    /// One market tick: roll an event, apply it to the economy, and for
    /// trades place the next bar pair. Does nothing once the loop is cancelled.
    pub fn tick(&mut self) -> GameEvent {
        if !self.accepts_ticks() {
            return GameEvent::None;
        }
        self.ticks += 1;

        let event = match self.generator.generate_game_event(&mut self.rng) {
            EventKind::None => GameEvent::None,
            EventKind::AddTrade => {
                let amount = self.storage.sample_event_amount(&mut self.rng);
                let direction = EventGenerator::random_direction(&mut self.rng);
                self.apply_trade(amount, direction);
                GameEvent::AddTrade { amount, direction }
            }
            EventKind::AddLiquidity => {
                let amount = self.storage.sample_event_amount(&mut self.rng);
                self.storage.add_liquidity(amount);
                self.cooldown.on_liquidity();
                self.push_stat(StatKey::Liquidity);
                GameEvent::AddLiquidity { amount }
            }
            EventKind::RemoveLiquidity => {
                let amount = self.storage.sample_event_amount(&mut self.rng);
                self.storage.remove_liquidity(amount);
                self.cooldown.on_liquidity();
                self.push_stat(StatKey::Liquidity);
                GameEvent::RemoveLiquidity { amount }
            }
        };

        if let Some(message) = event.feed_message() {
            self.outbox.push(Instruction::AppendFeed(message));
        }
        debug!("tick {}: {:?}", self.ticks, event);
        event
    }

    fn apply_trade(&mut self, amount: u64, direction: Direction) {
        match direction {
            Direction::Long => {
                self.storage.add_long(amount);
                self.push_stat(StatKey::Longs);
            }
            Direction::Short => {
                self.storage.add_short(amount);
                self.push_stat(StatKey::Shorts);
            }
        }
        self.push_stat(StatKey::Volume);

        let placement = self
            .mapper
            .place(&mut self.rng, amount, direction, &self.cooldown);
        self.outbox.push(Instruction::SpawnBars(placement));
        self.cooldown.on_trade();
    }

    /// The player jumped. Collects fees while the run is live.
    pub fn jump(&mut self) -> bool {
        if !self.flight.phase().is_live() {
            return false;
        }
        self.storage.add_score(JUMP_SCORE);
        self.outbox.push(Instruction::PlaySound(Sound::JumpSound));
        self.outbox.push(Instruction::ShowFees);
        self.push_stat(StatKey::Score);
        true
    }

    pub fn collide(&mut self, collider: Collider) {
        let events = self.flight.collide(collider);
        self.handle_flight_events(events);
    }

    pub fn collide_end(&mut self, collider: Collider) {
        self.flight.collide_end(collider);
    }

    fn handle_flight_events(&mut self, events: Vec<FlightEvent>) {
        for event in events {
            match event {
                FlightEvent::SpeedStat(speed) => self.outbox.push(Instruction::UpdateStat {
                    stat: StatKey::Speed,
                    value: format_speed(speed),
                }),
                FlightEvent::BlastoffEngaged => {
                    self.tick_loop.cancel();
                    self.storage.record_speed(WARP_SPEED);
                    self.outbox.push(Instruction::PlaySound(Sound::HyperdriveSound));
                    info!("blastoff after {} ticks, score {}", self.ticks, self.storage.score());
                }
                FlightEvent::Ended(outcome) => self.finish(outcome),
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.tick_loop.cancel();
        self.outbox.push(Instruction::StopSound(Sound::GameBackgroundMusic));
        self.outbox.push(Instruction::EndSession(outcome));
        info!(
            "session ended: {:?}, score {}, volume {}, top speed {}",
            outcome,
            self.storage.score(),
            self.storage.total_volume(),
            format_speed(self.storage.top_speed())
        );
    }

    fn push_stat(&mut self, stat: StatKey) {
        let value = match stat {
            StatKey::Liquidity => commify(self.storage.liquidity(), 2),
            StatKey::Longs => commify(self.storage.longs_volume(), 2),
            StatKey::Shorts => commify(self.storage.shorts_volume(), 2),
            StatKey::Volume => commify(self.storage.total_volume(), 2),
            StatKey::Score => commify(self.storage.score(), 2),
            StatKey::Speed => format_speed(self.flight.player_speed()),
            StatKey::TopSpeed => format_speed(self.storage.top_speed()),
        };
        self.outbox.push(Instruction::UpdateStat { stat, value });
    }

    /// Saves the score if it is a new best; returns the best to show.
    pub fn record_high_score<S: HighScoreStore + ?Sized>(&self, store: &S) -> StorageResult<u64> {
        record_high_score(store, self.storage.score())
    }

    /// Game-over numbers, once the session has ended.
    pub fn summary(&self) -> Option<SessionSummary> {
        match self.flight.phase() {
            Phase::Ended(outcome) => Some(SessionSummary {
                outcome,
                score: self.storage.score(),
                total_volume: self.storage.total_volume(),
                top_speed: self.storage.top_speed(),
                ticks: self.ticks,
            }),
            _ => None,
        }
    }

    /// Everything emitted since the last drain, in order.
    pub fn drain_instructions(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.outbox)
    }

    pub fn storage(&self) -> &GameStorage {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.flight.phase()
    }

    pub fn flight(&self) -> &Flight {
        &self.flight
    }

    pub fn cooldown(&self) -> &DeviationCooldown {
        &self.cooldown
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
