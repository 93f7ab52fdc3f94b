// src/economy/storage.rs

use crate::settings::Settings;
use crate::settings::tuning::MIN_EVENT_AMOUNT;
use crate::utils::rand_num;
use log::warn;
use rand::Rng;
use serde::Serialize;

/// The running counters of one session, as the HUD sees them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EconomyState {
    pub liquidity: u64,
    pub longs_volume: u64,
    pub shorts_volume: u64,
    /// Always `longs_volume + shorts_volume`.
    pub total_volume: u64,
    pub score: u64,
    pub top_speed: f64,
}

/// Owns the market aggregates of a single game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameStorage {
    state: EconomyState,
    initial_liquidity: u64,
    liquidity_floor: u64,
}

impl GameStorage {
    pub fn new(initial_liquidity: u64, liquidity_floor: u64) -> Self {
        Self {
            state: Self::initial_state(initial_liquidity),
            initial_liquidity,
            liquidity_floor,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.initial_liquidity, settings.liquidity_floor)
    }

    fn initial_state(initial_liquidity: u64) -> EconomyState {
        EconomyState {
            liquidity: initial_liquidity,
            longs_volume: 0,
            shorts_volume: 0,
            total_volume: 0,
            score: 0,
            top_speed: 0.0,
        }
    }

    /// Back to the session-start values. Called once per session before any event.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(self.initial_liquidity);
    }

    pub fn add_long(&mut self, amount: u64) {
        self.state.longs_volume = self.state.longs_volume.saturating_add(amount);
        self.refresh_total_volume();
    }

    pub fn add_short(&mut self, amount: u64) {
        self.state.shorts_volume = self.state.shorts_volume.saturating_add(amount);
        self.refresh_total_volume();
    }

    fn refresh_total_volume(&mut self) {
        self.state.total_volume = self.state.longs_volume.saturating_add(self.state.shorts_volume);
    }

    pub fn add_liquidity(&mut self, amount: u64) {
        self.state.liquidity = self.state.liquidity.saturating_add(amount);
    }

    /// Drains liquidity down to the configured floor at most.
    /// Returns `true` when the floor cut the removal short.
    pub fn remove_liquidity(&mut self, amount: u64) -> bool {
        let wanted = self.state.liquidity.saturating_sub(amount);
        if wanted < self.liquidity_floor || amount > self.state.liquidity {
            warn!(
                "liquidity removal of {} hit the floor ({} -> {})",
                amount, self.state.liquidity, self.liquidity_floor
            );
            self.state.liquidity = self.liquidity_floor.min(self.state.liquidity);
            return true;
        }
        self.state.liquidity = wanted;
        false
    }

    pub fn add_score(&mut self, points: u64) {
        self.state.score = self.state.score.saturating_add(points);
    }

    /// Keeps the fastest speed seen this session.
    pub fn record_speed(&mut self, speed: f64) {
        self.state.top_speed = self.state.top_speed.max(speed);
    }

    /// Picks how much the next event moves: somewhere between the minimum
    /// event size and the liquidity currently on the book.
    pub fn sample_event_amount<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.state.liquidity < MIN_EVENT_AMOUNT {
            warn!(
                "liquidity {} is below the minimum event size, using {}",
                self.state.liquidity, MIN_EVENT_AMOUNT
            );
            return MIN_EVENT_AMOUNT;
        }
        let upper = i64::try_from(self.state.liquidity).unwrap_or(i64::MAX);
        rand_num(rng, MIN_EVENT_AMOUNT as i64, upper) as u64
    }

    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    pub fn liquidity(&self) -> u64 {
        self.state.liquidity
    }

    pub fn longs_volume(&self) -> u64 {
        self.state.longs_volume
    }

    pub fn shorts_volume(&self) -> u64 {
        self.state.shorts_volume
    }

    pub fn total_volume(&self) -> u64 {
        self.state.total_volume
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn top_speed(&self) -> f64 {
        self.state.top_speed
    }
}

// -----------------------------------------------------------------------------
//  Unit Tests
// -----------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_storage_starts_from_seed() {
        let storage = GameStorage::new(10_000, 0);
        assert_eq!(storage.liquidity(), 10_000);
        assert_eq!(storage.total_volume(), 0);
        assert_eq!(storage.score(), 0);
        assert_eq!(storage.top_speed(), 0.0);
    }

    #[test]
    fn test_total_volume_tracks_both_sides() {
        // Arrange
        let mut storage = GameStorage::new(10_000, 0);
        let mut rng = StdRng::seed_from_u64(11);

        // Act + Assert after every mutation
        for i in 0..200 {
            let amount = rng.gen_range(100..=10_000);
            if i % 3 == 0 {
                storage.add_short(amount);
            } else {
                storage.add_long(amount);
            }
            assert_eq!(
                storage.total_volume(),
                storage.longs_volume() + storage.shorts_volume(),
                "total volume drifted after mutation {}",
                i
            );
        }
    }

    #[test]
    fn test_liquidity_round_trip_and_reset() {
        // Arrange
        let mut storage = GameStorage::new(10_000, 0);
        let fresh = storage.clone();

        // Act
        storage.add_liquidity(150);
        storage.add_liquidity(250);
        storage.add_liquidity(600);
        storage.add_long(700);
        storage.add_score(10);
        storage.record_speed(300.0);
        storage.reset();

        // Assert
        assert_eq!(storage, fresh, "reset() should restore the session-initial values.");
    }

    #[test]
    fn test_remove_liquidity_stops_at_floor() {
        let mut storage = GameStorage::new(1_000, 200);

        assert!(!storage.remove_liquidity(300));
        assert_eq!(storage.liquidity(), 700);

        assert!(storage.remove_liquidity(600), "The floor should have engaged.");
        assert_eq!(storage.liquidity(), 200);

        assert!(storage.remove_liquidity(u64::MAX));
        assert_eq!(storage.liquidity(), 200);
    }

    #[test]
    fn test_remove_liquidity_zero_floor_never_underflows() {
        let mut storage = GameStorage::new(500, 0);
        storage.remove_liquidity(501);
        assert_eq!(storage.liquidity(), 0);
    }

    #[test]
    fn test_top_speed_only_grows() {
        let mut storage = GameStorage::new(0, 0);
        storage.record_speed(500.0);
        storage.record_speed(200.0);
        assert_eq!(storage.top_speed(), 500.0);
    }

    #[test]
    fn test_event_amount_stays_within_liquidity() {
        let storage = GameStorage::new(2_500, 0);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let amount = storage.sample_event_amount(&mut rng);
            assert!(
                (MIN_EVENT_AMOUNT..=2_500).contains(&amount),
                "amount out of range: {}",
                amount
            );
        }
    }

    #[test]
    fn test_event_amount_guarded_when_liquidity_drained() {
        let mut storage = GameStorage::new(1_000, 0);
        storage.remove_liquidity(1_000);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(storage.sample_event_amount(&mut rng), MIN_EVENT_AMOUNT);
    }
}
