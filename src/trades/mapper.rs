// src/trades/mapper.rs

use super::cooldown::DeviationCooldown;
use crate::settings::Settings;
use crate::shared_types::Direction;
use crate::types::placement::ObstaclePlacement;
use log::trace;
use rand::Rng;

/// Turns trades into bar pairs. Remembers the previous gap center so that
/// consecutive gaps stay reachable while the deviation cooldown is running.
#[derive(Debug, Clone)]
pub struct TradeObstacleMapper {
    min_gap: f64,
    max_gap: f64,
    deviation: f64,
    playfield_height: f64,
    previous_center: Option<f64>,
    sequence: u64,
}

impl TradeObstacleMapper {
    /// Expects settings that already passed [`Settings::validate`].
    pub fn new(settings: &Settings) -> Self {
        Self {
            min_gap: settings.min_gap,
            max_gap: settings.max_gap,
            deviation: settings.deviation,
            playfield_height: settings.playfield_height,
            previous_center: None,
            sequence: 0,
        }
    }

    /// Samples a gap size and a center, then places the pair.
    pub fn place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        amount: u64,
        direction: Direction,
        cooldown: &DeviationCooldown,
    ) -> ObstaclePlacement {
        let gap_size = if self.max_gap > self.min_gap {
            rng.gen_range(self.min_gap..=self.max_gap)
        } else {
            self.min_gap
        };
        let (low, high) = self.center_range(gap_size);
        let candidate = if high > low {
            rng.gen_range(low..=high)
        } else {
            low
        };
        self.place_at(candidate, gap_size, amount, direction, cooldown)
    }

    /// Places a pair from an already drawn candidate center.
    ///
    /// The candidate is first pulled inside the playfield, then into
    /// `[previous - DEVIATION, previous + DEVIATION]` if the cooldown is still
    /// running. The first pair of a session is never constrained.
    pub fn place_at(
        &mut self,
        candidate: f64,
        gap_size: f64,
        amount: u64,
        direction: Direction,
        cooldown: &DeviationCooldown,
    ) -> ObstaclePlacement {
        let (low, high) = self.center_range(gap_size);
        let candidate = candidate.clamp(low, high.max(low));

        let (center, constrained) = match self.previous_center {
            Some(previous) if cooldown.is_active() => (
                candidate.clamp(previous - self.deviation, previous + self.deviation),
                true,
            ),
            _ => (candidate, false),
        };

        self.previous_center = Some(center);
        self.sequence += 1;

        let placement = ObstaclePlacement {
            sequence: self.sequence,
            gap_center_y: center,
            gap_size,
            amount,
            direction,
            constrained,
        };
        trace!("placed bars {:?}", placement);
        placement
    }

    /// Centers that keep the whole gap inside the playfield.
    fn center_range(&self, gap_size: f64) -> (f64, f64) {
        let half = gap_size / 2.0;
        (half, self.playfield_height - half)
    }

    pub fn previous_center(&self) -> Option<f64> {
        self.previous_center
    }

    /// Forget the previous gap. A new session starts unconstrained.
    pub fn reset(&mut self) {
        self.previous_center = None;
        self.sequence = 0;
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

    fn scenario_settings() -> Settings {
        Settings {
            min_gap: 180.0,
            max_gap: 400.0,
            deviation: 90.0,
            deviation_cooldown: 1,
            ..Settings::default()
        }
    }

    #[test]
    fn test_second_gap_is_clamped_to_deviation() {
        // Arrange
        let settings = scenario_settings();
        let mut mapper = TradeObstacleMapper::new(&settings);
        let cooldown = DeviationCooldown::new(settings.deviation_cooldown);

        // Act
        let first = mapper.place_at(200.0, 200.0, 500, Direction::Long, &cooldown);
        let second = mapper.place_at(400.0, 200.0, 500, Direction::Short, &cooldown);

        // Assert
        assert_eq!(first.gap_center_y, 200.0);
        assert!(!first.constrained);
        assert!(second.constrained);
        assert!(
            (110.0..=290.0).contains(&second.gap_center_y),
            "second center {} escaped [110, 290]",
            second.gap_center_y
        );
        assert_eq!(second.gap_center_y, 290.0);
    }

    #[test]
    fn test_first_gap_ignores_bound() {
        let settings = Settings {
            deviation: 1.0,
            ..scenario_settings()
        };
        let mut mapper = TradeObstacleMapper::new(&settings);
        let cooldown = DeviationCooldown::new(5);

        let first = mapper.place_at(500.0, 200.0, 100, Direction::Long, &cooldown);

        assert_eq!(first.gap_center_y, 500.0);
        assert!(!first.constrained, "The first placement has nothing to deviate from.");
    }

    #[test]
    fn test_exhausted_cooldown_waives_bound() {
        let settings = scenario_settings();
        let mut mapper = TradeObstacleMapper::new(&settings);
        let mut cooldown = DeviationCooldown::new(settings.deviation_cooldown);

        mapper.place_at(200.0, 200.0, 100, Direction::Long, &cooldown);
        cooldown.on_liquidity();
        let second = mapper.place_at(400.0, 200.0, 100, Direction::Long, &cooldown);

        assert_eq!(second.gap_center_y, 400.0);
        assert!(!second.constrained);
    }

    #[test]
    fn test_candidate_pulled_inside_playfield() {
        let mut mapper = TradeObstacleMapper::new(&scenario_settings());
        let cooldown = DeviationCooldown::new(0);

        let top = mapper.place_at(10.0, 300.0, 100, Direction::Long, &cooldown);
        let bottom = mapper.place_at(710.0, 300.0, 100, Direction::Long, &cooldown);

        assert_eq!(top.top_bar_height(), 0.0);
        assert_eq!(bottom.bottom_bar_top(), 720.0);
    }

    #[test]
    fn test_random_placements_respect_every_bound() {
        // Arrange
        let settings = scenario_settings();
        let mut mapper = TradeObstacleMapper::new(&settings);
        let cooldown = DeviationCooldown::new(1);
        let mut rng = StdRng::seed_from_u64(2024);

        // Act + Assert
        let mut previous: Option<f64> = None;
        for _ in 0..5_000 {
            let placement = mapper.place(&mut rng, 100, Direction::Long, &cooldown);
            assert!(
                (settings.min_gap..=settings.max_gap).contains(&placement.gap_size),
                "gap size {} outside [MIN_GAP, MAX_GAP]",
                placement.gap_size
            );
            if let Some(p) = previous {
                assert!(
                    (placement.gap_center_y - p).abs() <= settings.deviation,
                    "center moved from {} to {}",
                    p,
                    placement.gap_center_y
                );
            }
            previous = Some(placement.gap_center_y);
        }
    }

    #[test]
    fn test_unconstrained_placements_keep_gap_on_screen() {
        let settings = scenario_settings();
        let mut mapper = TradeObstacleMapper::new(&settings);
        let cooldown = DeviationCooldown::new(0);
        let mut rng = StdRng::seed_from_u64(77);

        for _ in 0..5_000 {
            let placement = mapper.place(&mut rng, 100, Direction::Short, &cooldown);
            assert!(placement.top_bar_height() >= 0.0);
            assert!(placement.bottom_bar_top() <= settings.playfield_height);
        }
    }

    #[test]
    fn test_equal_gap_bounds_give_fixed_gap() {
        let settings = Settings {
            min_gap: 250.0,
            max_gap: 250.0,
            ..Settings::default()
        };
        let mut mapper = TradeObstacleMapper::new(&settings);
        let mut rng = StdRng::seed_from_u64(3);
        let placement = mapper.place(&mut rng, 100, Direction::Long, &DeviationCooldown::new(1));
        assert_eq!(placement.gap_size, 250.0);
    }

    #[test]
    fn test_sequence_and_reset() {
        let mut mapper = TradeObstacleMapper::new(&scenario_settings());
        let cooldown = DeviationCooldown::new(1);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(mapper.place(&mut rng, 100, Direction::Long, &cooldown).sequence, 1);
        assert_eq!(mapper.place(&mut rng, 100, Direction::Long, &cooldown).sequence, 2);

        mapper.reset();
        assert_eq!(mapper.previous_center(), None);
        let fresh = mapper.place_at(600.0, 200.0, 100, Direction::Long, &cooldown);
        assert_eq!(fresh.sequence, 1);
        assert!(!fresh.constrained, "After a reset the next gap is a first gap again.");
    }
}
