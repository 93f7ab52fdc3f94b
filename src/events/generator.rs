// src/events/generator.rs

use crate::settings::Settings;
use crate::shared_types::Direction;
use crate::types::event::EventKind;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Rolls the market event for each tick.
///
/// Two independent percentage rolls are made: the first decides whether
/// anything happens at all (`EVENT_CHANCE`), the second picks which kind of
/// event it is. Event density and event mixture are tuned separately.
#[derive(Debug, Clone)]
pub struct EventGenerator {
    event_chance: f64,
    /// Cumulative upper bounds for trade, add-liquidity and remove-liquidity.
    thresholds: [(f64, EventKind); 3],
    percent: Uniform<f64>,
}

impl EventGenerator {
    /// Expects settings that already passed [`Settings::validate`].
    pub fn new(settings: &Settings) -> Self {
        let trade = settings.add_trade_chance;
        let add = trade + settings.add_liquidity_chance;
        let remove = add + settings.remove_liquidity_chance;
        Self {
            event_chance: settings.event_chance,
            thresholds: [
                (trade, EventKind::AddTrade),
                (add, EventKind::AddLiquidity),
                (remove, EventKind::RemoveLiquidity),
            ],
            percent: Uniform::new(0.0, 100.0),
        }
    }

    /// One call per tick.
    pub fn generate_game_event<R: Rng + ?Sized>(&self, rng: &mut R) -> EventKind {
        // A roll in [0, 100) fires iff it lands under the chance, so 0 never
        // fires and 100 always does.
        if self.percent.sample(rng) >= self.event_chance {
            return EventKind::None;
        }

        let kind_roll = self.percent.sample(rng);
        self.thresholds
            .iter()
            .find(|(upper, _)| kind_roll < *upper)
            .map(|(_, kind)| *kind)
            .unwrap_or(EventKind::None)
    }

    /// Coin flip for which side a trade lands on.
    pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        if rng.gen_bool(0.5) {
            Direction::Long
        } else {
            Direction::Short
        }
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
    use statrs::distribution::{ContinuousCDF, Normal};
    use std::collections::HashMap;

    fn generator(event: f64, trade: f64, add: f64, remove: f64) -> EventGenerator {
        EventGenerator::new(&Settings {
            event_chance: event,
            add_trade_chance: trade,
            add_liquidity_chance: add,
            remove_liquidity_chance: remove,
            ..Settings::default()
        })
    }

    fn tally(generator: &EventGenerator, seed: u64, n: usize) -> HashMap<EventKind, usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut counts = HashMap::new();
        for _ in 0..n {
            *counts.entry(generator.generate_game_event(&mut rng)).or_insert(0) += 1;
        }
        counts
    }

    /// Half-width of a two-sided band around `p` that a fair sample of size `n`
    /// escapes with probability ~1e-6.
    fn tolerance(p: f64, n: usize) -> f64 {
        let z = Normal::new(0.0, 1.0).unwrap().inverse_cdf(1.0 - 5e-7);
        z * (p * (1.0 - p) / n as f64).sqrt()
    }

    #[test]
    fn test_zero_event_chance_never_fires() {
        let generator = generator(0.0, 50.0, 25.0, 25.0);
        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..10_000 {
            assert_eq!(
                generator.generate_game_event(&mut rng),
                EventKind::None,
                "call {} produced an event with EVENT_CHANCE 0",
                i
            );
        }
    }

    #[test]
    fn test_all_trade_config_always_trades() {
        let generator = generator(100.0, 100.0, 0.0, 0.0);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..10_000 {
            assert_eq!(generator.generate_game_event(&mut rng), EventKind::AddTrade);
        }
    }

    #[test]
    fn test_none_frequency_tracks_event_chance() {
        let n = 200_000;
        for event_chance in [10.0, 35.0, 70.0] {
            let generator = generator(event_chance, 50.0, 25.0, 25.0);
            let counts = tally(&generator, 3, n);
            let observed = *counts.get(&EventKind::None).unwrap_or(&0) as f64 / n as f64;
            let expected = (100.0 - event_chance) / 100.0;
            assert!(
                (observed - expected).abs() <= tolerance(expected, n),
                "EVENT_CHANCE {}: NONE rate {} outside band around {}",
                event_chance,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_kind_mixture_follows_declared_order() {
        let n = 200_000;
        let generator = generator(100.0, 50.0, 30.0, 20.0);
        let counts = tally(&generator, 4, n);

        for (kind, expected) in [
            (EventKind::AddTrade, 0.5),
            (EventKind::AddLiquidity, 0.3),
            (EventKind::RemoveLiquidity, 0.2),
        ] {
            let observed = *counts.get(&kind).unwrap_or(&0) as f64 / n as f64;
            assert!(
                (observed - expected).abs() <= tolerance(expected, n),
                "{:?} rate {} outside band around {}",
                kind,
                observed,
                expected
            );
        }
        assert!(!counts.contains_key(&EventKind::None), "Chances sum to 100, nothing should fall through.");
    }

    #[test]
    fn test_remainder_falls_through_to_none() {
        let n = 100_000;
        let generator = generator(100.0, 10.0, 0.0, 0.0);
        let counts = tally(&generator, 5, n);
        let none_rate = *counts.get(&EventKind::None).unwrap_or(&0) as f64 / n as f64;
        assert!(
            (none_rate - 0.9).abs() <= tolerance(0.9, n),
            "NONE rate {} should sit near 0.9",
            none_rate
        );
        assert!(!counts.contains_key(&EventKind::AddLiquidity));
        assert!(!counts.contains_key(&EventKind::RemoveLiquidity));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let generator = generator(60.0, 50.0, 25.0, 25.0);
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let left: Vec<_> = (0..500).map(|_| generator.generate_game_event(&mut a)).collect();
        let right: Vec<_> = (0..500).map(|_| generator.generate_game_event(&mut b)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_direction_is_a_fair_coin() {
        let mut rng = StdRng::seed_from_u64(8);
        let n = 100_000;
        let longs = (0..n)
            .filter(|_| EventGenerator::random_direction(&mut rng) == Direction::Long)
            .count();
        let rate = longs as f64 / n as f64;
        assert!((rate - 0.5).abs() <= tolerance(0.5, n));
    }
}
