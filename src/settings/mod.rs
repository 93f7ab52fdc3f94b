// src/settings/mod.rs

//! Per-session configuration. Every knob has a default taken from the
//! shipped game; an embedding caller overrides any subset of them.

pub mod tuning;

use crate::error::{ConfigError, ConfigResult};
use crate::shared_types::GameMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Settings {
    /// The game mode. Live-tunable.
    pub mode: GameMode,
    /// The force pulling the player down. Read by the host physics.
    pub gravity: f64,
    /// How much the player jumps on input. Read by the host physics.
    pub jump_force: f64,
    /// Terminal falling velocity. Read by the host physics.
    pub falling_velocity: f64,
    /// Horizontal background speed at the start of a run. Live-tunable.
    pub speed: f64,
    /// Horizontal background speed on reaching hyperdrive.
    pub final_speed: f64,
    /// Seconds from the starting position to hyperdrive. Shrinks as the
    /// player gets closer to the goal.
    pub time_to_hyperdrive: f64,
    /// Smallest opening between a top and bottom bar.
    pub min_gap: f64,
    /// Largest opening between a top and bottom bar.
    pub max_gap: f64,
    /// Max distance a gap center may drift from the one before it.
    pub deviation: f64,
    /// Non-trade events after which `deviation` stops applying to the next gap.
    pub deviation_cooldown: u32,
    /// Seconds between event ticks.
    pub tic_rate: f64,
    /// % chance of an event on each tick.
    pub event_chance: f64,
    /// % of events that are trades (bars added).
    pub add_trade_chance: f64,
    /// % of events that add liquidity.
    pub add_liquidity_chance: f64,
    /// % of events that remove liquidity.
    pub remove_liquidity_chance: f64,
    /// Audio volume %.
    pub volume: f64,
    /// Liquidity at the start of every session.
    pub initial_liquidity: u64,
    /// Liquidity never drains below this.
    pub liquidity_floor: u64,
    pub playfield_width: f64,
    pub playfield_height: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Hyperdrive,
            gravity: 1750.0,
            jump_force: 550.0,
            falling_velocity: 600.0,
            speed: 5.0,
            final_speed: 15.0,
            time_to_hyperdrive: 20.0,
            min_gap: 180.0,
            max_gap: 400.0,
            deviation: 90.0,
            deviation_cooldown: 1,
            tic_rate: 0.7,
            event_chance: 100.0,
            add_trade_chance: 50.0,
            add_liquidity_chance: 25.0,
            remove_liquidity_chance: 25.0,
            volume: 50.0,
            initial_liquidity: 10_000,
            liquidity_floor: 0,
            playfield_width: 1280.0,
            playfield_height: 720.0,
        }
    }
}

impl Settings {
    /// Parses a partial JSON object on top of the defaults and validates the result.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Fails fast on configurations that would make the simulator degenerate.
    pub fn validate(&self) -> ConfigResult<()> {
        let chances = [
            ("EVENT_CHANCE", self.event_chance),
            ("ADD_TRADE_CHANCE", self.add_trade_chance),
            ("ADD_LIQUIDITY_CHANCE", self.add_liquidity_chance),
            ("REMOVE_LIQUIDITY_CHANCE", self.remove_liquidity_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        let kinds_total =
            self.add_trade_chance + self.add_liquidity_chance + self.remove_liquidity_chance;
        if kinds_total > 100.0 {
            return Err(ConfigError::ProbabilitiesExceedTotal(kinds_total));
        }

        if !(self.tic_rate.is_finite() && self.tic_rate > 0.0) {
            return Err(ConfigError::NonPositiveTicRate(self.tic_rate));
        }

        if !(self.min_gap.is_finite() && self.min_gap > 0.0) {
            return Err(ConfigError::NonPositiveGap(self.min_gap));
        }
        if !self.max_gap.is_finite() || self.min_gap > self.max_gap {
            return Err(ConfigError::GapBoundsInverted {
                min: self.min_gap,
                max: self.max_gap,
            });
        }
        if !(self.playfield_height.is_finite() && self.max_gap <= self.playfield_height) {
            return Err(ConfigError::PlayfieldTooSmall {
                height: self.playfield_height,
                max_gap: self.max_gap,
            });
        }

        let non_negative = [
            ("DEVIATION", self.deviation),
            ("SPEED", self.speed),
            ("FINAL_SPEED", self.final_speed),
            ("TIME_TO_HYPERDRIVE", self.time_to_hyperdrive),
            ("VOLUME", self.volume),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        if !(self.playfield_width.is_finite() && self.playfield_width > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "PLAYFIELD_WIDTH",
                value: self.playfield_width,
            });
        }

        if self.initial_liquidity < self.liquidity_floor {
            return Err(ConfigError::LiquiditySeedBelowFloor {
                initial: self.initial_liquidity,
                floor: self.liquidity_floor,
            });
        }
        Ok(())
    }

    /// Edits one numeric setting by its screen name (e.g. `"MIN_GAP"`).
    ///
    /// Only the value itself is checked here; cross-field rules are enforced
    /// by [`Settings::validate`] when the next session starts.
    pub fn set(&mut self, name: &str, value: f64) -> ConfigResult<()> {
        if !value.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: Self::static_name(name)?,
                value,
            });
        }
        match name {
            "GRAVITY" => self.gravity = value,
            "JUMP_FORCE" => self.jump_force = value,
            "FALLING_VELOCITY" => self.falling_velocity = value,
            "SPEED" => self.speed = value,
            "FINAL_SPEED" => self.final_speed = value,
            "TIME_TO_HYPERDRIVE" => self.time_to_hyperdrive = value,
            "MIN_GAP" => self.min_gap = value,
            "MAX_GAP" => self.max_gap = value,
            "DEVIATION" => self.deviation = value,
            "DEVIATION_COOLDOWN" => {
                self.deviation_cooldown = Self::as_count(name, value)?.min(u32::MAX as u64) as u32
            }
            "TIC_RATE" => self.tic_rate = value,
            "EVENT_CHANCE" => self.event_chance = value,
            "ADD_TRADE_CHANCE" => self.add_trade_chance = value,
            "ADD_LIQUIDITY_CHANCE" => self.add_liquidity_chance = value,
            "REMOVE_LIQUIDITY_CHANCE" => self.remove_liquidity_chance = value,
            "VOLUME" => self.volume = value,
            "INITIAL_LIQUIDITY" => self.initial_liquidity = Self::as_count(name, value)?,
            "LIQUIDITY_FLOOR" => self.liquidity_floor = Self::as_count(name, value)?,
            "PLAYFIELD_WIDTH" => self.playfield_width = value,
            "PLAYFIELD_HEIGHT" => self.playfield_height = value,
            _ => return Err(ConfigError::UnknownSetting(name.to_string())),
        }
        Ok(())
    }

    /// Flips between hyperdrive and flappy.
    pub fn toggle_mode(&mut self) -> GameMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Every numeric setting in screen order, for listing on a settings page.
    pub fn numeric_entries(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("GRAVITY", self.gravity),
            ("JUMP_FORCE", self.jump_force),
            ("FALLING_VELOCITY", self.falling_velocity),
            ("SPEED", self.speed),
            ("FINAL_SPEED", self.final_speed),
            ("TIME_TO_HYPERDRIVE", self.time_to_hyperdrive),
            ("MIN_GAP", self.min_gap),
            ("MAX_GAP", self.max_gap),
            ("DEVIATION", self.deviation),
            ("DEVIATION_COOLDOWN", self.deviation_cooldown as f64),
            ("TIC_RATE", self.tic_rate),
            ("EVENT_CHANCE", self.event_chance),
            ("ADD_TRADE_CHANCE", self.add_trade_chance),
            ("ADD_LIQUIDITY_CHANCE", self.add_liquidity_chance),
            ("REMOVE_LIQUIDITY_CHANCE", self.remove_liquidity_chance),
            ("VOLUME", self.volume),
            ("INITIAL_LIQUIDITY", self.initial_liquidity as f64),
            ("LIQUIDITY_FLOOR", self.liquidity_floor as f64),
            ("PLAYFIELD_WIDTH", self.playfield_width),
            ("PLAYFIELD_HEIGHT", self.playfield_height),
        ]
    }

    fn as_count(name: &str, value: f64) -> ConfigResult<u64> {
        if value < 0.0 {
            return Err(ConfigError::InvalidValue {
                name: Self::static_name(name)?,
                value,
            });
        }
        Ok(value as u64)
    }

    fn static_name(name: &str) -> ConfigResult<&'static str> {
        Settings::default()
            .numeric_entries()
            .into_iter()
            .map(|(key, _)| key)
            .find(|key| *key == name)
            .ok_or_else(|| ConfigError::UnknownSetting(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"MIN_GAP": 200, "MODE": "flappy"}"#).unwrap();
        assert_eq!(settings.min_gap, 200.0);
        assert_eq!(settings.mode, GameMode::Flappy);
        assert_eq!(settings.max_gap, 400.0, "Untouched keys should keep their defaults.");
        assert_eq!(settings.deviation_cooldown, 1);
    }

    #[test]
    fn test_rejects_negative_probability() {
        let settings = Settings {
            add_trade_chance: -1.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name: "ADD_TRADE_CHANCE", .. })
        ));
    }

    #[test]
    fn test_rejects_probability_above_hundred() {
        let settings = Settings {
            event_chance: 100.5,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name: "EVENT_CHANCE", .. })
        ));
    }

    #[test]
    fn test_rejects_kind_chances_over_hundred() {
        let settings = Settings {
            add_trade_chance: 60.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ProbabilitiesExceedTotal(total)) if total == 110.0
        ));
    }

    #[test]
    fn test_rejects_inverted_gaps() {
        let settings = Settings {
            min_gap: 401.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::GapBoundsInverted { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_gap() {
        let settings = Settings {
            min_gap: 0.0,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::NonPositiveGap(_))));
    }

    #[test]
    fn test_rejects_gap_taller_than_playfield() {
        let settings = Settings {
            playfield_height: 300.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::PlayfieldTooSmall { .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_tic_rate() {
        for tic_rate in [0.0, -0.5, f64::NAN] {
            let settings = Settings {
                tic_rate,
                ..Settings::default()
            };
            assert!(
                matches!(settings.validate(), Err(ConfigError::NonPositiveTicRate(_))),
                "TIC_RATE {} should be rejected",
                tic_rate
            );
        }
    }

    #[test]
    fn test_rejects_seed_below_floor() {
        let settings = Settings {
            initial_liquidity: 50,
            liquidity_floor: 100,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::LiquiditySeedBelowFloor { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            Settings::from_json(r#"{"MIN_GAP": "wide"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_set_by_name() {
        let mut settings = Settings::default();
        settings.set("DEVIATION", 45.0).unwrap();
        settings.set("DEVIATION_COOLDOWN", 3.0).unwrap();
        assert_eq!(settings.deviation, 45.0);
        assert_eq!(settings.deviation_cooldown, 3);

        assert!(matches!(
            settings.set("WARP_FACTOR", 9.0),
            Err(ConfigError::UnknownSetting(_))
        ));
        assert!(matches!(
            settings.set("DEVIATION_COOLDOWN", -2.0),
            Err(ConfigError::InvalidValue { name: "DEVIATION_COOLDOWN", .. })
        ));
        assert!(matches!(
            settings.set("SPEED", f64::INFINITY),
            Err(ConfigError::InvalidValue { name: "SPEED", .. })
        ));
    }

    #[test]
    fn test_every_listed_entry_is_settable() {
        let mut settings = Settings::default();
        for (name, value) in Settings::default().numeric_entries() {
            settings.set(name, value).unwrap();
        }
        assert_eq!(settings, Settings::default());
    }
}
