// src/trades/cooldown.rs

/// Counts liquidity events since the last trade. While it is above zero the
/// next gap has to stay within DEVIATION of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviationCooldown {
    reset_to: u32,
    remaining: u32,
}

impl DeviationCooldown {
    pub fn new(ticks: u32) -> Self {
        Self {
            reset_to: ticks,
            remaining: ticks,
        }
    }

    pub fn on_trade(&mut self) {
        self.remaining = self.reset_to;
    }

    pub fn on_liquidity(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// `false` once enough non-trade events went by to waive the bound.
    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.reset_to;
    }
}
