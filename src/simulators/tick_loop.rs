// src/simulators/tick_loop.rs

/// Turns frame time into fixed-period ticks.
///
/// The host feeds elapsed seconds every frame; each full `period` that has
/// accumulated is one tick. Once cancelled the loop never fires again.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLoop {
    period: f64,
    accumulator: f64,
    cancelled: bool,
}

impl TickLoop {
    /// `period` must be positive; settings validation guarantees it for TIC_RATE.
    pub fn new(period: f64) -> Self {
        Self {
            period,
            accumulator: 0.0,
            cancelled: false,
        }
    }

    /// Number of ticks due after `dt` more seconds.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if self.cancelled || !(dt > 0.0) {
            return 0;
        }
        self.accumulator += dt;
        let mut due = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            due += 1;
        }
        due
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    /// Re-arms the loop for a new session.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.cancelled = false;
    }
}
