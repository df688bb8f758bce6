//! In-game clock.

use super::constants::DAY_LENGTH_MINUTES;
use serde::{Deserialize, Serialize};

/// Minutes and seconds into the current day. A day lasts 40 minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTime {
    pub mins: u32,
    pub secs: f64,
}

impl GameTime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock. Negative or non-finite amounts are ignored.
    pub fn advance(&mut self, secs: f64) {
        if !secs.is_finite() || secs <= 0.0 {
            return;
        }
        self.secs += secs;
        let whole_minutes = (self.secs / 60.0).floor();
        self.secs -= whole_minutes * 60.0;
        self.mins = ((self.mins as u64 + whole_minutes as u64) % DAY_LENGTH_MINUTES as u64) as u32;
    }
}
