//! Probability primitives.
//!
//! Every stochastic outcome in the game is composed from the four functions
//! in this module (`one_in`, `x_in_y`, `round_stochastic`, `binomial`) plus
//! the two range helpers. They draw from a [`RandomSource`] handle that is
//! passed in explicitly, so a seeded or rigged source makes any encounter
//! reproducible.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Source of uniform draws consumed by the probability primitives.
///
/// Every `rand::Rng` is a `RandomSource`. Tests can substitute [`Rigged`]
/// to force branches.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `lo..=hi`. Callers guarantee `lo <= hi`.
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        self.gen_range(lo..=hi)
    }
}

/// Returns true with a probability of `1/x`. `x <= 1` is always true.
pub fn one_in(rng: &mut impl RandomSource, x: u32) -> bool {
    x <= 1 || rng.int_inclusive(1, x as i64) == 1
}

/// Returns true with a probability of `x/y`. Works with fractional values.
pub fn x_in_y(rng: &mut impl RandomSource, x: f64, y: f64) -> bool {
    rng.next_f64() * y < x
}

/// Randomly rounds a value up or down based on its fractional part.
///
/// 5.3 rounds to 6 with probability 0.3 and to 5 otherwise. For negative
/// values the fraction is measured from the ceiling, so -5.3 rounds up to -5
/// with probability 0.3 and down to -6 otherwise.
pub fn round_stochastic(rng: &mut impl RandomSource, value: f64) -> i64 {
    let low = value.floor();
    let high = value.ceil();
    if value < 0.0 {
        if rng.next_f64() < high - value {
            return high as i64;
        }
        low as i64
    } else {
        if rng.next_f64() < value - low {
            return high as i64;
        }
        low as i64
    }
}

/// Counts successes out of `num` independent trials, each succeeding with
/// probability `x/y`.
pub fn binomial(rng: &mut impl RandomSource, num: u32, x: f64, y: f64) -> u32 {
    if x == 1.0 && y.fract() == 0.0 && y >= 0.0 && y <= u32::MAX as f64 {
        let y = y as u32;
        (0..num).filter(|_| one_in(rng, y)).count() as u32
    } else {
        (0..num).filter(|_| x_in_y(rng, x, y)).count() as u32
    }
}

/// Uniform float in `[lo, hi)`.
pub fn uniform(rng: &mut impl RandomSource, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * rng.next_f64()
}

/// Uniform integer in `lo..=hi`. Swapped bounds are reordered.
pub fn int_range(rng: &mut impl RandomSource, lo: i64, hi: i64) -> i64 {
    if lo <= hi {
        rng.int_inclusive(lo, hi)
    } else {
        rng.int_inclusive(hi, lo)
    }
}

/// Picks one element uniformly. Returns `None` for an empty slice.
pub fn choose<'a, T>(rng: &mut impl RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = rng.int_inclusive(0, items.len() as i64 - 1) as usize;
    items.get(index)
}

/// An `x`-in-`y` probability as written in the data files (`[x, y]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Chance {
    pub x: f64,
    pub y: f64,
}

impl Chance {
    pub const CERTAIN: Chance = Chance { x: 1.0, y: 1.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn one_in(y: u32) -> Self {
        Self { x: 1.0, y: y as f64 }
    }

    pub fn roll(&self, rng: &mut impl RandomSource) -> bool {
        x_in_y(rng, self.x, self.y)
    }
}

impl Default for Chance {
    fn default() -> Self {
        Self::CERTAIN
    }
}

/// Which end of the requested range a [`Rigged`] source returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pin {
    Low,
    High,
}

/// Deterministic random source.
///
/// Integer draws always return the pinned end of the range and float draws
/// always return `float`. With `Pin::High`, `one_in(x)` is false for every
/// `x > 1`; with a float of `0.0`, `x_in_y(x, y)` is true for every `x > 0`.
#[derive(Debug, Clone)]
pub struct Rigged {
    pub float: f64,
    pub pin: Pin,
}

impl Rigged {
    pub fn new(float: f64, pin: Pin) -> Self {
        Self {
            float: float.clamp(0.0, 1.0 - f64::EPSILON),
            pin,
        }
    }

    /// Every `one_in(x > 1)` fails and every `x_in_y(x > 0, y)` succeeds.
    pub fn lucky() -> Self {
        Self::new(0.0, Pin::High)
    }

    /// Every `one_in` succeeds and every `x_in_y(x < y, y)` fails.
    pub fn unlucky() -> Self {
        Self::new(1.0, Pin::Low)
    }
}

impl RandomSource for Rigged {
    fn next_f64(&mut self) -> f64 {
        self.float
    }

    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        match self.pin {
            Pin::Low => lo,
            Pin::High => hi,
        }
    }
}
