//! Experience and the leveling curve.

use crate::core::chance::{round_stochastic, RandomSource};
use serde::{Deserialize, Serialize};

/// Total EXP needed to reach the level after `level`.
///
/// Piecewise quadratic: `level² + 6·level` up to level 16, then
/// `2.5·level² − 40.5·level + 360` below 32, then
/// `4.5·level² − 160.5·level + 2220`.
pub fn exp_required_for_level(level: u32) -> u64 {
    let l = level as f64;
    if level <= 16 {
        (level as u64).pow(2) + 6 * level as u64
    } else if level < 32 {
        (2.5 * l * l - 40.5 * l + 360.0).round() as u64
    } else {
        (4.5 * l * l - 160.5 * l + 2220.0).round() as u64
    }
}

/// Result of one `gain_exp` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpGain {
    pub gained: u64,
    pub old_level: u32,
    pub new_level: u32,
    pub total: u64,
    pub next_threshold: u64,
}

impl ExpGain {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// Accumulated experience and the level derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    exp: u64,
    level: u32,
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exp(&self) -> u64 {
        self.exp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// EXP needed for the next level.
    pub fn next_threshold(&self) -> u64 {
        exp_required_for_level(self.level)
    }

    /// Adds EXP after stochastic rounding and processes every level reached.
    ///
    /// Returns `None` when the rounded amount is not positive.
    pub fn gain_exp(&mut self, amount: f64, rng: &mut impl RandomSource) -> Option<ExpGain> {
        let rounded = round_stochastic(rng, amount);
        if rounded <= 0 {
            return None;
        }
        let old_level = self.level;
        self.exp += rounded as u64;
        while exp_required_for_level(self.level) <= self.exp {
            self.level += 1;
        }
        if self.level > old_level {
            log::debug!("level {} -> {} at {} exp", old_level, self.level, self.exp);
        }
        Some(ExpGain {
            gained: rounded as u64,
            old_level,
            new_level: self.level,
            total: self.exp,
            next_threshold: self.next_threshold(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chance::{Pin, Rigged};

    #[test]
    fn test_exp_required_low_levels() {
        assert_eq!(exp_required_for_level(0), 0);
        assert_eq!(exp_required_for_level(1), 7);
        assert_eq!(exp_required_for_level(2), 16);
        assert_eq!(exp_required_for_level(16), 352);
    }

    #[test]
    fn test_exp_required_middle_band() {
        // 2.5*289 - 40.5*17 + 360 = 722.5 - 688.5 + 360 = 394
        assert_eq!(exp_required_for_level(17), 394);
        // 2.5*961 - 40.5*31 + 360 = 2402.5 - 1255.5 + 360 = 1507
        assert_eq!(exp_required_for_level(31), 1507);
    }

    #[test]
    fn test_exp_required_high_band() {
        // 4.5*1024 - 160.5*32 + 2220 = 4608 - 5136 + 2220 = 1692
        assert_eq!(exp_required_for_level(32), 1692);
        // 4.5*1089 - 160.5*33 + 2220 = 4900.5 - 5296.5 + 2220 = 1824
        assert_eq!(exp_required_for_level(33), 1824);
    }

    #[test]
    fn test_exp_required_non_decreasing() {
        let mut prev = exp_required_for_level(0);
        for level in 1..200 {
            let next = exp_required_for_level(level);
            assert!(next >= prev, "level {level}: {next} < {prev}");
            prev = next;
        }
    }

    #[test]
    fn test_gain_exp_single_level() {
        let mut rng = Rigged::new(0.0, Pin::Low);
        let mut p = Progression::new();
        let gain = p.gain_exp(7.0, &mut rng).unwrap();
        assert_eq!(gain.gained, 7);
        // Level 0 needs 0 and level 1 needs 7, so 7 exp is level 2.
        assert_eq!(p.level(), 2);
        assert!(gain.leveled_up());
    }

    #[test]
    fn test_gain_exp_multi_level_jump() {
        let mut rng = Rigged::new(0.0, Pin::Low);
        let mut p = Progression::new();
        p.gain_exp(1000.0, &mut rng).unwrap();
        let level = p.level();
        assert!(exp_required_for_level(level) > 1000);
        assert!(exp_required_for_level(level - 1) <= 1000);
    }

    #[test]
    fn test_gain_exp_non_positive_ignored() {
        let mut rng = Rigged::new(0.9, Pin::Low);
        let mut p = Progression::new();
        assert_eq!(p.gain_exp(0.0, &mut rng), None);
        assert_eq!(p.gain_exp(-3.0, &mut rng), None);
        // 0.4 rounds down when the roll is 0.9.
        assert_eq!(p.gain_exp(0.4, &mut rng), None);
        assert_eq!(p.exp(), 0);
    }

    #[test]
    fn test_level_matches_threshold_invariant() {
        let mut rng = Rigged::new(0.5, Pin::Low);
        let mut p = Progression::new();
        for amount in [3.0, 11.0, 40.0, 2.0, 300.0, 900.0] {
            p.gain_exp(amount, &mut rng);
            let level = p.level();
            assert!(exp_required_for_level(level) > p.exp());
            if level > 0 {
                assert!(exp_required_for_level(level - 1) <= p.exp());
            }
        }
    }
}
