//! Timed status effects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub level: u32,
    /// Seconds remaining.
    pub duration: f64,
}

/// Active effects keyed by name.
///
/// A `BTreeMap` keeps iteration order stable so effect ticks consume the
/// random source in the same order every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    active: BTreeMap<String, StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level of the named effect, 0 when inactive.
    pub fn level(&self, name: &str) -> u32 {
        self.active.get(name).map_or(0, |e| e.level)
    }

    pub fn get(&self, name: &str) -> Option<&StatusEffect> {
        self.active.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatusEffect)> {
        self.active.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stores an effect. A stronger level replaces level and duration; an
    /// equal or weaker level while active changes nothing.
    ///
    /// Returns whether the effect was stored.
    pub fn apply(&mut self, name: &str, level: u32, duration: f64) -> bool {
        if level == 0 || duration <= 0.0 {
            return false;
        }
        match self.active.get_mut(name) {
            Some(current) if level > current.level => {
                current.level = level;
                current.duration = duration;
                true
            }
            Some(_) => false,
            None => {
                self.active
                    .insert(name.to_string(), StatusEffect { level, duration });
                true
            }
        }
    }

    /// Counts every effect down by `secs` and removes the expired ones.
    /// Returns the names that expired.
    pub fn advance(&mut self, secs: f64) -> Vec<String> {
        let mut expired = Vec::new();
        for (name, effect) in self.active.iter_mut() {
            effect.duration -= secs;
            if effect.duration <= 0.0 {
                expired.push(name.clone());
            }
        }
        for name in &expired {
            self.active.remove(name);
        }
        expired
    }
}

/// Ticks between poison hits at a given level: `max(1, 25 / 2^level)`.
pub fn poison_rate(level: u32) -> u32 {
    25u32.checked_shr(level).unwrap_or(0).max(1)
}
