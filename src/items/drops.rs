//! Death-drop tables and their resolution.

use crate::core::chance::{choose, int_range, Chance, RandomSource};
use crate::core::constants::EXP_ITEM;
use serde::{Deserialize, Serialize};

/// The item an entry grants: a single name, or alternatives picked uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DropItem {
    One(String),
    AnyOf(Vec<String>),
}

/// A fixed amount, or an inclusive `[lo, hi]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Fixed(i64),
    Range(i64, i64),
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Fixed(1)
    }
}

impl Quantity {
    pub fn roll(&self, rng: &mut impl RandomSource) -> i64 {
        match *self {
            Quantity::Fixed(n) => n,
            Quantity::Range(lo, hi) => int_range(rng, lo, hi),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathDrop {
    pub item: DropItem,
    #[serde(default)]
    pub quantity: Quantity,
    #[serde(default)]
    pub chance: Chance,
}

impl DeathDrop {
    pub fn new(item: &str, quantity: Quantity, chance: Chance) -> Self {
        Self {
            item: DropItem::One(item.to_string()),
            quantity,
            chance,
        }
    }
}

/// Everything one resolution granted, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Loot {
    pub items: Vec<(String, u32)>,
    pub exp: Vec<u32>,
}

impl Loot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.exp.is_empty()
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items
            .iter()
            .filter(|(name, _)| name == item)
            .map(|(_, n)| *n)
            .sum()
    }

    fn push_item(&mut self, item: &str, amount: u32) {
        match self.items.iter_mut().find(|(name, _)| name == item) {
            Some((_, n)) => *n += amount,
            None => self.items.push((item.to_string(), amount)),
        }
    }
}

/// Rolls every entry independently.
///
/// Per entry: pick the item, roll the quantity, then roll the chance only
/// when the quantity is positive. `"EXP"` entries go to `Loot::exp`.
pub fn roll_drops(drops: &[DeathDrop], rng: &mut impl RandomSource) -> Loot {
    let mut loot = Loot::default();
    for drop in drops {
        let item = match &drop.item {
            DropItem::One(name) => name.as_str(),
            DropItem::AnyOf(names) => match choose(rng, names) {
                Some(name) => name.as_str(),
                None => continue,
            },
        };
        let amount = drop.quantity.roll(rng);
        if amount <= 0 || !drop.chance.roll(rng) {
            continue;
        }
        let amount = amount.min(u32::MAX as i64) as u32;
        if item == EXP_ITEM {
            loot.exp.push(amount);
        } else {
            loot.push_item(item, amount);
        }
    }
    log::trace!("rolled {} drop entries -> {:?}", drops.len(), loot);
    loot
}
