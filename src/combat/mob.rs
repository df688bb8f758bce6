//! Mob templates, combat instances and the spawn table.

use crate::core::chance::{Chance, RandomSource};
use crate::core::error::GameError;
use crate::core::weighted::WeightedList;
use crate::items::DeathDrop;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobBehavior {
    /// Never attacks, may run away when hit.
    Passive,
    /// Fights back once attacked.
    Neutral,
    /// May strike before the player acts.
    Hostile,
}

impl MobBehavior {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "passive" => Some(MobBehavior::Passive),
            "neutral" => Some(MobBehavior::Neutral),
            "hostile" => Some(MobBehavior::Hostile),
            _ => None,
        }
    }
}

/// Replaces a freshly spawned mob with another type, e.g. a Baby Zombie
/// becoming a Chicken Jockey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub mob: String,
    pub chance: Chance,
}

/// Static template loaded from `mobs.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobType {
    pub name: String,
    /// Spawn weight. Always 0 for types that do not spawn naturally.
    pub weight: f64,
    pub max_hp: i32,
    pub behavior: MobBehavior,
    /// Present for every non-passive type. For exploding mobs this bounds
    /// the explosion damage.
    pub attack_strength: Option<f64>,
    pub death_drops: Vec<DeathDrop>,
    pub spawns_naturally: bool,
    pub explodes: bool,
    pub explosion_power: u32,
    pub evasive: bool,
    pub variant: Option<Variant>,
    /// Rolled once when the mob is first met.
    pub encounter_drops: Vec<DeathDrop>,
}

impl MobType {
    pub fn attack(&self) -> f64 {
        self.attack_strength.unwrap_or(0.0)
    }
}

/// A mob in an ongoing encounter. Drops and tags are read from its type.
#[derive(Debug, Clone)]
pub struct Mob<'a> {
    pub kind: &'a MobType,
    pub hp: i32,
}

impl<'a> Mob<'a> {
    pub fn new(kind: &'a MobType) -> Self {
        Self {
            kind,
            hp: kind.max_hp,
        }
    }

    pub fn name(&self) -> &str {
        &self.kind.name
    }

    pub fn is_passive(&self) -> bool {
        self.kind.behavior == MobBehavior::Passive
    }

    pub fn is_hostile(&self) -> bool {
        self.kind.behavior == MobBehavior::Hostile
    }

    pub fn attack_strength(&self) -> f64 {
        self.kind.attack()
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Returns true when the hit killed the mob.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        self.is_dead()
    }
}

/// Every known mob type plus the weighted table of natural spawns.
#[derive(Debug, Clone, Default)]
pub struct Bestiary {
    types: BTreeMap<String, MobType>,
    spawns: WeightedList<String>,
}

impl Bestiary {
    /// Builds the registry. Types are added to the spawn table in the order
    /// given.
    pub fn new(types: Vec<MobType>) -> Self {
        let mut spawns = WeightedList::new();
        for kind in &types {
            if kind.spawns_naturally {
                spawns.add(kind.name.clone(), kind.weight);
            }
        }
        let types = types.into_iter().map(|t| (t.name.clone(), t)).collect();
        Self { types, spawns }
    }

    pub fn get(&self, name: &str) -> Result<&MobType, GameError> {
        self.types
            .get(name)
            .ok_or_else(|| GameError::UnknownMob(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MobType> {
        self.types.values()
    }

    pub fn spawn_table(&self) -> &WeightedList<String> {
        &self.spawns
    }

    pub fn new_mob(&self, name: &str) -> Result<Mob<'_>, GameError> {
        self.get(name).map(Mob::new)
    }

    /// Samples a naturally spawning type, then rolls its variant.
    pub fn spawn(&self, rng: &mut impl RandomSource) -> Result<Mob<'_>, GameError> {
        let name = self.spawns.pick(rng)?;
        let kind = self.get(name)?;
        self.substitute(kind, rng).map(Mob::new)
    }

    /// Applies the type's variant substitution, if it rolls.
    pub fn substitute<'a>(
        &'a self,
        kind: &'a MobType,
        rng: &mut impl RandomSource,
    ) -> Result<&'a MobType, GameError> {
        match &kind.variant {
            Some(variant) if variant.chance.roll(rng) => {
                log::debug!("{} became a {}", kind.name, variant.mob);
                self.get(&variant.mob)
            }
            _ => Ok(kind),
        }
    }
}
