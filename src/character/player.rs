//! The player character: vitals, belongings, clock and active effects.

use super::effects::{poison_rate, StatusEffects};
use super::progression::{ExpGain, Progression};
use crate::core::chance::{round_stochastic, RandomSource};
use crate::core::constants::*;
use crate::core::error::GameError;
use crate::core::events::{Durability, GameEvent};
use crate::core::time::GameTime;
use crate::items::{Food, Inventory, Recipe, Tool};

const STARVATION_DEATH_CAUSE: &str = "Starved to death";

#[derive(Debug, Clone)]
pub struct Player {
    pub hp: i32,
    pub hunger: i32,
    pub saturation: f64,
    pub exhaustion: f64,
    pub inventory: Inventory,
    pub tools: Vec<Tool>,
    /// Index into `tools`, `None` when unarmed.
    pub equipped: Option<usize>,
    pub progression: Progression,
    pub time: GameTime,
    pub ticks: u64,
    pub effects: StatusEffects,
    /// Set once HP drops to zero. The inner value is the cause, if known.
    pub death: Option<Option<String>>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            hp: MAX_HP,
            hunger: MAX_HUNGER,
            saturation: STARTING_SATURATION,
            exhaustion: 0.0,
            inventory: Inventory::new(),
            tools: Vec::new(),
            equipped: None,
            progression: Progression::new(),
            time: GameTime::new(),
            ticks: 0,
            effects: StatusEffects::new(),
            death: None,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    pub fn death_cause(&self) -> Option<&str> {
        self.death.as_ref().and_then(|c| c.as_deref())
    }

    pub fn exp(&self) -> u64 {
        self.progression.exp()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn score(&self) -> u64 {
        self.exp()
    }

    // ── Health ──────────────────────────────────────────────────

    /// Deals damage. Non-positive amounts are ignored.
    ///
    /// Physical damage also tires the player. Returns true if this hit was
    /// fatal.
    pub fn damage(
        &mut self,
        amount: i32,
        cause: Option<&str>,
        physical: bool,
        log: &mut Vec<GameEvent>,
    ) -> bool {
        if amount <= 0 || self.is_dead() {
            return false;
        }
        self.hp -= amount;
        log.push(GameEvent::TookDamage { amount });
        if physical {
            self.add_exhaustion(EXHAUSTION_PHYSICAL_DAMAGE);
        }
        log.push(GameEvent::Health { hp: self.hp.max(0) });
        if self.hp <= 0 {
            log::debug!("player died: {:?}", cause);
            self.death = Some(cause.map(str::to_string));
            return true;
        }
        false
    }

    /// Heals up to `MAX_HP`. Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32, log: &mut Vec<GameEvent>) -> i32 {
        if amount <= 0 || self.is_dead() {
            return 0;
        }
        let old = self.hp;
        self.hp = (self.hp + amount).min(MAX_HP);
        let healed = self.hp - old;
        if healed > 0 {
            log.push(GameEvent::Healed { amount: healed });
            log.push(GameEvent::Health { hp: self.hp });
        }
        healed
    }

    // ── Hunger ──────────────────────────────────────────────────

    /// Accumulates exhaustion. Every full point drains saturation first,
    /// then hunger.
    pub fn add_exhaustion(&mut self, amount: f64) {
        if amount <= 0.0 || !amount.is_finite() {
            return;
        }
        self.exhaustion += amount;
        while self.exhaustion >= EXHAUSTION_PER_POINT {
            self.exhaustion -= EXHAUSTION_PER_POINT;
            if self.saturation > 0.0 {
                self.saturation = (self.saturation - 1.0).max(0.0);
            } else {
                self.hunger = (self.hunger - 1).max(0);
            }
        }
    }

    /// Eats one of `name`, restoring hunger and saturation and rolling the
    /// food's effects.
    pub fn eat(
        &mut self,
        name: &str,
        food: &Food,
        rng: &mut impl RandomSource,
        log: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        self.inventory.remove(name, 1)?;
        self.hunger = (self.hunger + food.hunger).clamp(0, MAX_HUNGER);
        self.saturation = (self.saturation + food.saturation).clamp(0.0, self.hunger as f64);
        log.push(GameEvent::Ate {
            food: name.to_string(),
        });
        log.push(GameEvent::Hunger {
            hunger: self.hunger,
        });
        for effect in &food.effects {
            if effect.chance.roll(rng) {
                self.apply_status_effect(&effect.name, effect.level, effect.duration, log);
            }
        }
        Ok(())
    }

    // ── Experience ──────────────────────────────────────────────

    pub fn gain_exp(
        &mut self,
        amount: f64,
        rng: &mut impl RandomSource,
        log: &mut Vec<GameEvent>,
    ) -> Option<ExpGain> {
        let gain = self.progression.gain_exp(amount, rng)?;
        log.push(GameEvent::ExpGained {
            amount: gain.gained,
            total: gain.total,
            next_threshold: gain.next_threshold,
        });
        if gain.leveled_up() {
            log.push(GameEvent::LevelUp {
                level: gain.new_level,
            });
        }
        Some(gain)
    }

    // ── Status effects ──────────────────────────────────────────

    /// Applies an effect. Instant effects resolve now and are not stored.
    pub fn apply_status_effect(
        &mut self,
        name: &str,
        level: u32,
        duration: f64,
        log: &mut Vec<GameEvent>,
    ) {
        match name {
            INSTANT_DAMAGE => {
                self.damage(instant_amount(3, level), Some(MAGIC_DEATH_CAUSE), false, log);
            }
            INSTANT_HEALTH => {
                self.heal(instant_amount(2, level), log);
            }
            _ => {
                if self.effects.apply(name, level, duration) {
                    log.push(GameEvent::EffectStarted {
                        name: name.to_string(),
                        level,
                    });
                }
            }
        }
    }

    /// Advances the clock and counts effect durations down.
    pub fn advance_time(&mut self, secs: f64, log: &mut Vec<GameEvent>) {
        self.time.advance(secs);
        for name in self.effects.advance(secs) {
            log.push(GameEvent::EffectExpired { name });
        }
    }

    /// One half-second step.
    ///
    /// Regenerates 1 HP every 4th tick outside battle, applies Poison and
    /// Hunger, starves at zero hunger, then advances time.
    pub fn tick(&mut self, in_battle: bool, rng: &mut impl RandomSource, log: &mut Vec<GameEvent>) {
        self.ticks += 1;
        if self.hp < MAX_HP && self.ticks % REGEN_TICK_INTERVAL == 0 && !in_battle {
            self.heal(1, log);
        }

        let poison = self.effects.level(POISON);
        if poison > 0 {
            let rate = poison_rate(poison) as f64;
            let amount = round_stochastic(rng, POISON_DAMAGE / rate).min((self.hp - 1) as i64);
            // Poison stops at 1 HP.
            self.damage(amount as i32, None, false, log);
        }

        let hunger_effect = self.effects.level(HUNGER_EFFECT);
        if hunger_effect > 0 {
            self.add_exhaustion(EXHAUSTION_HUNGER_EFFECT_PER_LEVEL * hunger_effect as f64);
        }

        if self.hunger == 0 && self.ticks % STARVE_TICK_INTERVAL == 0 && self.hp > 1 {
            log.push(GameEvent::Starving);
            self.damage(1, Some(STARVATION_DEATH_CAUSE), false, log);
        }

        self.advance_time(TICK_SECONDS, log);
    }

    // ── Items and tools ─────────────────────────────────────────

    pub fn add_item(&mut self, item: &str, amount: u32) {
        self.inventory.add(item, amount);
    }

    pub fn remove_item(&mut self, item: &str, amount: u32) -> Result<(), GameError> {
        self.inventory.remove(item, amount)
    }

    pub fn has_item(&self, item: &str, amount: u32) -> bool {
        self.inventory.has(item, amount)
    }

    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    pub fn weapon(&self) -> Option<&Tool> {
        self.equipped.and_then(|i| self.tools.get(i))
    }

    pub fn has_pickaxe(&self) -> bool {
        self.tools.iter().any(Tool::is_pickaxe)
    }

    /// Equips the tool at `slot`, or goes unarmed with `None`.
    pub fn equip(&mut self, slot: Option<usize>) -> Result<(), GameError> {
        if let Some(i) = slot {
            if i >= self.tools.len() {
                return Err(GameError::NoSuchTool(i));
            }
        }
        self.equipped = slot;
        Ok(())
    }

    pub fn attack_damage(&self) -> i32 {
        self.weapon().map_or(UNARMED_DAMAGE, |t| t.damage)
    }

    pub fn attack_speed(&self) -> f64 {
        self.weapon().map_or(UNARMED_ATTACK_SPEED, |t| t.attack_speed)
    }

    /// Wears the equipped tool by one point. A tool below zero durability
    /// is destroyed and the player is left unarmed.
    pub fn decrement_tool_durability(&mut self, log: &mut Vec<GameEvent>) {
        let Some(slot) = self.equipped else {
            return;
        };
        let Some(tool) = self.tools.get_mut(slot) else {
            self.equipped = None;
            return;
        };
        if tool.wear() {
            let tool = self.tools.remove(slot);
            self.equipped = None;
            log.push(GameEvent::ToolBroken { tool: tool.name });
        } else {
            log.push(GameEvent::ToolDurability {
                durability: Durability {
                    current: tool.durability,
                    max: tool.max_durability,
                },
            });
        }
    }

    pub fn can_make_recipe(&self, recipe: &Recipe) -> bool {
        recipe.affordable(&self.inventory)
    }
}

fn instant_amount(base: i32, level: u32) -> i32 {
    base.saturating_mul(1i32.checked_shl(level.min(30)).unwrap_or(i32::MAX))
}
