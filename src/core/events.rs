//! Events emitted by the engine and the decision points it asks about.
//!
//! The engine never prints. Every observable outcome is pushed as a
//! [`GameEvent`]; every player decision is a [`Menu`] handed to a
//! [`Frontend`]. A terminal, a test script or a replay tool can sit behind
//! the trait.

use super::error::GameError;
use crate::combat::Location;
use crate::items::Condition;
use std::fmt;

/// How an event should be emphasised when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Good,
    Bad,
    Warning,
}

/// A tool durability readout, e.g. `12/59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durability {
    pub current: i32,
    pub max: i32,
}

impl Durability {
    pub fn condition(&self) -> Condition {
        Condition::of(self.current, self.max)
    }
}

impl fmt::Display for Durability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // ── Status ──────────────────────────────────────────────────
    Health { hp: i32 },
    Hunger { hunger: i32 },
    Wielding { weapon: String, durability: Durability },

    // ── Player vitals ───────────────────────────────────────────
    TookDamage { amount: i32 },
    Healed { amount: i32 },
    ExpGained { amount: u64, total: u64, next_threshold: u64 },
    LevelUp { level: u32 },
    EffectStarted { name: String, level: u32 },
    EffectExpired { name: String },
    Starving,
    Died { cause: Option<String>, score: u64 },

    // ── Items ───────────────────────────────────────────────────
    ItemsGained { items: Vec<(String, u32)> },
    ExplosionLoot { items: Vec<(String, u32)> },
    ToolDurability { durability: Durability },
    ToolBroken { tool: String },
    Switched { weapon: Option<String> },
    Crafted { item: String, quantity: u32 },
    NothingToCraft,
    Ate { food: String },
    NothingToEat,
    InventoryListing {
        items: Vec<(String, u32)>,
        tools: Vec<(String, Durability)>,
    },

    // ── Encounters ──────────────────────────────────────────────
    Encounter { mob: String, location: Location, hostile: bool },
    MobAttacks { mob: String },
    PlayerMissed { mob: String },
    MobTeleported { mob: String },
    FleeingMiss { mob: String, style: usize },
    PlayerHit { mob: String, critical: bool },
    MobDied { mob: String },
    MobFlees { mob: String },
    MobStopsRunning { mob: String },
    Flashes { mob: String },
    Explodes { mob: String },

    // ── Actions ─────────────────────────────────────────────────
    Explored,
    Found { item: String, amount: u32 },
    Mining,
    NothingOfValue,
    NeedPickaxe,
}

/// Number of distinct phrasings for a miss against a fleeing mob.
pub const FLEEING_MISS_STYLES: usize = 5;

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => "an",
        _ => "a",
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[(String, u32)]) -> fmt::Result {
    for (i, (item, amount)) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}x {}", amount, item)?;
    }
    Ok(())
}

impl GameEvent {
    pub fn tone(&self) -> Tone {
        use GameEvent::*;
        match self {
            TookDamage { .. } | MobAttacks { .. } | ToolBroken { .. } | Died { .. } | Explodes { .. } => {
                Tone::Bad
            }
            Healed { .. } | LevelUp { .. } | MobDied { .. } => Tone::Good,
            Starving | Flashes { .. } | EffectStarted { .. } => Tone::Warning,
            Encounter { hostile: true, .. } => Tone::Warning,
            ToolDurability { durability } | Wielding { durability, .. } => {
                match durability.condition() {
                    Condition::Good => Tone::Good,
                    Condition::Worn => Tone::Warning,
                    Condition::Critical => Tone::Bad,
                }
            }
            _ => Tone::Plain,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GameEvent::*;
        match self {
            Health { hp } => write!(f, "HP: {}/{}", hp, super::constants::MAX_HP),
            Hunger { hunger } => write!(f, "Hunger: {}/{}", hunger, super::constants::MAX_HUNGER),
            Wielding { weapon, durability } => {
                write!(f, "Current weapon: {} - Durability {}", weapon, durability)
            }
            TookDamage { amount } => write!(f, "You take {} damage!", amount),
            Healed { amount } => write!(f, "You are healed by {} HP.", amount),
            ExpGained {
                amount,
                total,
                next_threshold,
            } => write!(f, "+{} EXP\nCurrent EXP: {}/{}", amount, total, next_threshold),
            LevelUp { level } => write!(f, "You have reached level {}!", level),
            EffectStarted { name, level } => write!(f, "You are affected by {} {}.", name, level),
            EffectExpired { name } => write!(f, "{} has worn off.", name),
            Starving => write!(f, "You are starving!"),
            Died { cause, score } => {
                writeln!(f, "You died!")?;
                if let Some(cause) = cause {
                    writeln!(f, "{}", cause)?;
                }
                write!(f, "\nScore: {}", score)
            }
            ItemsGained { items } => {
                writeln!(f, "You got:")?;
                write_items(f, items)
            }
            ExplosionLoot { items } => {
                writeln!(f, "You got the following items from the explosion:")?;
                write_items(f, items)
            }
            ToolDurability { durability } => write!(f, "Durability: {}", durability),
            ToolBroken { tool } => write!(f, "Your {} is destroyed!", tool),
            Switched { weapon: Some(w) } => write!(f, "You switch to your {}", w),
            Switched { weapon: None } => write!(f, "You decide to go unarmed"),
            Crafted { item, quantity } => write!(f, "You have crafted {}x {}", quantity, item),
            NothingToCraft => write!(f, "There are no items that you have the components to craft"),
            Ate { food } => write!(f, "You eat the {}.", food.to_lowercase()),
            NothingToEat => write!(f, "You have nothing to eat"),
            InventoryListing { items, tools } => {
                if items.is_empty() && tools.is_empty() {
                    return write!(f, "There is nothing in your inventory");
                }
                writeln!(f, "Your inventory:")?;
                write_items(f, items)?;
                if !tools.is_empty() {
                    write!(f, "\nYour tools:")?;
                    for (i, (name, durability)) in tools.iter().enumerate() {
                        write!(f, "\n{}. {} - Durability {}", i + 1, name, durability)?;
                    }
                }
                Ok(())
            }
            Encounter {
                mob,
                location,
                hostile,
            } => {
                let mob = mob.to_lowercase();
                write!(
                    f,
                    "You found {} {} while {}{}",
                    article(&mob),
                    mob,
                    location.verb(),
                    if *hostile { "!" } else { "." }
                )
            }
            MobAttacks { mob } => write!(f, "The {} attacks you!", mob.to_lowercase()),
            PlayerMissed { mob } => write!(f, "You swing at the {} but miss.", mob.to_lowercase()),
            MobTeleported { mob } => write!(
                f,
                "You swing at the {} but it teleports away.",
                mob.to_lowercase()
            ),
            FleeingMiss { mob, style } => {
                let mob = mob.to_lowercase();
                match style % FLEEING_MISS_STYLES {
                    0 => write!(f, "You try to attack the {} while it was fleeing, and miss.", mob),
                    1 => write!(f, "You swing at the {}, but miss as it was running away too fast.", mob),
                    2 => write!(f, "The {} was fleeing too quickly, you miss!", mob),
                    3 => write!(f, "You swing at the {}, and miss narrowly.", mob),
                    _ => write!(f, "You try to attack the {} while it was running away, and miss.", mob),
                }
            }
            PlayerHit { mob, critical } => write!(
                f,
                "You attack the {}.{}",
                mob.to_lowercase(),
                if *critical { " Critical!" } else { "" }
            ),
            MobDied { mob } => write!(f, "The {} is dead!", mob.to_lowercase()),
            MobFlees { mob } => write!(f, "The {} starts running away.", mob.to_lowercase()),
            MobStopsRunning { mob } => write!(f, "The {} stops running.", mob.to_lowercase()),
            Flashes { mob } => write!(f, "The {} flashes...", mob.to_lowercase()),
            Explodes { mob } => write!(f, "The {} explodes!", mob.to_lowercase()),
            Explored => write!(f, "You explore for a while."),
            Found { item, amount } => write!(f, "You found {}x {}", amount, item),
            Mining => write!(f, "Mining..."),
            NothingOfValue => write!(f, "You didn't find much of value"),
            NeedPickaxe => write!(f, "You need to switch to a pickaxe to mine"),
        }
    }
}

/// One selectable entry of a [`Menu`].
#[derive(Debug, Clone, PartialEq)]
pub enum MenuOption {
    Attack,
    Flee,
    Ignore,
    Explore,
    Inventory,
    Craft,
    SwitchWeapon,
    Eat,
    Mine,
    Quit,
    Yes,
    No,
    Cancel,
    Tool { name: String, durability: Durability },
    Unarmed,
    Recipe { name: String, quantity: u32, components: Vec<(String, u32)> },
    Food { name: String, held: u32 },
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MenuOption::*;
        match self {
            Attack => write!(f, "Attack"),
            Flee => write!(f, "Flee"),
            Ignore => write!(f, "Ignore"),
            Explore => write!(f, "Explore"),
            Inventory => write!(f, "Inventory"),
            Craft => write!(f, "Craft"),
            SwitchWeapon => write!(f, "Switch Weapon"),
            Eat => write!(f, "Eat"),
            Mine => write!(f, "Mine"),
            Quit => write!(f, "Quit"),
            Yes => write!(f, "Yes"),
            No => write!(f, "No"),
            Cancel => write!(f, "Cancel"),
            Tool { name, durability } => write!(f, "{} - Durability {}", name, durability),
            Unarmed => write!(f, "Unarmed"),
            Recipe {
                name,
                quantity,
                components,
            } => {
                write!(f, "{}x {} | Components: ", quantity, name)?;
                for (i, (item, count)) in components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}x {}", count, item)?;
                }
                Ok(())
            }
            Food { name, held } => write!(f, "{} ({} held)", name, held),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub prompt: Option<String>,
    pub options: Vec<MenuOption>,
}

impl Menu {
    pub fn new(options: Vec<MenuOption>) -> Self {
        Self {
            prompt: None,
            options,
        }
    }

    pub fn with_prompt(prompt: impl Into<String>, options: Vec<MenuOption>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            options,
        }
    }

    pub fn yes_no(prompt: impl Into<String>) -> Self {
        Self::with_prompt(prompt, vec![MenuOption::Yes, MenuOption::No])
    }
}

/// Presentation boundary between the engine and whatever shows it.
pub trait Frontend {
    /// Renders events in the order they happened.
    fn present(&mut self, events: &[GameEvent]);

    /// Returns the 0-based index of the chosen option.
    fn choose(&mut self, menu: &Menu) -> usize;
}

/// Pending events plus the frontend they are flushed to.
///
/// Events accumulate in `log` and are presented right before the next
/// decision, or when [`Dialogue::flush`] is called.
pub struct Dialogue<'f> {
    frontend: &'f mut dyn Frontend,
    pub log: Vec<GameEvent>,
}

impl<'f> Dialogue<'f> {
    pub fn new(frontend: &'f mut dyn Frontend) -> Self {
        Self {
            frontend,
            log: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.log.push(event);
    }

    pub fn flush(&mut self) {
        if !self.log.is_empty() {
            self.frontend.present(&self.log);
            self.log.clear();
        }
    }

    /// Flushes pending events, then asks. Returns the chosen option.
    pub fn ask(&mut self, menu: &Menu) -> Result<MenuOption, GameError> {
        self.flush();
        let index = self.frontend.choose(menu);
        menu.options
            .get(index)
            .cloned()
            .ok_or(GameError::InvalidChoice {
                index,
                options: menu.options.len(),
            })
    }
}
