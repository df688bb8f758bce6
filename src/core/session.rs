//! The top-level game loop.
//!
//! A session owns the player and the random source and borrows the static
//! content. Each pass of the loop ticks the player, shows their status,
//! asks for an action and runs it, until the player quits or dies.

use super::chance::{int_range, one_in, x_in_y, RandomSource};
use super::constants::*;
use super::error::GameError;
use super::events::{Dialogue, Durability, Frontend, GameEvent, Menu, MenuOption};
use super::mining::{mining_exp, mining_quantity, mining_table, STONE};
use super::weighted::WeightedList;
use crate::character::Player;
use crate::combat::{random_encounter, switch_weapon, EncounterOutcome, Location};
use crate::data::GameData;
use crate::items::Tool;

/// How a session ended. Death is a result, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Quit { score: u64 },
    Died { cause: Option<String>, score: u64 },
}

impl SessionEnd {
    pub fn score(&self) -> u64 {
        match self {
            SessionEnd::Quit { score } | SessionEnd::Died { score, .. } => *score,
        }
    }
}

pub struct Session<'d, R> {
    pub player: Player,
    data: &'d GameData,
    rng: R,
}

impl<'d, R: RandomSource> Session<'d, R> {
    pub fn new(data: &'d GameData, rng: R) -> Self {
        Self::with_player(data, Player::new(), rng)
    }

    pub fn with_player(data: &'d GameData, player: Player, rng: R) -> Self {
        Self { player, data, rng }
    }

    pub fn data(&self) -> &GameData {
        self.data
    }

    /// Plays until the player quits or dies.
    pub fn run(&mut self, frontend: &mut dyn Frontend) -> Result<SessionEnd, GameError> {
        log::info!("session started");
        let mut dialogue = Dialogue::new(frontend);
        let end = loop {
            if let Some(end) = self.step(&mut dialogue)? {
                break end;
            }
        };
        dialogue.flush();
        log::info!("session ended: {:?}", end);
        Ok(end)
    }

    /// One pass of the main loop: tick, status, one action.
    pub fn step(&mut self, dialogue: &mut Dialogue<'_>) -> Result<Option<SessionEnd>, GameError> {
        self.player.tick(false, &mut self.rng, &mut dialogue.log);
        if let Some(end) = self.check_death(dialogue) {
            return Ok(Some(end));
        }
        self.status(dialogue);

        let choice = dialogue.ask(&Menu::new(self.actions()))?;
        log::trace!("action: {:?}", choice);
        match choice {
            MenuOption::Explore => self.explore(dialogue)?,
            MenuOption::Inventory => self.show_inventory(dialogue),
            MenuOption::Craft => self.craft(dialogue)?,
            MenuOption::SwitchWeapon => switch_weapon(&mut self.player, dialogue)?,
            MenuOption::Eat => self.eat(dialogue)?,
            MenuOption::Mine => self.mine(dialogue)?,
            MenuOption::Quit => {
                return Ok(Some(SessionEnd::Quit {
                    score: self.player.score(),
                }))
            }
            _ => {}
        }
        Ok(self.check_death(dialogue))
    }

    fn check_death(&self, dialogue: &mut Dialogue<'_>) -> Option<SessionEnd> {
        if !self.player.is_dead() {
            return None;
        }
        let cause = self.player.death_cause().map(str::to_string);
        let score = self.player.score();
        dialogue.emit(GameEvent::Died {
            cause: cause.clone(),
            score,
        });
        Some(SessionEnd::Died { cause, score })
    }

    fn status(&self, dialogue: &mut Dialogue<'_>) {
        dialogue.emit(GameEvent::Health { hp: self.player.hp });
        dialogue.emit(GameEvent::Hunger {
            hunger: self.player.hunger,
        });
        if let Some(weapon) = self.player.weapon() {
            dialogue.emit(GameEvent::Wielding {
                weapon: weapon.name.clone(),
                durability: durability(weapon),
            });
        }
    }

    /// Main-menu entries available right now.
    pub fn actions(&self) -> Vec<MenuOption> {
        let mut options = vec![MenuOption::Explore, MenuOption::Inventory, MenuOption::Craft];
        if !self.player.tools.is_empty() {
            options.push(MenuOption::SwitchWeapon);
        }
        if !self.held_foods().is_empty() {
            options.push(MenuOption::Eat);
        }
        if self.player.has_pickaxe() {
            options.push(MenuOption::Mine);
        }
        options.push(MenuOption::Quit);
        options
    }

    fn held_foods(&self) -> Vec<(String, u32)> {
        self.player
            .inventory
            .iter()
            .filter(|(item, _)| self.data.foods.contains(item))
            .map(|(item, n)| (item.to_string(), n))
            .collect()
    }

    // ── Explore ─────────────────────────────────────────────────

    pub fn explore(&mut self, dialogue: &mut Dialogue<'_>) -> Result<(), GameError> {
        dialogue.emit(GameEvent::Explored);
        let secs = int_range(&mut self.rng, EXPLORE_SECONDS_MIN, EXPLORE_SECONDS_MAX) as f64;
        self.player.add_exhaustion(EXHAUSTION_EXPLORE_PER_SECOND * secs);
        self.player.advance_time(secs, &mut dialogue.log);

        if one_in(&mut self.rng, EXPLORE_MOB_ONE_IN) {
            self.encounter(Location::Exploring, dialogue)?;
        } else if x_in_y(&mut self.rng, EXPLORE_FIND_X, EXPLORE_FIND_Y) {
            let finds: WeightedList<&str> = EXPLORE_FINDS.into_iter().collect();
            let found = *finds.pick(&mut self.rng)?;
            self.player.add_item(found, 1);
            dialogue.emit(GameEvent::Found {
                item: found.to_string(),
                amount: 1,
            });
        }
        Ok(())
    }

    fn encounter(
        &mut self,
        location: Location,
        dialogue: &mut Dialogue<'_>,
    ) -> Result<EncounterOutcome, GameError> {
        random_encounter(&mut self.player, &self.data.mobs, location, dialogue, &mut self.rng)
    }

    // ── Mine ────────────────────────────────────────────────────

    /// Digs once with the equipped pickaxe.
    pub fn mine(&mut self, dialogue: &mut Dialogue<'_>) -> Result<(), GameError> {
        let Some((tier, mult)) = self
            .player
            .weapon()
            .and_then(|t| t.mining_tier.map(|tier| (tier, t.mining_mult)))
        else {
            dialogue.emit(GameEvent::NeedPickaxe);
            return Ok(());
        };

        let table = mining_table(tier);
        let found = *table.pick(&mut self.rng)?;
        let (exp_lo, exp_hi) = mining_exp(found);
        let exp = int_range(&mut self.rng, exp_lo, exp_hi);
        let (q_lo, q_hi) = mining_quantity(found);
        let quantity = int_range(&mut self.rng, q_lo, q_hi) as u32;
        dialogue.emit(GameEvent::Mining);

        let mob_odds = (MINE_MOB_BASE_ONE_IN * mult.sqrt()).round().max(1.0) as u32;
        if found == STONE && one_in(&mut self.rng, MINE_STONE_DUD_ONE_IN) {
            dialogue.emit(GameEvent::NothingOfValue);
            self.player.advance_time(MINE_DUD_SECONDS, &mut dialogue.log);
        } else {
            dialogue.emit(GameEvent::Found {
                item: found.to_string(),
                amount: quantity,
            });
            self.player.gain_exp(exp as f64, &mut self.rng, &mut dialogue.log);
            self.player.add_item(found, quantity);
            self.player.add_exhaustion(EXHAUSTION_MINE);
            let base = if found == STONE {
                MINE_STONE_SECONDS
            } else {
                MINE_ORE_SECONDS
            };
            let mine_time = (base / mult * 100.0).round() / 100.0;
            self.player.advance_time(mine_time, &mut dialogue.log);
            self.player.decrement_tool_durability(&mut dialogue.log);
        }

        if one_in(&mut self.rng, mob_odds) {
            self.encounter(Location::Mining, dialogue)?;
        }
        Ok(())
    }

    // ── Inventory, crafting, eating ─────────────────────────────

    pub fn show_inventory(&self, dialogue: &mut Dialogue<'_>) {
        dialogue.emit(GameEvent::InventoryListing {
            items: self
                .player
                .inventory
                .iter()
                .map(|(item, n)| (item.to_string(), n))
                .collect(),
            tools: self
                .player
                .tools
                .iter()
                .map(|t| (t.name.clone(), durability(t)))
                .collect(),
        });
    }

    pub fn craft(&mut self, dialogue: &mut Dialogue<'_>) -> Result<(), GameError> {
        let mut options: Vec<MenuOption> = self
            .data
            .recipes
            .craftable(&self.player.inventory)
            .into_iter()
            .map(|(name, recipe)| MenuOption::Recipe {
                name: name.to_string(),
                quantity: recipe.quantity,
                components: recipe.components.clone(),
            })
            .collect();
        if options.is_empty() {
            dialogue.emit(GameEvent::NothingToCraft);
            return Ok(());
        }
        options.push(MenuOption::Cancel);
        let menu = Menu::with_prompt("What would you like to craft?", options);
        if let MenuOption::Recipe { name, .. } = dialogue.ask(&menu)? {
            self.craft_item(&name, &mut dialogue.log)?;
        }
        Ok(())
    }

    /// Crafts `name`, consuming its components. Tools are added to the tool
    /// list, everything else to the inventory.
    pub fn craft_item(&mut self, name: &str, log: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let recipe = self.data.recipes.get(name)?;
        recipe.consume(&mut self.player.inventory)?;
        match &recipe.tool_data {
            Some(data) => self.player.add_tool(Tool::new(name, data)),
            None => self.player.add_item(name, recipe.quantity),
        }
        log::debug!("crafted {}x {}", recipe.quantity, name);
        log.push(GameEvent::Crafted {
            item: name.to_string(),
            quantity: recipe.quantity,
        });
        Ok(())
    }

    pub fn eat(&mut self, dialogue: &mut Dialogue<'_>) -> Result<(), GameError> {
        let foods = self.held_foods();
        if foods.is_empty() {
            dialogue.emit(GameEvent::NothingToEat);
            return Ok(());
        }
        let mut options: Vec<MenuOption> = foods
            .into_iter()
            .map(|(name, held)| MenuOption::Food { name, held })
            .collect();
        options.push(MenuOption::Cancel);
        let menu = Menu::with_prompt("What would you like to eat?", options);
        if let MenuOption::Food { name, .. } = dialogue.ask(&menu)? {
            self.eat_item(&name, &mut dialogue.log)?;
        }
        Ok(())
    }

    pub fn eat_item(&mut self, name: &str, log: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let food = self
            .data
            .foods
            .get(name)
            .ok_or_else(|| GameError::NotAFood(name.to_string()))?;
        self.player.eat(name, food, &mut self.rng, log)
    }
}

fn durability(tool: &Tool) -> Durability {
    Durability {
        current: tool.durability,
        max: tool.max_durability,
    }
}
