//! Static game content: mobs, recipes and foods.
//!
//! Content is JSON. Defaults are compiled into the binary; a directory with
//! any of `mobs.json`, `recipes.json` and `foods.json` overrides them file by
//! file. Loading is strict: the first malformed field is reported with its
//! file, record and path, and nothing is loaded.

mod record;

use crate::combat::{Bestiary, MobBehavior, MobType, Variant};
use crate::core::constants::DEFAULT_EXPLOSION_POWER;
use crate::core::error::DataError;
use crate::items::{DeathDrop, DropItem, Food, FoodEffect, FoodTable, Quantity, Recipe, RecipeBook, ToolData};
use record::Record;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

pub const MOBS_FILE: &str = "mobs.json";
pub const RECIPES_FILE: &str = "recipes.json";
pub const FOODS_FILE: &str = "foods.json";

const DEFAULT_MOBS: &str = include_str!("../../data/mobs.json");
const DEFAULT_RECIPES: &str = include_str!("../../data/recipes.json");
const DEFAULT_FOODS: &str = include_str!("../../data/foods.json");

/// All static content, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub mobs: Bestiary,
    pub recipes: RecipeBook,
    pub foods: FoodTable,
}

impl GameData {
    /// The content compiled into the binary.
    pub fn builtin() -> Result<Self, DataError> {
        Ok(Self {
            mobs: parse_mobs(MOBS_FILE, DEFAULT_MOBS)?,
            recipes: parse_recipes(RECIPES_FILE, DEFAULT_RECIPES)?,
            foods: parse_foods(FOODS_FILE, DEFAULT_FOODS)?,
        })
    }

    /// Loads content from `dir`, falling back to the built-in file for any
    /// that is absent.
    pub fn load_dir(dir: &Path) -> Result<Self, DataError> {
        let mobs = read_or_default(dir, MOBS_FILE, DEFAULT_MOBS)?;
        let recipes = read_or_default(dir, RECIPES_FILE, DEFAULT_RECIPES)?;
        let foods = read_or_default(dir, FOODS_FILE, DEFAULT_FOODS)?;
        let data = Self {
            mobs: parse_mobs(MOBS_FILE, &mobs)?,
            recipes: parse_recipes(RECIPES_FILE, &recipes)?,
            foods: parse_foods(FOODS_FILE, &foods)?,
        };
        log::info!(
            "loaded {} mobs, {} recipes, {} foods from {}",
            data.mobs.len(),
            data.recipes.len(),
            data.foods.len(),
            dir.display()
        );
        Ok(data)
    }
}

fn read_or_default(dir: &Path, file: &str, default: &str) -> Result<String, DataError> {
    let path = dir.join(file);
    if !path.exists() {
        log::debug!("{} not found, using built-in content", path.display());
        return Ok(default.to_string());
    }
    std::fs::read_to_string(&path).map_err(|source| DataError::Io {
        file: path.display().to_string(),
        source,
    })
}

fn parse_json(file: &str, text: &str) -> Result<Value, DataError> {
    serde_json::from_str(text).map_err(|source| DataError::Json {
        file: file.to_string(),
        source,
    })
}

// ── Mobs ────────────────────────────────────────────────────────

/// Parses `mobs.json`: a list of mob type records.
pub fn parse_mobs(file: &str, text: &str) -> Result<Bestiary, DataError> {
    let root = parse_json(file, text)?;
    let Value::Array(entries) = &root else {
        return Err(DataError::Shape {
            file: file.to_string(),
            expected: "a list of mobs",
        });
    };

    let mut types = Vec::with_capacity(entries.len());
    let mut names = BTreeSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let id = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index));
        let record = Record::new(file, &id, entry)?;
        let kind = parse_mob(&record)?;
        if !names.insert(kind.name.clone()) {
            return Err(record.invalid("name", "is a duplicate"));
        }
        types.push(kind);
    }

    for kind in &types {
        if let Some(variant) = &kind.variant {
            if !names.contains(&variant.mob) {
                return Err(DataError::InvalidField {
                    file: file.to_string(),
                    record: kind.name.clone(),
                    field: "variant.mob".to_string(),
                    reason: format!("names unknown mob {:?}", variant.mob),
                });
            }
        }
    }
    log::debug!("parsed {} mob types from {}", types.len(), file);
    Ok(Bestiary::new(types))
}

fn parse_mob(r: &Record<'_>) -> Result<MobType, DataError> {
    let name: String = r.req("name", "a string")?;
    let max_hp: i64 = r.req("HP", "an integer")?;
    if max_hp <= 0 {
        return Err(r.invalid("HP", "must be positive"));
    }
    let behavior_name: String = r.req("behavior", "a string")?;
    let behavior = MobBehavior::parse(&behavior_name).ok_or_else(|| {
        r.invalid(
            "behavior",
            format!("has invalid value {:?}, expected passive, neutral or hostile", behavior_name),
        )
    })?;
    let spawns_naturally = r.opt("spawns_naturally", "a boolean")?.unwrap_or(true);
    let weight = if spawns_naturally {
        let weight: f64 = r.req("weight", "a number")?;
        if weight <= 0.0 {
            return Err(r.invalid("weight", "must be positive for a mob that spawns naturally"));
        }
        weight
    } else {
        0.0
    };
    let attack_strength: Option<f64> = r.opt("attack_strength", "a number")?;
    match attack_strength {
        None if behavior != MobBehavior::Passive => {
            return Err(r.invalid("attack_strength", "is required for non-passive mobs"));
        }
        Some(a) if a < 0.0 => return Err(r.invalid("attack_strength", "must not be negative")),
        _ => {}
    }
    let explosion_power: i64 = r
        .opt("explosion_power", "an integer")?
        .unwrap_or(DEFAULT_EXPLOSION_POWER as i64);
    if explosion_power < 1 {
        return Err(r.invalid("explosion_power", "must be at least 1"));
    }
    let variant = match r.child("variant")? {
        Some(v) => Some(Variant {
            mob: v.req("mob", "a string")?,
            chance: v.chance("chance")?.ok_or_else(|| v.missing("chance"))?,
        }),
        None => None,
    };

    Ok(MobType {
        name,
        weight,
        max_hp: max_hp.min(i32::MAX as i64) as i32,
        behavior,
        attack_strength,
        death_drops: parse_drops(r, "death_drops")?,
        spawns_naturally,
        explodes: r.opt("explodes", "a boolean")?.unwrap_or(false),
        explosion_power: explosion_power.min(u32::MAX as i64) as u32,
        evasive: r.opt("evasive", "a boolean")?.unwrap_or(false),
        variant,
        encounter_drops: parse_drops(r, "encounter_drops")?,
    })
}

fn parse_drops(r: &Record<'_>, field: &str) -> Result<Vec<DeathDrop>, DataError> {
    r.children(field)?
        .iter()
        .map(|d| {
            let item: DropItem = d.req("item", "a string or a list of strings")?;
            if let DropItem::AnyOf(names) = &item {
                if names.is_empty() {
                    return Err(d.invalid("item", "must not be an empty list"));
                }
            }
            let quantity: Quantity = d
                .opt("quantity", "an integer or a 2-item list of integers")?
                .unwrap_or_default();
            let chance = d.chance("chance")?.unwrap_or_default();
            Ok(DeathDrop {
                item,
                quantity,
                chance,
            })
        })
        .collect()
}

// ── Recipes ─────────────────────────────────────────────────────

/// Parses `recipes.json`: an object mapping product names to recipes.
pub fn parse_recipes(file: &str, text: &str) -> Result<RecipeBook, DataError> {
    let root = parse_json(file, text)?;
    let Value::Object(entries) = &root else {
        return Err(DataError::Shape {
            file: file.to_string(),
            expected: "an object of recipes",
        });
    };
    let mut book = RecipeBook::new();
    for (name, entry) in entries {
        let r = Record::new(file, name, entry)?;
        book.insert(name.clone(), parse_recipe(&r)?);
    }
    log::debug!("parsed {} recipes from {}", book.len(), file);
    Ok(book)
}

fn parse_recipe(r: &Record<'_>) -> Result<Recipe, DataError> {
    let quantity: i64 = r.opt("quantity", "an integer")?.unwrap_or(1);
    if quantity < 1 {
        return Err(r.invalid("quantity", "must be at least 1"));
    }
    let components: Vec<(String, i64)> = r.req("components", "a list of [item, count] pairs")?;
    if components.is_empty() {
        return Err(r.invalid("components", "must not be empty"));
    }
    let mut parsed = Vec::with_capacity(components.len());
    for (i, (item, count)) in components.into_iter().enumerate() {
        if count < 1 {
            return Err(r.invalid(&format!("components[{}]", i), "count must be at least 1"));
        }
        parsed.push((item, count.min(u32::MAX as i64) as u32));
    }
    let tool_data = match r.child("tool_data")? {
        Some(t) => Some(parse_tool_data(&t)?),
        None => None,
    };
    Ok(Recipe {
        quantity: quantity.min(u32::MAX as i64) as u32,
        components: parsed,
        tool_data,
    })
}

fn parse_tool_data(t: &Record<'_>) -> Result<ToolData, DataError> {
    let defaults = ToolData::default();
    let durability: i32 = t.req("durability", "an integer")?;
    if durability < 0 {
        return Err(t.invalid("durability", "must not be negative"));
    }
    let attack_speed: f64 = t.opt("attack_speed", "a number")?.unwrap_or(defaults.attack_speed);
    if attack_speed <= 0.0 {
        return Err(t.invalid("attack_speed", "must be positive"));
    }
    let mining_mult: f64 = t.opt("mining_mult", "a number")?.unwrap_or(defaults.mining_mult);
    if mining_mult <= 0.0 {
        return Err(t.invalid("mining_mult", "must be positive"));
    }
    let mining_tier: Option<u8> = t.opt("mining_tier", "an integer from 1 to 3")?;
    if let Some(tier) = mining_tier {
        if !(1..=3).contains(&tier) {
            return Err(t.invalid("mining_tier", "must be an integer from 1 to 3"));
        }
    }
    Ok(ToolData {
        damage: t.opt("damage", "an integer")?.unwrap_or(defaults.damage),
        durability,
        attack_speed,
        mining_mult,
        mining_tier,
    })
}

// ── Foods ───────────────────────────────────────────────────────

/// Parses `foods.json`: an object mapping food names to their values.
pub fn parse_foods(file: &str, text: &str) -> Result<FoodTable, DataError> {
    let root = parse_json(file, text)?;
    let Value::Object(entries) = &root else {
        return Err(DataError::Shape {
            file: file.to_string(),
            expected: "an object of foods",
        });
    };
    let mut table = FoodTable::new();
    for (name, entry) in entries {
        let r = Record::new(file, name, entry)?;
        let effects = r
            .children("effects")?
            .iter()
            .map(|e| {
                let level: u32 = e.req("level", "a positive integer")?;
                if level == 0 {
                    return Err(e.invalid("level", "must be at least 1"));
                }
                let duration: f64 = e.opt("duration", "a number")?.unwrap_or(0.0);
                Ok(FoodEffect {
                    name: e.req("name", "a string")?,
                    level,
                    duration,
                    chance: e.chance("chance")?.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;
        let food = Food {
            hunger: r.req("hunger", "an integer")?,
            saturation: r.req("saturation", "a number")?,
            effects,
        };
        table.insert(name.clone(), food);
    }
    log::debug!("parsed {} foods from {}", table.len(), file);
    Ok(table)
}
