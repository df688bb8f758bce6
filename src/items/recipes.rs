//! Crafting recipes.

use super::inventory::Inventory;
use super::tool::ToolData;
use crate::core::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub quantity: u32,
    pub components: Vec<(String, u32)>,
    pub tool_data: Option<ToolData>,
}

impl Recipe {
    /// Component totals, merging repeated entries for the same item.
    pub fn requirements(&self) -> BTreeMap<&str, u32> {
        let mut needed = BTreeMap::new();
        for (item, count) in &self.components {
            *needed.entry(item.as_str()).or_insert(0) += *count;
        }
        needed
    }

    /// True when every component is held in sufficient quantity.
    pub fn affordable(&self, inventory: &Inventory) -> bool {
        self.requirements()
            .into_iter()
            .all(|(item, count)| inventory.has(item, count))
    }

    /// Removes the components, all or nothing.
    pub fn consume(&self, inventory: &mut Inventory) -> Result<(), GameError> {
        for (item, count) in self.requirements() {
            let held = inventory.count(item);
            if held < count {
                return Err(GameError::InsufficientItems {
                    item: item.to_string(),
                    requested: count,
                    held,
                });
            }
        }
        for (item, count) in self.requirements() {
            inventory.remove(item, count)?;
        }
        Ok(())
    }
}

/// All recipes keyed by product name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: BTreeMap<String, Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, recipe: Recipe) {
        self.recipes.insert(name.into(), recipe);
    }

    pub fn get(&self, name: &str) -> Result<&Recipe, GameError> {
        self.recipes
            .get(name)
            .ok_or_else(|| GameError::UnknownRecipe(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Recipe)> {
        self.recipes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Recipes the inventory can pay for, in name order.
    pub fn craftable<'a>(&'a self, inventory: &'a Inventory) -> Vec<(&'a str, &'a Recipe)> {
        self.iter()
            .filter(|(_, recipe)| recipe.affordable(inventory))
            .collect()
    }
}
