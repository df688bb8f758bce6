//! Food definitions.

use crate::core::chance::Chance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A status effect a food may inflict when eaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEffect {
    pub name: String,
    pub level: u32,
    pub duration: f64,
    #[serde(default)]
    pub chance: Chance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub hunger: i32,
    pub saturation: f64,
    #[serde(default)]
    pub effects: Vec<FoodEffect>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodTable {
    foods: BTreeMap<String, Food>,
}

impl FoodTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, food: Food) {
        self.foods.insert(name.into(), food);
    }

    pub fn get(&self, name: &str) -> Option<&Food> {
        self.foods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.foods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.foods.keys().map(String::as_str)
    }
}
