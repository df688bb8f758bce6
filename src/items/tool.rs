use serde::{Deserialize, Serialize};

/// Stats a recipe attaches to a crafted tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolData {
    pub damage: i32,
    pub durability: i32,
    pub attack_speed: f64,
    pub mining_mult: f64,
    /// Pickaxe strength. `None` for anything that cannot mine.
    pub mining_tier: Option<u8>,
}

impl Default for ToolData {
    fn default() -> Self {
        Self {
            damage: 1,
            durability: 1,
            attack_speed: 4.0,
            mining_mult: 1.0,
            mining_tier: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub damage: i32,
    pub durability: i32,
    pub max_durability: i32,
    pub mining_mult: f64,
    pub attack_speed: f64,
    pub mining_tier: Option<u8>,
}

impl Tool {
    pub fn new(name: impl Into<String>, data: &ToolData) -> Self {
        Self {
            name: name.into(),
            damage: data.damage,
            durability: data.durability,
            max_durability: data.durability,
            mining_mult: data.mining_mult,
            attack_speed: data.attack_speed,
            mining_tier: data.mining_tier,
        }
    }

    pub fn is_pickaxe(&self) -> bool {
        self.mining_tier.is_some()
    }

    /// Uses up one point of durability. Returns true when the tool broke.
    pub fn wear(&mut self) -> bool {
        self.durability -= 1;
        self.durability < 0
    }

    pub fn condition(&self) -> Condition {
        Condition::of(self.durability, self.max_durability)
    }
}

/// How worn a tool is, used to color durability readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Good,
    Worn,
    Critical,
}

impl Condition {
    pub fn of(durability: i32, max_durability: i32) -> Self {
        if durability <= max_durability / 4 {
            Condition::Critical
        } else if durability <= max_durability / 2 {
            Condition::Worn
        } else {
            Condition::Good
        }
    }
}
