//! What a pickaxe can dig up.

use super::weighted::WeightedList;

/// `(item, weight, minimum pickaxe tier)`
pub const MINING_TABLE: [(&str, f64, u8); 6] = [
    ("Stone", 1500.0, 1),
    ("Coal", 124.0, 1),
    ("Raw Iron", 72.0, 2),
    ("Lapis Lazuli", 3.0, 2),
    ("Raw Gold", 7.0, 3),
    ("Diamond", 3.0, 3),
];

pub const STONE: &str = "Stone";

/// Everything a pickaxe of `tier` can find, weighted.
pub fn mining_table(tier: u8) -> WeightedList<&'static str> {
    MINING_TABLE
        .iter()
        .filter(|(_, _, min_tier)| tier >= *min_tier)
        .map(|(item, weight, _)| (*item, *weight))
        .collect()
}

/// Inclusive EXP range for mining `item`.
pub fn mining_exp(item: &str) -> (i64, i64) {
    match item {
        "Coal" => (0, 2),
        "Lapis Lazuli" => (2, 5),
        "Diamond" => (3, 7),
        _ => (0, 0),
    }
}

/// Inclusive quantity range for one find of `item`.
pub fn mining_quantity(item: &str) -> (i64, i64) {
    match item {
        "Lapis Lazuli" => (4, 9),
        _ => (1, 1),
    }
}
