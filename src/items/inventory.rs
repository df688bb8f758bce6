use crate::core::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item counts keyed by name. Entries that reach zero are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: &str, amount: u32) {
        if amount == 0 {
            return;
        }
        let held = self.items.entry(item.to_string()).or_insert(0);
        *held = held.saturating_add(amount);
    }

    /// Removes `amount` of `item`. Fails without touching the inventory when
    /// fewer are held.
    pub fn remove(&mut self, item: &str, amount: u32) -> Result<(), GameError> {
        if amount == 0 {
            return Ok(());
        }
        let held = self.count(item);
        if held < amount {
            return Err(GameError::InsufficientItems {
                item: item.to_string(),
                requested: amount,
                held,
            });
        }
        if held == amount {
            self.items.remove(item);
        } else if let Some(count) = self.items.get_mut(item) {
            *count -= amount;
        }
        Ok(())
    }

    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn has(&self, item: &str, amount: u32) -> bool {
        self.count(item) >= amount
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_count() {
        let mut inv = Inventory::new();
        inv.add("Dirt", 3);
        inv.add("Dirt", 2);
        assert_eq!(inv.count("Dirt"), 5);
        assert_eq!(inv.count("Wood"), 0);
    }

    #[test]
    fn test_add_zero_creates_nothing() {
        let mut inv = Inventory::new();
        inv.add("Dirt", 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_remove_insufficient_leaves_unchanged() {
        let mut inv = Inventory::new();
        inv.add("Stick", 3);
        let before = inv.clone();
        let err = inv.remove("Stick", 5).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientItems {
                item: "Stick".to_string(),
                requested: 5,
                held: 3
            }
        );
        assert_eq!(inv, before);
    }

    #[test]
    fn test_remove_missing_item() {
        let mut inv = Inventory::new();
        assert!(inv.remove("Diamond", 1).is_err());
    }

    #[test]
    fn test_remove_to_zero_deletes_entry() {
        let mut inv = Inventory::new();
        inv.add("Coal", 2);
        inv.remove("Coal", 2).unwrap();
        assert!(inv.is_empty());
        assert_eq!(inv.iter().count(), 0);
    }

    #[test]
    fn test_add_saturates_at_max() {
        let mut inv = Inventory::new();
        inv.add("Cobblestone", u32::MAX);
        inv.add("Cobblestone", 5);
        assert_eq!(inv.count("Cobblestone"), u32::MAX);
    }

    #[test]
    fn test_partial_remove() {
        let mut inv = Inventory::new();
        inv.add("Coal", 5);
        inv.remove("Coal", 2).unwrap();
        assert_eq!(inv.count("Coal"), 3);
        assert!(inv.has("Coal", 3));
        assert!(!inv.has("Coal", 4));
    }
}
