//! Cumulative-weight sampler used for encounter and loot tables.

use super::chance::RandomSource;
use super::error::GameError;

/// Ordered list of values with positive weights.
///
/// `pick` returns a value with probability proportional to its weight.
/// Running totals are kept alongside the values, so picking never has to
/// re-sum the weights and a shared table can be sampled through `&self`.
#[derive(Debug, Clone)]
pub struct WeightedList<T> {
    choices: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T> Default for WeightedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WeightedList<T> {
    pub fn new() -> Self {
        Self {
            choices: Vec::new(),
            cumulative: Vec::new(),
        }
    }

    /// Adds a value. Non-positive weights are ignored.
    pub fn add(&mut self, value: T, weight: f64) {
        if weight > 0.0 && weight.is_finite() {
            let total = self.total_weight() + weight;
            self.choices.push(value);
            self.cumulative.push(total);
        }
    }

    pub fn clear(&mut self) {
        self.choices.clear();
        self.cumulative.clear();
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Values with their individual weights, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        let previous = std::iter::once(0.0).chain(self.cumulative.iter().copied());
        self.choices
            .iter()
            .zip(self.cumulative.iter().copied().zip(previous))
            .map(|(value, (upper, lower))| (value, upper - lower))
    }

    /// Picks one value proportionally to its weight.
    pub fn pick(&self, rng: &mut impl RandomSource) -> Result<&T, GameError> {
        if self.choices.is_empty() {
            return Err(GameError::EmptyWeightedList);
        }
        let roll = rng.next_f64() * self.total_weight();
        // First bucket whose upper bound exceeds the roll.
        let index = self
            .cumulative
            .partition_point(|&bound| bound <= roll)
            .min(self.choices.len() - 1);
        Ok(&self.choices[index])
    }
}

impl<T> FromIterator<(T, f64)> for WeightedList<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut list = Self::new();
        for (value, weight) in iter {
            list.add(value, weight);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chance::{Pin, Rigged};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pick_empty_is_error() {
        let list: WeightedList<&str> = WeightedList::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..5 {
            assert_eq!(list.pick(&mut rng), Err(GameError::EmptyWeightedList));
        }
    }

    #[test]
    fn test_non_positive_weights_ignored() {
        let mut list = WeightedList::new();
        list.add("zero", 0.0);
        list.add("negative", -3.0);
        assert!(list.is_empty());
        list.add("one", 1.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_pick_is_proportional() {
        let mut list = WeightedList::new();
        list.add("A", 1.0);
        list.add("B", 3.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut a = 0;
        let mut b = 0;
        for _ in 0..20_000 {
            match *list.pick(&mut rng).unwrap() {
                "A" => a += 1,
                "B" => b += 1,
                _ => unreachable!(),
            }
        }
        let ratio = b as f64 / a as f64;
        assert!((2.7..3.3).contains(&ratio), "B/A ratio was {ratio}");
    }

    #[test]
    fn test_pick_bucket_edges() {
        let list: WeightedList<&str> = [("A", 1.0), ("B", 3.0)].into_iter().collect();
        let mut low = Rigged::new(0.0, Pin::Low);
        assert_eq!(*list.pick(&mut low).unwrap(), "A");
        // 0.25 * 4 == 1.0 lands on the boundary and belongs to B.
        let mut edge = Rigged::new(0.25, Pin::Low);
        assert_eq!(*list.pick(&mut edge).unwrap(), "B");
        let mut high = Rigged::new(0.999, Pin::Low);
        assert_eq!(*list.pick(&mut high).unwrap(), "B");
    }

    #[test]
    fn test_iter_reports_individual_weights() {
        let list: WeightedList<&str> = [("A", 2.0), ("B", 5.0)].into_iter().collect();
        let weights: Vec<(&str, f64)> = list.iter().map(|(v, w)| (*v, w)).collect();
        assert_eq!(weights, vec![("A", 2.0), ("B", 5.0)]);
        assert_eq!(list.total_weight(), 7.0);
    }

    #[test]
    fn test_totals_follow_mutation() {
        let mut list = WeightedList::new();
        list.add("A", 1.0);
        let mut rng = Rigged::new(0.9, Pin::Low);
        assert_eq!(*list.pick(&mut rng).unwrap(), "A");
        list.add("B", 9.0);
        assert_eq!(*list.pick(&mut rng).unwrap(), "B");
        list.clear();
        assert!(list.pick(&mut rng).is_err());
    }
}
