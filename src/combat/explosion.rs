//! Blocks knocked loose by an explosion.

use super::battle::Location;
use crate::core::chance::{binomial, int_range, one_in, uniform, RandomSource};
use crate::core::constants::{EXPLOSION_SPREAD_MAX, EXPLOSION_SPREAD_MIN};
use crate::core::error::GameError;
use crate::core::weighted::WeightedList;

/// Underground blocks an explosion can break loose. Explosions drop the
/// block rather than the mined item.
pub const EXPLOSION_BLOCKS: [(&str, f64); 6] = [
    ("Stone", 3000.0),
    ("Coal Ore", 124.0),
    ("Iron Ore", 72.0),
    ("Lapis Lazuli Ore", 3.0),
    ("Gold Ore", 7.0),
    ("Diamond Ore", 3.0),
];

/// `⌊(power · uniform(0.75, 1.25))²⌋ + 1`
fn blast_volume(power: u32, rng: &mut impl RandomSource) -> u32 {
    let radius = power as f64 * uniform(rng, EXPLOSION_SPREAD_MIN, EXPLOSION_SPREAD_MAX);
    (radius * radius) as u32 + 1
}

/// Rolls the blocks an explosion of `power` yields at `location`.
///
/// Underground, each of the blast's blocks survives with chance `1/power`
/// and is drawn from [`EXPLOSION_BLOCKS`]. On the surface only Grass and
/// Dirt come loose. Items are returned in first-seen order with zero
/// counts left out.
pub fn explosion_loot(
    power: u32,
    location: Location,
    rng: &mut impl RandomSource,
) -> Result<Vec<(String, u32)>, GameError> {
    let power = power.max(1);
    let mut found: Vec<(String, u32)> = Vec::new();
    match location {
        Location::Mining => {
            let blocks: WeightedList<&str> = EXPLOSION_BLOCKS.into_iter().collect();
            for _ in 0..blast_volume(power, rng) {
                if !one_in(rng, power) {
                    continue;
                }
                let block = *blocks.pick(rng)?;
                match found.iter_mut().find(|(name, _)| name == block) {
                    Some((_, n)) => *n += 1,
                    None => found.push((block.to_string(), 1)),
                }
            }
        }
        Location::Exploring => {
            let grass = int_range(rng, (power / 3) as i64, power as i64) as u32 + 1;
            let dirt = blast_volume(power, rng);
            let grass = binomial(rng, grass, 1.0, power as f64);
            let dirt = binomial(rng, dirt, 1.0, power as f64);
            if grass > 0 {
                found.push(("Grass".to_string(), grass));
            }
            if dirt > 0 {
                found.push(("Dirt".to_string(), dirt));
            }
        }
    }
    log::trace!("explosion power {} at {:?} -> {:?}", power, location, found);
    Ok(found)
}
