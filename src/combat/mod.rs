//! Mobs and the encounter engine.

pub mod battle;
pub mod explosion;
pub mod mob;

pub use battle::*;
pub use explosion::*;
pub use mob::*;
