//! The player character and the systems attached to it.

pub mod effects;
pub mod player;
pub mod progression;

pub use effects::*;
pub use player::*;
pub use progression::*;
