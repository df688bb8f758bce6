//! Items: tools, inventory, recipes, foods and death drops.

pub mod drops;
pub mod food;
pub mod inventory;
pub mod recipes;
pub mod tool;

pub use drops::*;
pub use food::*;
pub use inventory::*;
pub use recipes::*;
pub use tool::*;
