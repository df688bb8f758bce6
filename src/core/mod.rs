//! Engine plumbing: randomness, errors, events, configuration and the
//! session loop.

pub mod chance;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod mining;
pub mod session;
pub mod time;
pub mod weighted;

pub use chance::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use session::*;
pub use time::*;
pub use weighted::*;
