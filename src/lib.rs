//! textcraft: a turn-based text survival adventure in a block world.
//!
//! The library holds the whole engine. The binary only parses arguments and
//! puts a terminal [`Frontend`](crate::core::Frontend) in front of a
//! [`Session`](crate::core::Session).

pub mod build_info;
pub mod character;
pub mod combat;
pub mod core;
pub mod data;
pub mod items;
