//! # Application Layer
//!
//! Contains the core logic of the bot: the immutable project directory,
//! the command resolver that turns one invocation into one reply, command
//! routing, and invocation stats.

pub mod directory;
pub mod resolver;
pub mod router;
pub mod stats;
