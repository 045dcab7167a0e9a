//! reel CLI library.
//!
//! Argument parsing and the command handlers that drive the project store.

pub mod cli;
pub mod commands;
