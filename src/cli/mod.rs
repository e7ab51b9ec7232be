//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod replay;
pub mod split;

pub use replay::{handle_replay_command, ReplayArgs};
pub use split::{handle_split_command, SplitArgs};
