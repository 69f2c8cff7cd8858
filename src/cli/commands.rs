//! Subcommands of the `noughts` binary

pub mod best;
pub mod play;
