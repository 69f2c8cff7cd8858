//! Command-line driver for playing and analyzing games
//!
//! The CLI only wires user choices to the library: it builds players from a
//! [`config::MatchConfig`], renders states through [`output::ConsoleRenderer`]
//! and prints the search engine's answers.

pub mod commands;
pub mod config;
pub mod output;
