//! Tic-tac-toe game model and exhaustive minimax search
//!
//! This crate provides:
//! - Immutable grid and game-state values with derived turn and outcome queries
//! - Validation of externally supplied positions
//! - Minimax search, with and without alpha-beta pruning, plus a random mover
//! - Players and a turn loop with a rendering hook, used by the `noughts` CLI

pub mod cli;
pub mod engine;
pub mod error;
pub mod minimax;
pub mod players;
pub mod tictactoe;

pub use engine::{Renderer, TicTacToe};
pub use error::{Error, Result};
pub use minimax::{Search, find_best_move, pruned_find_best_move, random_move};
pub use players::{HumanPlayer, MinimaxComputerPlayer, Player, RandomComputerPlayer};
pub use tictactoe::{Cell, GameState, Grid, Mark, Move};
