//! Tic-Tac-Toe game model

pub mod board;
pub mod game;
pub mod lines;
pub mod validation;

pub use board::{CELL_COUNT, Cell, Grid, Mark};
pub use game::{GameState, LOSS_SCORE, Move, Score, TIE_SCORE, WIN_SCORE};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use validation::{validate_game_state, validate_grid};
