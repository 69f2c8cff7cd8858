//! Consistency checks for externally supplied grids and game states
//!
//! States produced by [`GameState::possible_moves`] and
//! [`GameState::make_move_to`] satisfy these rules by construction, so only
//! states built from outside input need to pass through here.

use tracing::debug;

use super::{
    board::{Grid, Mark},
    game::GameState,
    lines::LineAnalyzer,
};
use crate::{Error, Result};

/// Re-check that a grid has nine cells drawn from the allowed symbols.
pub fn validate_grid(grid: &Grid) -> Result<()> {
    Grid::parse(&grid.as_string()).map(|_| ())
}

/// Run every game-state rule in order, stopping at the first violation.
///
/// 1. Mark counts differ by at most one.
/// 2. The mark with more placements is the starting mark.
/// 3. A winner's count matches having placed the final mark: the starting
///    mark wins one placement ahead, its opponent wins on equal counts.
///
/// # Errors
///
/// Returns [`Error::InvalidGameState`] describing the violated rule.
pub fn validate_game_state(state: &GameState) -> Result<()> {
    validate_grid(&state.grid)?;
    validate_number_of_marks(&state.grid)
        .and_then(|_| validate_starting_mark(&state.grid, state.starting_mark))
        .and_then(|_| validate_winner(state))
        .inspect_err(|err| debug!(grid = %state.grid.as_string(), %err, "rejected game state"))
}

fn validate_number_of_marks(grid: &Grid) -> Result<()> {
    if grid.x_count().abs_diff(grid.o_count()) > 1 {
        return Err(Error::invalid_state(format!(
            "mark counts must be equal or differ by one (X={}, O={})",
            grid.x_count(),
            grid.o_count()
        )));
    }
    Ok(())
}

fn validate_starting_mark(grid: &Grid, starting_mark: Mark) -> Result<()> {
    let leader = if grid.x_count() > grid.o_count() {
        Some(Mark::Cross)
    } else if grid.o_count() > grid.x_count() {
        Some(Mark::Naught)
    } else {
        None
    };

    match leader {
        Some(mark) if mark != starting_mark => Err(Error::invalid_state(format!(
            "{mark} has an extra placement, so the starting mark must be {mark}, not {starting_mark}"
        ))),
        _ => Ok(()),
    }
}

fn validate_winner(state: &GameState) -> Result<()> {
    let Some(winner) = state.winner() else {
        return Ok(());
    };

    let cells = state.grid.cells();
    if LineAnalyzer::has_won(cells, winner.other()) {
        return Err(Error::invalid_state("both marks cannot hold a winning line"));
    }

    let own = state.grid.count(winner);
    let opponent = state.grid.count(winner.other());
    let consistent = if winner == state.starting_mark {
        own == opponent + 1
    } else {
        own == opponent
    };

    if consistent {
        Ok(())
    } else {
        Err(Error::invalid_state(format!(
            "wrong number of {winner}s for {winner} to have just won (X={}, O={}, started by {})",
            state.grid.x_count(),
            state.grid.o_count(),
            state.starting_mark
        )))
    }
}
