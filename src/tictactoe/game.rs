//! Game state snapshots and the moves that connect them

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{Grid, Mark},
    lines::LineAnalyzer,
};

/// Outcome value of a finished game from one mark's perspective
pub type Score = i32;

/// Score of a won game
pub const WIN_SCORE: Score = 1;
/// Score of a tied game
pub const TIE_SCORE: Score = 0;
/// Score of a lost game
pub const LOSS_SCORE: Score = -1;

/// Immutable snapshot of a game: the grid plus the mark that moved first.
///
/// Everything else (whose turn it is, the winner, whether the game is over)
/// is derived from these two fields on demand. Construction does no
/// validation so the search can build states cheaply; run
/// [`validate_game_state`](super::validation::validate_game_state) on any
/// state that comes from outside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub starting_mark: Mark,
}

/// A single placement taking one game state to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub mark: Mark,
    pub cell_index: usize,
    pub before_state: GameState,
    pub after_state: GameState,
}

impl GameState {
    pub fn new(grid: Grid, starting_mark: Mark) -> Self {
        GameState {
            grid,
            starting_mark,
        }
    }

    /// Empty grid with `starting_mark` to play first
    pub fn start(starting_mark: Mark) -> Self {
        Self::new(Grid::empty(), starting_mark)
    }

    /// Parse and validate an externally supplied layout.
    ///
    /// # Errors
    ///
    /// Returns a grid validation error for a malformed layout, or
    /// [`Error::InvalidGameState`](crate::Error::InvalidGameState) if the
    /// layout could not arise in a game started by `starting_mark`.
    ///
    /// # Examples
    ///
    /// ```
    /// use noughts::tictactoe::{GameState, Mark};
    ///
    /// let state = GameState::from_layout("XO  X    ", Mark::Cross).unwrap();
    /// assert_eq!(state.current_mark(), Mark::Naught);
    ///
    /// // Naught cannot be ahead in a game that cross started
    /// assert!(GameState::from_layout("OO X     ", Mark::Cross).is_err());
    /// ```
    pub fn from_layout(layout: &str, starting_mark: Mark) -> Result<Self, crate::Error> {
        let grid = Grid::parse(layout)?;
        let state = Self::new(grid, starting_mark);
        super::validation::validate_game_state(&state)?;
        Ok(state)
    }

    /// The mark to play next.
    ///
    /// Equal counts mean the starting mark is due; otherwise its opponent is.
    pub fn current_mark(&self) -> Mark {
        if self.grid.x_count() == self.grid.o_count() {
            self.starting_mark
        } else {
            self.starting_mark.other()
        }
    }

    pub fn game_not_started(&self) -> bool {
        self.grid.empty_count() == 9
    }

    pub fn game_over(&self) -> bool {
        self.winner().is_some() || self.tie()
    }

    /// Board full and nobody has a line
    pub fn tie(&self) -> bool {
        self.grid.empty_count() == 0 && self.winner().is_none()
    }

    pub fn winner(&self) -> Option<Mark> {
        LineAnalyzer::winning_line(self.grid.cells()).map(|(mark, _)| mark)
    }

    /// Indices of the completed line, empty when there is no winner
    pub fn winning_cells(&self) -> Vec<usize> {
        LineAnalyzer::winning_line(self.grid.cells())
            .map(|(_, line)| line.to_vec())
            .unwrap_or_default()
    }

    /// Every legal move for the current mark, in ascending cell order.
    ///
    /// Empty once the game is over.
    pub fn possible_moves(&self) -> Vec<Move> {
        if self.game_over() {
            return Vec::new();
        }
        let mark = self.current_mark();
        self.grid
            .empty_positions()
            .into_iter()
            .map(|index| self.advance(index, mark))
            .collect()
    }

    /// Build the move placing the current mark at `index`.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`](crate::Error::GameOver) if the game has ended
    /// - [`Error::InvalidPosition`](crate::Error::InvalidPosition) if `index > 8`
    /// - [`Error::InvalidMove`](crate::Error::InvalidMove) if the cell is taken
    pub fn make_move_to(&self, index: usize) -> Result<Move, crate::Error> {
        if self.game_over() {
            return Err(crate::Error::GameOver);
        }
        let mark = self.current_mark();
        let grid = self.grid.with_cell(index, mark)?;
        Ok(Move {
            mark,
            cell_index: index,
            before_state: *self,
            after_state: GameState::new(grid, self.starting_mark),
        })
    }

    fn advance(&self, index: usize, mark: Mark) -> Move {
        Move {
            mark,
            cell_index: index,
            before_state: *self,
            after_state: GameState::new(self.grid.place(index, mark), self.starting_mark),
        }
    }

    /// Score of a finished game for `mark`: +1 win, 0 tie, -1 loss.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownGameScore`](crate::Error::UnknownGameScore) while
    /// the game is still in progress.
    pub fn evaluate_score(&self, mark: Mark) -> Result<Score, crate::Error> {
        if !self.game_over() {
            return Err(crate::Error::UnknownGameScore);
        }
        Ok(match self.winner() {
            None => TIE_SCORE,
            Some(winner) if winner == mark => WIN_SCORE,
            Some(_) => LOSS_SCORE,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::start(Mark::Cross)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.grid)?;
        match self.winner() {
            Some(mark) => write!(f, "{mark} wins"),
            None if self.tie() => write!(f, "tie"),
            None => write!(f, "{} to play", self.current_mark()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(layout: &str) -> GameState {
        GameState::new(Grid::parse(layout).unwrap(), Mark::Cross)
    }

    #[test]
    fn test_new_game() {
        let game = GameState::default();
        assert_eq!(game.current_mark(), Mark::Cross);
        assert!(game.game_not_started());
        assert!(!game.game_over());

        let moves = game.possible_moves();
        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0].after_state.grid.as_string(), "X        ");
        assert_eq!(moves[0].mark, Mark::Cross);
        assert_eq!(moves[0].before_state, game);
    }

    #[test]
    fn test_naught_first_game_alternates() {
        let game = GameState::start(Mark::Naught);
        assert_eq!(game.current_mark(), Mark::Naught);

        let after = game.make_move_to(4).unwrap().after_state;
        assert_eq!(after.grid.as_string(), "    O    ");
        assert_eq!(after.current_mark(), Mark::Cross);
        assert_eq!(after.starting_mark, Mark::Naught);
    }

    #[test]
    fn test_win_on_top_row() {
        let game = state("XXXOO    ");
        assert_eq!(game.winner(), Some(Mark::Cross));
        assert_eq!(game.winning_cells(), vec![0, 1, 2]);
        assert!(game.game_over());
        assert!(!game.tie());
        assert!(game.possible_moves().is_empty());
    }

    #[test]
    fn test_tie() {
        let game = state("XOXXOXOXO");
        assert_eq!(game.winner(), None);
        assert!(game.winning_cells().is_empty());
        assert!(game.tie());
        assert!(game.game_over());
        assert_eq!(game.evaluate_score(Mark::Cross).unwrap(), TIE_SCORE);
    }

    #[test]
    fn test_full_board_with_winner_is_not_a_tie() {
        let game = state("XOXOXOOXX");
        assert_eq!(game.winner(), Some(Mark::Cross));
        assert!(!game.tie());
    }

    #[test]
    fn test_evaluate_score_is_mark_relative() {
        let game = state("OOOXX X  ");
        assert_eq!(game.evaluate_score(Mark::Naught).unwrap(), WIN_SCORE);
        assert_eq!(game.evaluate_score(Mark::Cross).unwrap(), LOSS_SCORE);
    }

    #[test]
    fn test_evaluate_score_requires_finished_game() {
        let game = state("X   O    ");
        assert!(matches!(
            game.evaluate_score(Mark::Cross),
            Err(crate::Error::UnknownGameScore)
        ));
    }

    #[test]
    fn test_make_move_to_errors() {
        let game = state("X        ");
        assert!(matches!(
            game.make_move_to(0),
            Err(crate::Error::InvalidMove { position: 0 })
        ));
        assert!(matches!(
            game.make_move_to(12),
            Err(crate::Error::InvalidPosition { position: 12 })
        ));

        let finished = state("XXXOO    ");
        assert!(matches!(
            finished.make_move_to(8),
            Err(crate::Error::GameOver)
        ));
    }

    #[test]
    fn test_make_move_to_matches_possible_moves() {
        let game = state("X   O    ");
        for mv in game.possible_moves() {
            assert_eq!(game.make_move_to(mv.cell_index).unwrap(), mv);
        }
    }

    #[test]
    fn test_display() {
        let game = state("XXXOO    ");
        assert_eq!(game.to_string(), "XXX\nOO.\n...\nX wins");
    }
}
