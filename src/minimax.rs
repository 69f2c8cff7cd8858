//! Exhaustive game-tree search
//!
//! Both searches walk the full tree below a move and score terminal states
//! exactly from the maximizer's perspective (see [`GameState::evaluate_score`]).
//! The pruned variant cuts off siblings once the alpha/beta window closes and
//! always agrees with the plain search on the value of the root.
//!
//! Scores are restricted to {-1, 0, +1}; [`ALPHA_FLOOR`] and [`BETA_CEILING`]
//! rely on that range and need revisiting if the evaluation ever changes.

use rand::{Rng, seq::IndexedRandom};
use tracing::{debug, trace};

use crate::tictactoe::{GameState, Mark, Move, Score, TIE_SCORE};

/// Initial alpha bound, strictly below any real score
pub const ALPHA_FLOOR: Score = -2;

/// Initial beta bound, strictly above any real score
pub const BETA_CEILING: Score = 2;

/// Which search to run when choosing a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Search {
    /// Plain minimax visiting every node
    Exhaustive,
    /// Minimax with alpha-beta pruning
    #[default]
    AlphaBeta,
}

impl Search {
    /// Score a single candidate move for `maximizer`.
    pub fn score(self, mv: &Move, maximizer: Mark) -> Score {
        match self {
            Search::Exhaustive => minimax(mv, maximizer),
            Search::AlphaBeta => pruned_minimax(mv, maximizer, ALPHA_FLOOR, BETA_CEILING),
        }
    }

    /// Highest-scoring move for the mark to play, with its score.
    ///
    /// Candidates are tried in ascending cell order and the first one reaching
    /// the best score wins, so the choice is reproducible. Returns `None` once
    /// the game is over.
    pub fn best_move(self, state: &GameState) -> Option<(Move, Score)> {
        let maximizer = state.current_mark();
        let mut best: Option<(Move, Score)> = None;

        for mv in state.possible_moves() {
            let score = self.score(&mv, maximizer);
            trace!(cell = mv.cell_index, score, "scored candidate");
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = &best {
            debug!(
                search = ?self,
                mark = %maximizer,
                cell = mv.cell_index,
                score,
                "selected best move"
            );
        }
        best
    }
}

/// Optimal move using the plain search, or `None` if the game is over.
pub fn find_best_move(state: &GameState) -> Option<Move> {
    Search::Exhaustive.best_move(state).map(|(mv, _)| mv)
}

/// Optimal move using the alpha-beta search, or `None` if the game is over.
///
/// # Examples
///
/// ```
/// use noughts::{
///     minimax::pruned_find_best_move,
///     tictactoe::{GameState, Mark},
/// };
///
/// // X to play and win on the top row
/// let state = GameState::from_layout("XX OO    ", Mark::Cross).unwrap();
/// let best = pruned_find_best_move(&state).unwrap();
/// assert_eq!(best.cell_index, 2);
/// assert_eq!(best.after_state.winner(), Some(Mark::Cross));
/// ```
pub fn pruned_find_best_move(state: &GameState) -> Option<Move> {
    Search::AlphaBeta.best_move(state).map(|(mv, _)| mv)
}

/// Value of the position after `mv` for `maximizer`, visiting every node.
pub fn minimax(mv: &Move, maximizer: Mark) -> Score {
    let state = &mv.after_state;
    if state.game_over() {
        return terminal_score(state, maximizer);
    }

    let children = state.possible_moves().into_iter();
    if state.current_mark() == maximizer {
        children
            .map(|child| minimax(&child, maximizer))
            .fold(ALPHA_FLOOR, Score::max)
    } else {
        children
            .map(|child| minimax(&child, maximizer))
            .fold(BETA_CEILING, Score::min)
    }
}

/// Value of the position after `mv` for `maximizer`, with alpha-beta pruning.
///
/// `alpha` is the score the maximizer is already assured of and `beta` the
/// score the minimizer is already assured of; start with [`ALPHA_FLOOR`] and
/// [`BETA_CEILING`].
pub fn pruned_minimax(mv: &Move, maximizer: Mark, mut alpha: Score, mut beta: Score) -> Score {
    let state = &mv.after_state;
    if state.game_over() {
        return terminal_score(state, maximizer);
    }

    if state.current_mark() == maximizer {
        let mut best = ALPHA_FLOOR;
        for child in state.possible_moves() {
            best = best.max(pruned_minimax(&child, maximizer, alpha, beta));
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = BETA_CEILING;
        for child in state.possible_moves() {
            best = best.min(pruned_minimax(&child, maximizer, alpha, beta));
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Uniformly random legal move, or `None` if the game is over.
pub fn random_move<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<Move> {
    let chosen = state.possible_moves().choose(rng).copied();
    if let Some(mv) = &chosen {
        debug!(mark = %mv.mark, cell = mv.cell_index, "selected random move");
    }
    chosen
}

fn terminal_score(state: &GameState, maximizer: Mark) -> Score {
    let score = state.evaluate_score(maximizer);
    debug_assert!(score.is_ok(), "terminal state must have a score");
    score.unwrap_or(TIE_SCORE)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::tictactoe::{Grid, LOSS_SCORE, WIN_SCORE};

    fn state(layout: &str, starting_mark: Mark) -> GameState {
        GameState::new(Grid::parse(layout).unwrap(), starting_mark)
    }

    #[test]
    fn test_no_move_when_game_over() {
        let won = state("XXXOO    ", Mark::Cross);
        let tied = state("XOXXOXOXO", Mark::Cross);
        for finished in [won, tied] {
            assert!(find_best_move(&finished).is_none());
            assert!(pruned_find_best_move(&finished).is_none());
            assert!(random_move(&finished, &mut StdRng::seed_from_u64(7)).is_none());
        }
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X .
        // O O .
        // . . .
        let game = state("XX OO    ", Mark::Cross);
        for search in [Search::Exhaustive, Search::AlphaBeta] {
            let (mv, score) = search.best_move(&game).unwrap();
            assert_eq!(mv.cell_index, 2, "{search:?} should complete the top row");
            assert_eq!(score, WIN_SCORE);
        }
    }

    #[test]
    fn test_blocks_opponent_win() {
        // X . O
        // . X .
        // . . .
        let game = state("X O X    ", Mark::Cross);
        assert_eq!(game.current_mark(), Mark::Naught);
        for search in [Search::Exhaustive, Search::AlphaBeta] {
            let (mv, score) = search.best_move(&game).unwrap();
            assert_eq!(mv.cell_index, 8, "{search:?} should block the diagonal");
            assert_eq!(score, TIE_SCORE);
        }
    }

    #[test]
    fn test_lost_position_scores_negative() {
        // X X .
        // X O .
        // . . O
        // X threatens 2 and 6 at once; every O reply loses.
        let game = state("XX XO   O", Mark::Cross);
        assert_eq!(game.current_mark(), Mark::Naught);
        for search in [Search::Exhaustive, Search::AlphaBeta] {
            let (_, score) = search.best_move(&game).unwrap();
            assert_eq!(score, LOSS_SCORE, "{search:?}");
        }
    }

    #[test]
    fn test_first_of_equal_moves_is_chosen() {
        // X X .
        // X O .
        // . O O
        // Both 2 and 6 win for X; the lower cell is picked.
        let game = state("XX XO  OO", Mark::Cross);
        assert_eq!(game.current_mark(), Mark::Cross);

        let winning_at_6 = game.make_move_to(6).unwrap();
        assert_eq!(Search::Exhaustive.score(&winning_at_6, Mark::Cross), WIN_SCORE);

        assert_eq!(find_best_move(&game).unwrap().cell_index, 2);
        assert_eq!(pruned_find_best_move(&game).unwrap().cell_index, 2);
    }

    #[test]
    fn test_single_minimax_call_matches_pruned() {
        let game = GameState::start(Mark::Naught);
        for mv in game.possible_moves() {
            assert_eq!(
                minimax(&mv, Mark::Naught),
                pruned_minimax(&mv, Mark::Naught, ALPHA_FLOOR, BETA_CEILING),
                "opening at {}",
                mv.cell_index
            );
        }
    }

    #[test]
    fn test_random_move_is_reproducible_with_seed() {
        let game = GameState::default();
        let first = random_move(&game, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = random_move(&game, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
        assert!(game.possible_moves().contains(&first));
    }

    #[test]
    fn test_random_move_reaches_every_cell() {
        let game = GameState::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[random_move(&game, &mut rng).unwrap().cell_index] = true;
        }
        assert!(seen.iter().all(|&hit| hit), "cells seen: {seen:?}");
    }
}
