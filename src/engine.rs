//! Turn loop driving two players to the end of a game

use tracing::info;

use crate::{
    Error, Result,
    players::Player,
    tictactoe::{GameState, Mark, validate_game_state},
};

/// Hook receiving every state of a game, including the final one
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

impl<F: FnMut(&GameState)> Renderer for F {
    fn render(&mut self, state: &GameState) {
        self(state)
    }
}

/// A match between two players holding opposite marks
pub struct TicTacToe<R> {
    player1: Box<dyn Player>,
    player2: Box<dyn Player>,
    renderer: R,
}

impl<R: Renderer> TicTacToe<R> {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if both players hold the same mark.
    pub fn new(player1: Box<dyn Player>, player2: Box<dyn Player>, renderer: R) -> Result<Self> {
        if player1.mark() == player2.mark() {
            return Err(Error::InvalidConfiguration {
                message: format!("both players use {}", player1.mark()),
            });
        }
        Ok(Self {
            player1,
            player2,
            renderer,
        })
    }

    /// Play a fresh game opened by `starting_mark`.
    pub fn play(&mut self, starting_mark: Mark) -> Result<GameState> {
        self.play_from(GameState::start(starting_mark))
    }

    /// Continue from an externally supplied state until the game is over.
    ///
    /// The state is validated first; the final state is returned.
    pub fn play_from(&mut self, state: GameState) -> Result<GameState> {
        validate_game_state(&state)?;
        info!(
            first = self.player1.name(),
            second = self.player2.name(),
            grid = %state.grid.as_string(),
            "starting game"
        );

        let mut state = state;
        loop {
            self.renderer.render(&state);
            if state.game_over() {
                break;
            }
            state = self.player_for(state.current_mark()).make_move(&state)?;
        }

        match state.winner() {
            Some(mark) => info!(winner = %mark, "game finished"),
            None => info!("game finished in a tie"),
        }
        Ok(state)
    }

    fn player_for(&mut self, mark: Mark) -> &mut dyn Player {
        if self.player1.mark() == mark {
            self.player1.as_mut()
        } else {
            self.player2.as_mut()
        }
    }
}
