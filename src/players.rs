//! Players that choose moves for one mark
//!
//! Every player answers the same question: given a [`GameState`] where it is
//! this player's turn, which [`Move`] should be played? Computer players ask
//! the search engine; [`HumanPlayer`] reads a cell from an input stream.

use std::io::{self, BufRead, Write};

use rand::{SeedableRng, random, rngs::StdRng};
use tracing::debug;

use crate::{
    Error, Result,
    minimax::{Search, random_move},
    tictactoe::{GameState, Mark, Move},
};

/// A participant controlling one mark
pub trait Player {
    /// The mark this player places
    fn mark(&self) -> Mark;

    /// Display name used in logs and prompts
    fn name(&self) -> &str;

    /// Choose a move for `state`, or `None` when there is nothing to play.
    fn get_move(&mut self, state: &GameState) -> Result<Option<Move>>;

    /// Play one turn and return the resulting state.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has already ended
    /// - [`Error::NotYourTurn`] if the other mark is due to play
    /// - [`Error::NoValidMoves`] if the player produced no move
    fn make_move(&mut self, state: &GameState) -> Result<GameState> {
        if state.game_over() {
            return Err(Error::GameOver);
        }
        if state.current_mark() != self.mark() {
            return Err(Error::NotYourTurn { mark: self.mark() });
        }
        match self.get_move(state)? {
            Some(mv) => {
                debug!(player = self.name(), mark = %mv.mark, cell = mv.cell_index, "played move");
                Ok(mv.after_state)
            }
            None => Err(Error::NoValidMoves),
        }
    }
}

/// Plays uniformly random legal moves
pub struct RandomComputerPlayer {
    mark: Mark,
    name: String,
    rng: StdRng,
}

impl RandomComputerPlayer {
    pub fn new(mark: Mark) -> Self {
        Self::with_seed(mark, random())
    }

    /// Create a random player with a deterministic seed
    pub fn with_seed(mark: Mark, seed: u64) -> Self {
        Self {
            mark,
            name: format!("Random ({mark})"),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomComputerPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, state: &GameState) -> Result<Option<Move>> {
        Ok(random_move(state, &mut self.rng))
    }
}

/// Plays the optimal move found by exhaustive search
pub struct MinimaxComputerPlayer {
    mark: Mark,
    name: String,
    search: Search,
}

impl MinimaxComputerPlayer {
    /// Minimax player using alpha-beta pruning
    pub fn new(mark: Mark) -> Self {
        Self::with_search(mark, Search::AlphaBeta)
    }

    /// Minimax player without pruning; visits every node of the game tree
    pub fn exhaustive(mark: Mark) -> Self {
        Self::with_search(mark, Search::Exhaustive)
    }

    pub fn with_search(mark: Mark, search: Search) -> Self {
        let label = match search {
            Search::Exhaustive => "Minimax",
            Search::AlphaBeta => "Pruned minimax",
        };
        Self {
            mark,
            name: format!("{label} ({mark})"),
            search,
        }
    }

    pub fn search(&self) -> Search {
        self.search
    }
}

impl Player for MinimaxComputerPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, state: &GameState) -> Result<Option<Move>> {
        Ok(self.search.best_move(state).map(|(mv, _)| mv))
    }
}

/// Reads moves from a line-oriented input, re-prompting until a legal cell
/// is entered.
///
/// A cell is either its index `0`-`8` or a grid coordinate made of a column
/// letter `A`-`C` and a row number `1`-`3` in any order (`B2`, `2b`).
pub struct HumanPlayer<R, W> {
    mark: Mark,
    name: String,
    input: R,
    output: W,
}

impl HumanPlayer<io::StdinLock<'static>, io::Stdout> {
    /// Human reading from standard input
    pub fn stdin(mark: Mark) -> Self {
        Self::new(mark, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(mark: Mark, input: R, output: W) -> Self {
        Self {
            mark,
            name: format!("Human ({mark})"),
            input,
            output,
        }
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}").map_err(|source| Error::Io {
            operation: "write prompt".to_string(),
            source,
        })?;
        self.output.flush().map_err(|source| Error::Io {
            operation: "flush prompt".to_string(),
            source,
        })
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|source| Error::Io {
                operation: "read move".to_string(),
                source,
            })?;
        if read == 0 {
            return Err(Error::Io {
                operation: "read move".to_string(),
                source: io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"),
            });
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn get_move(&mut self, state: &GameState) -> Result<Option<Move>> {
        if state.game_over() {
            return Ok(None);
        }
        loop {
            self.prompt(&format!("{}'s move: ", self.mark))?;
            let line = self.read_line()?;
            let Some(index) = parse_cell(&line) else {
                self.prompt("Please provide a cell as 0-8 or a coordinate like B2.\n")?;
                continue;
            };
            match state.make_move_to(index) {
                Ok(mv) => return Ok(Some(mv)),
                Err(Error::InvalidMove { .. }) => self.prompt("That cell is already occupied.\n")?,
                Err(err) => return Err(err),
            }
        }
    }
}

/// Parse a cell reference: an index `0`-`8` or a coordinate such as `A1`/`1A`.
pub fn parse_cell(input: &str) -> Option<usize> {
    let token = input.trim().to_ascii_uppercase();
    let chars: Vec<char> = token.chars().collect();
    match chars.as_slice() {
        [digit @ '0'..='8'] => digit.to_digit(10).map(|d| d as usize),
        [col @ 'A'..='C', row @ '1'..='3'] | [row @ '1'..='3', col @ 'A'..='C'] => {
            let col = (*col as u8 - b'A') as usize;
            let row = (*row as u8 - b'1') as usize;
            Some(row * 3 + col)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::tictactoe::Grid;

    fn state(layout: &str) -> GameState {
        GameState::new(Grid::parse(layout).unwrap(), Mark::Cross)
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("0"), Some(0));
        assert_eq!(parse_cell(" 8\n"), Some(8));
        assert_eq!(parse_cell("A1"), Some(0));
        assert_eq!(parse_cell("c1"), Some(2));
        assert_eq!(parse_cell("2b"), Some(4));
        assert_eq!(parse_cell("C3"), Some(8));
        assert_eq!(parse_cell("9"), None);
        assert_eq!(parse_cell("D1"), None);
        assert_eq!(parse_cell(""), None);
        assert_eq!(parse_cell("A1A"), None);
    }

    #[test]
    fn test_human_reprompts_until_legal() {
        let game = state("X   O    ");
        let input = Cursor::new("hello\n0\nB1\n");
        let mut output = Vec::new();
        let mv = {
            let mut human = HumanPlayer::new(Mark::Cross, input, &mut output);
            human.get_move(&game).unwrap().unwrap()
        };
        assert_eq!(mv.cell_index, 1);
        assert_eq!(mv.mark, Mark::Cross);

        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("coordinate like B2"));
        assert!(transcript.contains("already occupied"));
    }

    #[test]
    fn test_human_reports_closed_input() {
        let mut human = HumanPlayer::new(Mark::Cross, Cursor::new(""), Vec::new());
        let err = human.get_move(&GameState::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_make_move_checks_turn() {
        let mut naught = MinimaxComputerPlayer::new(Mark::Naught);
        assert!(matches!(
            naught.make_move(&GameState::default()),
            Err(Error::NotYourTurn { mark: Mark::Naught })
        ));
    }

    #[test]
    fn test_make_move_rejects_finished_game() {
        let mut cross = RandomComputerPlayer::with_seed(Mark::Cross, 1);
        assert!(matches!(
            cross.make_move(&state("XOXXOXOXO")),
            Err(Error::GameOver)
        ));
    }

    #[test]
    fn test_minimax_player_wins_when_possible() {
        let mut cross = MinimaxComputerPlayer::exhaustive(Mark::Cross);
        let next = cross.make_move(&state("XX OO    ")).unwrap();
        assert_eq!(next.winner(), Some(Mark::Cross));
        assert_eq!(cross.name(), "Minimax (X)");
    }

    #[test]
    fn test_random_player_places_own_mark() {
        let mut naught = RandomComputerPlayer::with_seed(Mark::Naught, 9);
        let before = state("X        ");
        let after = naught.make_move(&before).unwrap();
        assert_eq!(after.grid.o_count(), 1);
        assert_eq!(after.grid.x_count(), 1);
        assert_eq!(after.grid.get(0), before.grid.get(0));
    }
}
