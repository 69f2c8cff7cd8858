//! Match configuration shared by the CLI commands

use std::{fs, path::Path};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    minimax::Search,
    players::{HumanPlayer, MinimaxComputerPlayer, Player, RandomComputerPlayer},
    tictactoe::{GameState, Mark},
};

/// Who controls a mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves typed on standard input
    Human,
    /// Uniformly random legal moves
    Random,
    /// Optimal moves from the plain minimax search (slow from an empty grid)
    Minimax,
    /// Optimal moves from the alpha-beta search
    Pruned,
}

impl PlayerKind {
    /// Build a player of this kind for `mark`.
    ///
    /// `seed` only affects random players; `None` seeds from entropy.
    pub fn build(self, mark: Mark, seed: Option<u64>) -> Box<dyn Player> {
        match self {
            PlayerKind::Human => Box::new(HumanPlayer::stdin(mark)),
            PlayerKind::Random => Box::new(match seed {
                Some(seed) => RandomComputerPlayer::with_seed(mark, seed),
                None => RandomComputerPlayer::new(mark),
            }),
            PlayerKind::Minimax => Box::new(MinimaxComputerPlayer::with_search(
                mark,
                Search::Exhaustive,
            )),
            PlayerKind::Pruned => Box::new(MinimaxComputerPlayer::with_search(
                mark,
                Search::AlphaBeta,
            )),
        }
    }
}

/// Settings for one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Controller of the X mark
    pub cross: PlayerKind,

    /// Controller of the O mark
    pub naught: PlayerKind,

    /// Mark that moves first
    pub starting_mark: Mark,

    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Optional 9-character layout to continue from
    pub grid: Option<String>,

    /// Pause after each rendered frame, in milliseconds
    pub delay_ms: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cross: PlayerKind::Human,
            naught: PlayerKind::Pruned,
            starting_mark: Mark::Cross,
            seed: None,
            grid: None,
            delay_ms: 0,
        }
    }
}

impl MatchConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Set both controllers.
    pub fn with_players(mut self, cross: PlayerKind, naught: PlayerKind) -> Self {
        self.cross = cross;
        self.naught = naught;
        self
    }

    /// Set the mark that moves first.
    pub fn with_starting_mark(mut self, mark: Mark) -> Self {
        self.starting_mark = mark;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Continue from a given layout instead of an empty grid.
    pub fn with_grid(mut self, layout: impl Into<String>) -> Self {
        self.grid = Some(layout.into());
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Players for X and O; the O player's seed is offset so the two random
    /// players never mirror each other.
    pub fn build_players(&self) -> (Box<dyn Player>, Box<dyn Player>) {
        (
            self.cross.build(Mark::Cross, self.seed),
            self.naught
                .build(Mark::Naught, self.seed.map(|s| s.wrapping_add(1))),
        )
    }

    /// The validated state the match starts from.
    ///
    /// # Errors
    ///
    /// Returns a grid or game-state validation error for a bad `grid`.
    pub fn initial_state(&self) -> Result<GameState> {
        match &self.grid {
            Some(layout) => GameState::from_layout(&normalize_layout(layout), self.starting_mark),
            None => Ok(GameState::start(self.starting_mark)),
        }
    }

    /// True when both sides use the unpruned search, which takes a while
    /// from an early position.
    pub fn is_slow(&self) -> bool {
        self.cross == PlayerKind::Minimax && self.naught == PlayerKind::Minimax
    }
}

/// Accept `.` and `_` as empty cells on the command line, where trailing
/// spaces are easy to lose.
pub fn normalize_layout(layout: &str) -> String {
    layout
        .chars()
        .map(|c| if matches!(c, '.' | '_') { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.cross, PlayerKind::Human);
        assert_eq!(config.naught, PlayerKind::Pruned);
        assert_eq!(config.starting_mark, Mark::Cross);
        assert_eq!(config.initial_state().unwrap(), GameState::default());
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::default()
            .with_players(PlayerKind::Random, PlayerKind::Minimax)
            .with_starting_mark(Mark::Naught)
            .with_seed(5)
            .with_delay_ms(20);
        assert_eq!(config.cross, PlayerKind::Random);
        assert_eq!(config.naught, PlayerKind::Minimax);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.delay_ms, 20);
        assert!(!config.is_slow());

        let (cross, naught) = config.build_players();
        assert_eq!(cross.mark(), Mark::Cross);
        assert_eq!(naught.mark(), Mark::Naught);
        assert_eq!(naught.name(), "Minimax (O)");
    }

    #[test]
    fn test_initial_state_from_grid() {
        let config = MatchConfig::default().with_grid("XO.......");
        let state = config.initial_state().unwrap();
        assert_eq!(state.grid.as_string(), "XO       ");

        let invalid = MatchConfig::default().with_grid("OO_______");
        assert!(matches!(
            invalid.initial_state(),
            Err(Error::InvalidGameState { .. })
        ));

        let malformed = MatchConfig::default().with_grid("XO");
        assert!(malformed.initial_state().unwrap_err().is_validation());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"cross": "random", "naught": "minimax", "starting_mark": "Naught", "seed": 3}}"#
        )
        .unwrap();

        let config = MatchConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.cross, PlayerKind::Random);
        assert_eq!(config.naught, PlayerKind::Minimax);
        assert_eq!(config.starting_mark, Mark::Naught);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.delay_ms, 0);
    }

    #[test]
    fn test_from_json_file_errors() {
        let missing = MatchConfig::from_json_file(Path::new("/nonexistent/noughts.json"));
        assert!(matches!(missing, Err(Error::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cross": "wizard"}}"#).unwrap();
        assert!(matches!(
            MatchConfig::from_json_file(file.path()),
            Err(Error::Serialization(_))
        ));
    }
}
