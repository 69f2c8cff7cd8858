//! Play command - run a match between two players

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::{MatchConfig, PlayerKind},
        output::{ConsoleRenderer, print_kv},
    },
    engine::TicTacToe,
    tictactoe::Mark,
};

#[derive(Parser, Debug)]
#[command(about = "Play a game of tic-tac-toe")]
pub struct PlayArgs {
    /// Who plays X
    #[arg(short = 'X', long = "cross", value_enum)]
    pub cross: Option<PlayerKind>,

    /// Who plays O
    #[arg(short = 'O', long = "naught", value_enum)]
    pub naught: Option<PlayerKind>,

    /// Mark that moves first (`x` or `o`)
    #[arg(long, short = 's')]
    pub starting_mark: Option<Mark>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Continue from a 9-character layout; `.` or `_` mark empty cells
    #[arg(long)]
    pub grid: Option<String>,

    /// Pause after each frame, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Keep previous frames instead of clearing the screen
    #[arg(long)]
    pub no_clear: bool,

    /// JSON file with default settings; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl PlayArgs {
    /// Merge the optional config file with explicit flags.
    pub fn resolve(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => MatchConfig::default(),
        };

        if let Some(cross) = self.cross {
            config.cross = cross;
        }
        if let Some(naught) = self.naught {
            config.naught = naught;
        }
        if let Some(mark) = self.starting_mark {
            config.starting_mark = mark;
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(grid) = &self.grid {
            config = config.with_grid(grid.clone());
        }
        if let Some(delay_ms) = self.delay_ms {
            config = config.with_delay_ms(delay_ms);
        }
        Ok(config)
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let config = args.resolve()?;
    let state = config
        .initial_state()
        .context("cannot start from the given grid")?;

    if config.is_slow() && state.grid.empty_count() > 6 {
        println!("Both players use the unpruned minimax search.");
        println!("Each early move explores the full game tree and may take a while.");
    }

    let (cross, naught) = config.build_players();
    let mut renderer = ConsoleRenderer::new(Duration::from_millis(config.delay_ms));
    if args.no_clear {
        renderer = renderer.without_clearing();
    }

    let mut game = TicTacToe::new(cross, naught, renderer)?;
    let final_state = game.play_from(state)?;

    println!();
    print_kv("Moves played", &(9 - final_state.grid.empty_count()).to_string());
    print_kv(
        "Result",
        &match final_state.winner() {
            Some(mark) => format!("{mark} wins"),
            None => "tie".to_string(),
        },
    );
    Ok(())
}
