//! Best command - report the optimal move for a position

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::normalize_layout,
        output::{coordinate, format_board, print_kv},
    },
    minimax::Search,
    tictactoe::{GameState, Mark, Score, TIE_SCORE, WIN_SCORE},
};

#[derive(Parser, Debug)]
#[command(about = "Find the optimal move for a position")]
pub struct BestArgs {
    /// 9-character layout; `.` or `_` mark empty cells
    #[arg(long)]
    pub grid: String,

    /// Mark that moved first in this game (`x` or `o`)
    #[arg(long, short = 's', default_value = "x")]
    pub starting_mark: Mark,

    /// Use the plain search instead of alpha-beta pruning
    #[arg(long)]
    pub unpruned: bool,

    /// Print the answer as JSON
    #[arg(long)]
    pub json: bool,
}

/// Answer of the best command
#[derive(Debug, Serialize)]
pub struct BestMoveReport {
    pub mark: Mark,
    pub cell_index: usize,
    pub coordinate: String,
    pub score: Score,
    pub grid_after: String,
}

/// Validate the position and search it.
pub fn best_move_report(layout: &str, starting_mark: Mark, search: Search) -> Result<BestMoveReport> {
    let state = GameState::from_layout(&normalize_layout(layout), starting_mark)
        .with_context(|| format!("invalid position '{layout}'"))?;

    let Some((mv, score)) = search.best_move(&state) else {
        bail!("the game is already over: no move to suggest");
    };

    Ok(BestMoveReport {
        mark: mv.mark,
        cell_index: mv.cell_index,
        coordinate: coordinate(mv.cell_index),
        score,
        grid_after: mv.after_state.grid.as_string(),
    })
}

pub fn execute(args: BestArgs) -> Result<()> {
    let search = if args.unpruned {
        Search::Exhaustive
    } else {
        Search::AlphaBeta
    };
    let report = best_move_report(&args.grid, args.starting_mark, search)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let after = GameState::from_layout(&report.grid_after, args.starting_mark)?;
    println!("{}", format_board(&after, true));
    print_kv("Mark", &report.mark.to_string());
    print_kv(
        "Best cell",
        &format!("{} ({})", report.cell_index, report.coordinate),
    );
    let outcome = if report.score == WIN_SCORE {
        "win"
    } else if report.score == TIE_SCORE {
        "tie"
    } else {
        "loss"
    };
    print_kv("Outcome", outcome);
    Ok(())
}
