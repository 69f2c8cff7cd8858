//! Console rendering for the CLI

use std::{thread, time::Duration};

use colored::Colorize;

use crate::{engine::Renderer, tictactoe::GameState};

/// Draws each state to stdout, optionally pausing between frames
pub struct ConsoleRenderer {
    delay: Duration,
    clear_screen: bool,
}

impl ConsoleRenderer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            clear_screen: true,
        }
    }

    /// Keep earlier frames on screen instead of clearing between them
    pub fn without_clearing(mut self) -> Self {
        self.clear_screen = false;
        self
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, state: &GameState) {
        if self.clear_screen {
            print!("\x1b[2J\x1b[H");
        }
        println!("{}", format_board(state, true));
        println!("{}", status_line(state));
        if !state.game_over() && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Grid with column letters and row numbers; winning cells are highlighted
/// when `color` is set.
pub fn format_board(state: &GameState, color: bool) -> String {
    let winning = state.winning_cells();
    let mut out = String::from("    A   B   C\n");
    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let symbol = state.grid.cells()[index].to_char().to_string();
                if color && winning.contains(&index) {
                    symbol.green().bold().to_string()
                } else {
                    symbol
                }
            })
            .collect();
        out.push_str(&format!("{}   {}\n", row + 1, cells.join(" │ ")));
        if row < 2 {
            out.push_str("   ───┼───┼───\n");
        }
    }
    out
}

/// One-line summary of whose turn it is or how the game ended
pub fn status_line(state: &GameState) -> String {
    match state.winner() {
        Some(mark) => format!("{mark} wins \u{1F973}"),
        None if state.tie() => "No one wins this time \u{1F633}".to_string(),
        None => format!("{} to play", state.current_mark()),
    }
}

/// Grid coordinate such as `B2` for a cell index
pub fn coordinate(index: usize) -> String {
    let column = (b'A' + (index % 3) as u8) as char;
    format!("{column}{}", index / 3 + 1)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:16} {}", format!("{}:", key), value);
}
