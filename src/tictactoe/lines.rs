//! Winning line detection

use super::{Cell, Mark};

/// Winning line indices on the 3x3 grid, in detection order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// First completed line in table order, with the mark that completed it.
    ///
    /// A single placement can complete two lines at once; the earlier one in
    /// [`WINNING_LINES`] is reported.
    pub fn winning_line(cells: &[Cell; 9]) -> Option<(Mark, [usize; 3])> {
        WINNING_LINES.iter().find_map(|&line| {
            let [a, b, c] = line;
            let mark = cells[a].mark()?;
            (cells[b] == cells[a] && cells[c] == cells[a]).then_some((mark, line))
        })
    }

    /// Check if a mark has three in a row anywhere on the grid
    pub fn has_won(cells: &[Cell; 9], mark: Mark) -> bool {
        let target = mark.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }
}
