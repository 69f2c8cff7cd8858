//! Grid representation and cell-level operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of cells on the 3x3 grid
pub const CELL_COUNT: usize = 9;

/// One of the two player marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    Cross,
    Naught,
}

impl Mark {
    /// Both marks, cross first
    pub const ALL: [Mark; 2] = [Mark::Cross, Mark::Naught];

    /// Get the opposing mark
    pub fn other(self) -> Mark {
        match self {
            Mark::Cross => Mark::Naught,
            Mark::Naught => Mark::Cross,
        }
    }

    /// Display symbol used in grid layouts
    pub fn symbol(self) -> char {
        match self {
            Mark::Cross => 'X',
            Mark::Naught => 'O',
        }
    }

    /// Convert mark to the cell it occupies
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::Cross => Cell::Cross,
            Mark::Naught => Cell::Naught,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = crate::Error;

    /// Accepts `x`/`o` and `cross`/`naught` (also `nought`), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "cross" => Ok(Mark::Cross),
            "o" | "naught" | "nought" => Ok(Mark::Naught),
            other => Err(crate::Error::InvalidConfiguration {
                message: format!("unknown mark '{other}' (expected 'x' or 'o')"),
            }),
        }
    }
}

/// A cell on the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Cross,
    Naught,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Cross => 'X',
            Cell::Naught => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            ' ' => Some(Cell::Empty),
            'X' => Some(Cell::Cross),
            'O' => Some(Cell::Naught),
            _ => None,
        }
    }

    /// The mark occupying this cell, if any
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Cross => Some(Mark::Cross),
            Cell::Naught => Some(Mark::Naught),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Count of each cell kind on a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
    empty: usize,
}

/// The 3x3 playing grid.
///
/// `Grid` is an immutable value: placing a mark produces a new grid and
/// leaves the original untouched. Counts are recomputed from the cells on
/// every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Grid {
    /// Build a grid from already-typed cells
    pub fn new(cells: [Cell; CELL_COUNT]) -> Self {
        Grid { cells }
    }

    /// A grid with every cell empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a 9-character layout such as `"XXXOO    "`.
    ///
    /// Each character must be `'X'`, `'O'` or `' '` (empty).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGridLength`](crate::Error::InvalidGridLength) if
    /// the layout is not exactly 9 characters long and
    /// [`Error::InvalidCellCharacter`](crate::Error::InvalidCellCharacter) for
    /// any other symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use noughts::tictactoe::{Cell, Grid};
    ///
    /// let grid = Grid::parse("XXXOO    ").unwrap();
    /// assert_eq!(grid.x_count(), 3);
    /// assert_eq!(grid.get(3), Some(Cell::Naught));
    /// assert!(Grid::parse("XXX").is_err());
    /// ```
    pub fn parse(layout: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = layout.chars().collect();
        Self::parse_cells(&chars, layout).map(Grid::new)
    }

    /// Helper: Parse exactly 9 cells from a slice of characters.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; CELL_COUNT], crate::Error> {
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidGridLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    /// Helper: Count pieces on the grid.
    fn count_pieces(&self) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in &self.cells {
            match cell {
                Cell::Cross => count.x += 1,
                Cell::Naught => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// All nine cells in index order
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Get cell at position (0-8), `None` when out of range
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn x_count(&self) -> usize {
        self.count_pieces().x
    }

    pub fn o_count(&self) -> usize {
        self.count_pieces().o
    }

    pub fn empty_count(&self) -> usize {
        self.count_pieces().empty
    }

    /// Number of cells holding `mark`
    pub fn count(&self, mark: Mark) -> usize {
        match mark {
            Mark::Cross => self.x_count(),
            Mark::Naught => self.o_count(),
        }
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place `mark` at `index`, returning the new grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`](crate::Error::InvalidPosition) for an
    /// index past 8 and [`Error::InvalidMove`](crate::Error::InvalidMove) if the
    /// cell is already occupied.
    #[must_use = "with_cell returns a new grid; the original is unchanged"]
    pub fn with_cell(&self, index: usize, mark: Mark) -> Result<Grid, crate::Error> {
        match self.get(index) {
            None => Err(crate::Error::InvalidPosition { position: index }),
            Some(Cell::Empty) => Ok(self.place(index, mark)),
            Some(_) => Err(crate::Error::InvalidMove { position: index }),
        }
    }

    /// Copy of this grid with one cell overwritten; the caller guarantees the
    /// index is in range.
    pub(crate) fn place(&self, index: usize, mark: Mark) -> Grid {
        let mut cells = self.cells;
        cells[index] = mark.to_cell();
        Grid { cells }
    }

    /// The 9-character layout, e.g. `"X O  X   "`
    pub fn as_string(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl FromStr for Grid {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            let c = if cell.is_empty() { '.' } else { cell.to_char() };
            write!(f, "{c}")?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
