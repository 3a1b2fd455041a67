// grid.rs - Bounded Game of Life grid and generation stepping
//
// The outermost row and column on each side form a border that is never
// stepped. Border cells still count as neighbours of the interior, but they
// keep whatever value they were seeded with for the life of the simulation.

use crate::error::{LifeError, Result};
use crate::matrix::CellMatrix;

pub const GRID_START: usize = 1; // First interior row/column

/// Target position of a placement, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Default for Position {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

/// Which corner of a pattern lands on its position: each component is 0 or 1
/// and scales by the pattern's height/width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub row: u8,
    pub col: u8,
}

impl Anchor {
    pub const TOP_LEFT: Anchor = Anchor { row: 0, col: 0 };
    pub const BOTTOM_RIGHT: Anchor = Anchor { row: 1, col: 1 };

    /// `None` unless both components are 0 or 1.
    pub fn new(row: i64, col: i64) -> Option<Self> {
        match (row, col) {
            (0 | 1, 0 | 1) => Some(Self {
                row: row as u8,
                col: col as u8,
            }),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: CellMatrix,
}

impl Grid {
    /// All-dead grid; its dimensions never change afterwards.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            cells: CellMatrix::dead(height, width),
        }
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.cells.get(row, col)
    }

    /// Sets one cell. Panics when out of range, like slice indexing.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        assert!(
            row < self.height() && col < self.width(),
            "cell ({row}, {col}) outside {}x{} grid",
            self.height(),
            self.width()
        );
        self.cells.set(row, col, alive);
    }

    pub fn population(&self) -> usize {
        self.cells.population()
    }

    pub fn cells(&self) -> &CellMatrix {
        &self.cells
    }

    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row < GRID_START
            || col < GRID_START
            || row + 1 >= self.height()
            || col + 1 >= self.width()
    }

    /// Overlays the live cells of `pattern` so that its `anchor` corner sits
    /// at `position`. Dead pattern cells leave the grid alone.
    ///
    /// The whole span is checked first: an out-of-range placement writes nothing.
    pub fn place(&mut self, pattern: &CellMatrix, anchor: Anchor, position: Position) -> Result<()> {
        // Widened so that any i64 position and usize extent stay exact.
        let (ph, pw) = (pattern.height() as i128, pattern.width() as i128);
        let top = i128::from(position.row) - ph * i128::from(anchor.row);
        let left = i128::from(position.col) - pw * i128::from(anchor.col);

        let fits = top >= 0
            && left >= 0
            && top + ph <= self.height() as i128
            && left + pw <= self.width() as i128;
        if !fits {
            return Err(LifeError::PlacementOutOfBounds {
                top,
                left,
                height: pattern.height(),
                width: pattern.width(),
                grid_height: self.height(),
                grid_width: self.width(),
            });
        }

        let (top, left) = (top as usize, left as usize);
        for (row, col) in pattern.live_cells() {
            self.cells.set(top + row, left + col, true);
        }
        Ok(())
    }

    /// Live neighbours among the 8 Moore neighbours of an interior cell.
    fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let neighbors = [
            (row - 1, col - 1), (row - 1, col), (row - 1, col + 1),
            (row, col - 1),                     (row, col + 1),
            (row + 1, col - 1), (row + 1, col), (row + 1, col + 1),
        ];
        neighbors
            .iter()
            .filter(|&&(nr, nc)| self.cells.get(nr, nc))
            .count() as u8
    }

    /// Writes the next generation of every interior cell into `next`.
    /// `next` must already hold this grid's border.
    fn step_into(&self, next: &mut Grid) {
        let row_end = self.height().saturating_sub(1); // End of interior (exclusive)
        let col_end = self.width().saturating_sub(1);

        for row in GRID_START..row_end {
            for col in GRID_START..col_end {
                let count = self.live_neighbors(row, col);
                let next_state = match (self.cells.get(row, col), count) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
                next.cells.set(row, col, next_state);
            }
        }
    }
}

/// A grid plus its generation counter.
#[derive(Debug, Clone)]
pub struct Simulation {
    tick: u64,
    current: Grid,
    next: Grid,
}

impl Simulation {
    pub const FIRST_TICK: u64 = 1;

    pub fn new(grid: Grid) -> Self {
        Self {
            tick: Self::FIRST_TICK,
            next: grid.clone(),
            current: grid,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn population(&self) -> usize {
        self.current.population()
    }

    /// Advances one generation and returns the new current grid.
    pub fn step(&mut self) -> &Grid {
        // Start from the current state so the border carries over unchanged.
        self.next.clone_from(&self.current);
        self.current.step_into(&mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.tick += 1;

        tracing::trace!(tick = self.tick, population = self.current.population(), "stepped");
        &self.current
    }

}
