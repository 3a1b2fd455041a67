// matrix.rs - Rectangular cell matrix shared by patterns and grids

use std::fmt;

/// A rectangular block of cells stored row-major in one buffer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CellMatrix {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl CellMatrix {
    /// All-dead matrix of the given size.
    pub fn dead(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![false; height * width],
        }
    }

    /// Builds a matrix from rows, padding short rows on the right with dead cells.
    pub fn from_rows<R, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[bool]>,
    {
        let rows: Vec<R> = rows.into_iter().collect();
        let height = rows.len();
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);

        let mut matrix = Self::dead(height, width);
        for (row, cells) in rows.iter().enumerate() {
            for (col, &alive) in cells.as_ref().iter().enumerate() {
                matrix.set(row, col, alive);
            }
        }
        matrix
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height && col < self.width);
        row * self.width + col
    }

    /// Cell state; out-of-range coordinates read as dead.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[self.index(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let index = self.index(row, col);
        self.cells[index] = alive;
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks(0) panics, and a zero-width matrix has no cells anyway
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Coordinates of every live cell in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| (i / self.width, i % self.width))
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// One quarter-turn clockwise: an `h x w` matrix becomes `w x h`.
    pub fn rotated_cw(&self) -> Self {
        let mut out = Self::dead(self.width, self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.set(col, self.height - 1 - row, self.get(row, col));
            }
        }
        out
    }

    /// Reverses the order of the rows (top-bottom mirror).
    pub fn flipped_rows(&self) -> Self {
        let mut out = Self::dead(self.height, self.width);
        for row in 0..self.height {
            for col in 0..self.width {
                out.set(self.height - 1 - row, col, self.get(row, col));
            }
        }
        out
    }

    /// Reverses the order of the columns (left-right mirror).
    pub fn flipped_cols(&self) -> Self {
        let mut out = Self::dead(self.height, self.width);
        for row in 0..self.height {
            for col in 0..self.width {
                out.set(row, self.width - 1 - col, self.get(row, col));
            }
        }
        out
    }
}

impl fmt::Debug for CellMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellMatrix {}x{}", self.height, self.width)?;
        for row in self.rows() {
            let line: String = row.iter().map(|&a| if a { 'O' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
