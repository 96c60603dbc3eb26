//! Grid module - the digit matrix every other component acts on
//!
//! The grid is R rows by C columns of digits, stored as a flat row-major
//! vector. Coordinates are (row, col) where row 0 is the top and gravity pulls
//! toward the highest row index.
//!
//! Cells are `Option<Digit>`: `None` only appears while a compaction is in
//! progress. After every completed operation [`Grid::is_full`] holds.

use crate::error::{CoreError, CoreResult};
use crate::rng::DigitSource;
use crate::types::{Cell, Coord, Digit};

/// The digit grid, flat row-major storage (row * cols + col)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid and fill every cell from `rng`, row by row.
    pub fn new(rows: usize, cols: usize, rng: &mut impl DigitSource) -> CoreResult<Self> {
        Self::check_dimensions(rows, cols)?;
        let cells = (0..rows * cols).map(|_| Some(rng.next_digit())).collect();
        Ok(Self { rows, cols, cells })
    }

    /// Build a grid from explicit rows of digits.
    ///
    /// All rows must have the same non-zero length and every value must be a
    /// digit.
    pub fn from_rows(rows: &[Vec<Digit>]) -> CoreResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        Self::check_dimensions(height, width)?;
        if rows.iter().any(|r| r.len() != width) || rows.iter().flatten().any(|&d| d > 9) {
            return Err(CoreError::InvalidDimensions {
                rows: height,
                cols: width,
            });
        }
        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.iter().flatten().map(|&d| Some(d)).collect(),
        })
    }

    fn check_dimensions(rows: usize, cols: usize) -> CoreResult<()> {
        if rows == 0 || cols == 0 {
            return Err(CoreError::InvalidDimensions { rows, cols });
        }
        Ok(())
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        Some(coord.row * self.cols + coord.col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if a coordinate lies on the grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Clamp a signed position onto the grid.
    ///
    /// Callers translating external positions (pointer, cursor) use this before
    /// handing coordinates to the selection resolver.
    pub fn clamp(&self, row: isize, col: isize) -> Coord {
        Coord::new(
            row.clamp(0, self.rows as isize - 1) as usize,
            col.clamp(0, self.cols as isize - 1) as usize,
        )
    }

    /// Get cell at `coord`
    /// Returns None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Digit at `coord`, or None if out of bounds or empty.
    pub fn digit(&self, coord: Coord) -> Option<Digit> {
        self.get(coord).flatten()
    }

    /// Set cell at `coord`
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Take the cell's digit, leaving it empty.
    pub(crate) fn take(&mut self, coord: Coord) -> Option<Digit> {
        let idx = self.index(coord)?;
        self.cells[idx].take()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Column `col` read top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        let start = if col < cols { col } else { self.cells.len() };
        self.cells[start..].iter().step_by(cols).copied()
    }

    /// Copy digits into a row-major buffer, empty cells as `u8::MAX`.
    pub fn write_digits(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|c| c.unwrap_or(u8::MAX)));
    }

    /// Convert to nested rows for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(<[Cell]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DigitSequence;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(8, 16, &mut DigitSequence::repeat(0)).unwrap();
        assert_eq!(grid.index(Coord::new(0, 0)), Some(0));
        assert_eq!(grid.index(Coord::new(0, 15)), Some(15));
        assert_eq!(grid.index(Coord::new(1, 0)), Some(16));
        assert_eq!(grid.index(Coord::new(7, 15)), Some(127));
        assert_eq!(grid.index(Coord::new(8, 0)), None);
        assert_eq!(grid.index(Coord::new(0, 16)), None);
    }

    #[test]
    fn test_new_fills_row_major_from_source() {
        let mut seq = DigitSequence::new(vec![1, 2, 3, 4, 5, 6]);
        let grid = Grid::new(2, 3, &mut seq).unwrap();
        assert_eq!(
            grid.to_rows(),
            vec![
                vec![Some(1), Some(2), Some(3)],
                vec![Some(4), Some(5), Some(6)]
            ]
        );
        assert!(grid.is_full());
        assert_eq!(seq.drawn(), 6);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut seq = DigitSequence::repeat(1);
        assert_eq!(
            Grid::new(0, 4, &mut seq),
            Err(CoreError::InvalidDimensions { rows: 0, cols: 4 })
        );
        assert!(Grid::from_rows(&[]).is_err());
        assert!(Grid::from_rows(&[vec![1, 2], vec![3]]).is_err());
        assert!(Grid::from_rows(&[vec![1, 12]]).is_err());
    }

    #[test]
    fn test_take_leaves_empty_cell() {
        let mut grid = Grid::from_rows(&[vec![4, 5]]).unwrap();
        assert_eq!(grid.take(Coord::new(0, 1)), Some(5));
        assert_eq!(grid.get(Coord::new(0, 1)), Some(None));
        assert_eq!(grid.take(Coord::new(0, 1)), None);
        assert!(!grid.is_full());
    }

    #[test]
    fn test_column_reads_top_to_bottom() {
        let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
        let col: Vec<Cell> = grid.column(1).collect();
        assert_eq!(col, vec![Some(2), Some(4), Some(6)]);
        assert_eq!(grid.column(2).count(), 0);
    }

    #[test]
    fn test_clamp() {
        let grid = Grid::from_rows(&vec![vec![0; 16]; 8]).unwrap();
        assert_eq!(grid.clamp(-3, 4), Coord::new(0, 4));
        assert_eq!(grid.clamp(9, 20), Coord::new(7, 15));
        assert_eq!(grid.clamp(2, -1), Coord::new(2, 0));
    }

    #[test]
    fn test_write_digits() {
        let mut grid = Grid::from_rows(&[vec![7, 8]]).unwrap();
        grid.set(Coord::new(0, 0), None);
        let mut out = vec![1, 2, 3];
        grid.write_digits(&mut out);
        assert_eq!(out, vec![u8::MAX, 8]);
    }
}
