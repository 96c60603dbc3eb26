//! Gravity module - remove cells, compact columns, refill from the top
//!
//! Removal empties the given cells. Every column that lost a cell is then
//! compacted on its own: surviving digits sink toward the highest row index in
//! their original top-to-bottom order, and the vacated top cells are refilled
//! from the digit source. Columns that lost nothing are not touched.
//!
//! ```text
//! before     remove row 1     after
//!   a            a             new
//!   x            .              a
//!   b            b              b
//!   c            c              c
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::grid::Grid;
use crate::rng::DigitSource;
use crate::types::{Coord, Digit};

/// What a compaction pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refill {
    /// `(col, new digits written)` for every compacted column, left to right.
    pub columns: Vec<(usize, usize)>,
}

impl Refill {
    /// Total cells refilled across all columns.
    pub fn total(&self) -> usize {
        self.columns.iter().map(|&(_, n)| n).sum()
    }

    /// New digits written into `col` (zero if it was not touched).
    pub fn in_column(&self, col: usize) -> usize {
        self.columns
            .iter()
            .find(|&&(c, _)| c == col)
            .map_or(0, |&(_, n)| n)
    }
}

/// Remove `coords` from `grid`, compact each affected column, refill the top.
///
/// Coordinates outside the grid are skipped; removing an already-empty or
/// repeated cell is a no-op for that cell.
pub fn compact_and_refill(grid: &mut Grid, coords: &[Coord], rng: &mut impl DigitSource) -> Refill {
    let mut affected = BTreeSet::new();
    for &coord in coords {
        if grid.contains(coord) {
            grid.set(coord, None);
            affected.insert(coord.col);
        }
    }

    let mut refill = Refill::default();
    for col in affected {
        let written = compact_column(grid, col, rng);
        refill.columns.push((col, written));
    }

    debug!(
        columns = refill.columns.len(),
        refilled = refill.total(),
        "compacted grid"
    );
    refill
}

/// Compact one column and fill its empty top. Returns how many digits were generated.
fn compact_column(grid: &mut Grid, col: usize, rng: &mut impl DigitSource) -> usize {
    let rows = grid.rows();
    let survivors: Vec<Digit> = grid.column(col).flatten().collect();
    let missing = rows - survivors.len();

    for row in 0..missing {
        grid.set(Coord::new(row, col), Some(rng.next_digit()));
    }
    for (offset, digit) in survivors.into_iter().enumerate() {
        grid.set(Coord::new(missing + offset, col), Some(digit));
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DigitSequence;
    use crate::types::Cell;

    fn column(grid: &Grid, col: usize) -> Vec<Cell> {
        grid.column(col).collect()
    }

    #[test]
    fn test_order_preserved_new_on_top() {
        // Column 0 top-to-bottom: [1, 9, 2, 3]; remove the 9.
        let mut grid = Grid::from_rows(&[vec![1, 5], vec![9, 5], vec![2, 5], vec![3, 5]]).unwrap();
        let mut rng = DigitSequence::repeat(0);

        let refill = compact_and_refill(&mut grid, &[Coord::new(1, 0)], &mut rng);

        assert_eq!(column(&grid, 0), vec![Some(0), Some(1), Some(2), Some(3)]);
        assert_eq!(column(&grid, 1), vec![Some(5); 4]);
        assert_eq!(refill.columns, vec![(0, 1)]);
        assert_eq!(rng.drawn(), 1);
    }

    #[test]
    fn test_rectangle_removal_refills_per_column() {
        let mut grid = Grid::from_rows(&[
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![7, 8, 9],
        ])
        .unwrap();
        let mut rng = DigitSequence::new(vec![0, 1, 2, 3]);

        // Remove the bottom two rows of columns 1 and 2.
        let coords = [
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(2, 1),
            Coord::new(2, 2),
        ];
        let refill = compact_and_refill(&mut grid, &coords, &mut rng);

        assert_eq!(
            grid.to_rows(),
            vec![
                vec![Some(1), Some(0), Some(2)],
                vec![Some(4), Some(1), Some(3)],
                vec![Some(7), Some(2), Some(3)],
            ]
        );
        assert_eq!(refill.in_column(0), 0);
        assert_eq!(refill.in_column(1), 2);
        assert_eq!(refill.in_column(2), 2);
        assert_eq!(refill.total(), 4);
        assert!(grid.is_full());
    }

    #[test]
    fn test_duplicates_and_out_of_bounds_are_ignored() {
        let mut grid = Grid::from_rows(&[vec![1], vec![2]]).unwrap();
        let mut rng = DigitSequence::repeat(8);
        let refill = compact_and_refill(
            &mut grid,
            &[Coord::new(1, 0), Coord::new(1, 0), Coord::new(5, 5)],
            &mut rng,
        );
        assert_eq!(column(&grid, 0), vec![Some(8), Some(1)]);
        assert_eq!(refill.total(), 1);
    }

    #[test]
    fn test_whole_column_removed() {
        let mut grid = Grid::from_rows(&[vec![1], vec![2], vec![3]]).unwrap();
        let mut rng = DigitSequence::new(vec![4, 5, 6]);
        let coords = [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)];
        compact_and_refill(&mut grid, &coords, &mut rng);
        assert_eq!(column(&grid, 0), vec![Some(4), Some(5), Some(6)]);
    }

    #[test]
    fn test_empty_removal_is_noop() {
        let mut grid = Grid::from_rows(&[vec![1, 2]]).unwrap();
        let before = grid.clone();
        let mut rng = DigitSequence::repeat(0);
        let refill = compact_and_refill(&mut grid, &[], &mut rng);
        assert_eq!(grid, before);
        assert_eq!(refill, Refill::default());
        assert_eq!(rng.drawn(), 0);
    }

    #[test]
    fn test_non_adjacent_removal_in_one_column() {
        let mut grid =
            Grid::from_rows(&[vec![1], vec![2], vec![3], vec![4], vec![5]]).unwrap();
        let mut rng = DigitSequence::new(vec![8, 9]);

        let refill = compact_and_refill(&mut grid, &[Coord::new(0, 0), Coord::new(2, 0)], &mut rng);

        assert_eq!(
            column(&grid, 0),
            vec![Some(8), Some(9), Some(2), Some(4), Some(5)]
        );
        assert_eq!(refill.columns, vec![(0, 2)]);
    }
}
