//! Selection analysis - reduces a rectangle of cells to the numbers rules look at
//!
//! A [`SelectionStats`] is a throwaway snapshot: it is computed for a single
//! bin decision and dropped right after. Rule predicates only ever see this
//! type, never the grid.

use tracing::debug;

use crate::grid::Grid;
use crate::selection::SelectionRect;
use crate::types::{Coord, Digit, DIGIT_COUNT};

/// Aggregate view of a rectangular selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStats {
    pub rows: usize,
    pub cols: usize,
    /// Digits in row-major order, `rows * cols` long.
    pub numbers: Vec<Digit>,
    /// Occurrences of each digit, indexed by digit.
    pub counts: [u32; DIGIT_COUNT],
    pub sum: u32,
    pub top_left: Digit,
    pub top_right: Digit,
    pub bottom_left: Digit,
    pub bottom_right: Digit,
}

impl SelectionStats {
    /// Occurrences of `digit`; zero for anything that is not a digit.
    pub fn count(&self, digit: Digit) -> u32 {
        self.counts.get(digit as usize).copied().unwrap_or(0)
    }

    /// Digit at `(row, col)` relative to the selection's top-left corner.
    pub fn cell(&self, row: usize, col: usize) -> Option<Digit> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.numbers.get(row * self.cols + col).copied()
    }

    pub fn is_shape(&self, rows: usize, cols: usize) -> bool {
        self.rows == rows && self.cols == cols
    }
}

/// Analyze the bounding box of `coords` on `grid`.
///
/// Returns None for an empty coordinate set, meaning there is nothing to
/// evaluate. The bounding box is used as-is: coordinates need not list every
/// covered cell. A box reaching an empty or out-of-bounds cell also yields
/// None.
pub fn analyze_selection(coords: &[Coord], grid: &Grid) -> Option<SelectionStats> {
    let rect = SelectionRect::bounding(coords)?;
    analyze_rect(rect, grid)
}

/// Analyze a rectangle directly.
pub fn analyze_rect(rect: SelectionRect, grid: &Grid) -> Option<SelectionStats> {
    let mut numbers = Vec::with_capacity(rect.rows() * rect.cols());
    let mut counts = [0u32; DIGIT_COUNT];
    let mut sum = 0u32;

    for coord in rect.coords() {
        let Some(d) = grid.digit(coord) else {
            debug!(%coord, "selection covers an empty or out-of-bounds cell");
            return None;
        };
        numbers.push(d);
        counts[d as usize] += 1;
        sum += d as u32;
    }

    let stats = SelectionStats {
        rows: rect.rows(),
        cols: rect.cols(),
        numbers,
        counts,
        sum,
        top_left: grid.digit(rect.top_left())?,
        top_right: grid.digit(rect.top_right())?,
        bottom_left: grid.digit(rect.bottom_left())?,
        bottom_right: grid.digit(rect.bottom_right())?,
    };
    debug!(
        rows = stats.rows,
        cols = stats.cols,
        sum = stats.sum,
        "analyzed selection"
    );
    Some(stats)
}
