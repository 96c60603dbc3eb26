//! Selection module - rectangular drag selections
//!
//! A selection is defined by two grid coordinates: the anchor where the drag
//! started and the current end point. The rectangle between them is never
//! stored; it is recomputed from the two endpoints whenever it is needed.

use crate::types::Coord;

/// Inclusive, axis-aligned rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRect {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl SelectionRect {
    /// Normalize two corner coordinates into a rectangle.
    pub fn from_corners(a: Coord, b: Coord) -> Self {
        Self {
            min_row: a.row.min(b.row),
            max_row: a.row.max(b.row),
            min_col: a.col.min(b.col),
            max_col: a.col.max(b.col),
        }
    }

    /// Bounding box of a set of coordinates, None if the set is empty.
    pub fn bounding(coords: &[Coord]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        Some(rest.iter().fold(
            Self::from_corners(*first, *first),
            |rect, c| Self {
                min_row: rect.min_row.min(c.row),
                max_row: rect.max_row.max(c.row),
                min_col: rect.min_col.min(c.col),
                max_col: rect.max_col.max(c.col),
            },
        ))
    }

    pub fn rows(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn cols(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (self.min_row..=self.max_row).contains(&coord.row)
            && (self.min_col..=self.max_col).contains(&coord.col)
    }

    pub fn top_left(&self) -> Coord {
        Coord::new(self.min_row, self.min_col)
    }

    pub fn top_right(&self) -> Coord {
        Coord::new(self.min_row, self.max_col)
    }

    pub fn bottom_left(&self) -> Coord {
        Coord::new(self.max_row, self.min_col)
    }

    pub fn bottom_right(&self) -> Coord {
        Coord::new(self.max_row, self.max_col)
    }

    /// Every covered coordinate, row-major.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.min_row..=self.max_row)
            .flat_map(move |row| (self.min_col..=self.max_col).map(move |col| Coord::new(row, col)))
    }
}

/// Resolve an anchor/current pair into the covered coordinates, row-major.
///
/// Both endpoints must already be clamped to a `rows` x `cols` grid.
///
/// # Panics
///
/// Panics if either endpoint is out of bounds; that is a caller bug, not a
/// recoverable condition.
pub fn resolve_selection(anchor: Coord, current: Coord, rows: usize, cols: usize) -> Vec<Coord> {
    assert!(
        anchor.row < rows && anchor.col < cols,
        "selection anchor {} outside {}x{} grid",
        anchor,
        rows,
        cols
    );
    assert!(
        current.row < rows && current.col < cols,
        "selection end {} outside {}x{} grid",
        current,
        rows,
        cols
    );
    SelectionRect::from_corners(anchor, current).coords().collect()
}

/// In-progress drag: where it started and where it currently ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    anchor: Coord,
    current: Coord,
}

impl Selection {
    /// Start a selection covering the single cell `anchor`.
    pub fn new(anchor: Coord) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn current(&self) -> Coord {
        self.current
    }

    /// Move the free endpoint. Returns true if the rectangle changed.
    pub fn update(&mut self, current: Coord) -> bool {
        let before = self.rect();
        self.current = current;
        self.rect() != before
    }

    pub fn rect(&self) -> SelectionRect {
        SelectionRect::from_corners(self.anchor, self.current)
    }
}
