//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, tests).
//!
//! # Grid Dimensions
//!
//! The default playfield is a digit grid:
//!
//! - **Rows**: 8 (indexed 0-7, top to bottom)
//! - **Columns**: 16 (indexed 0-15, left to right)
//!
//! Both are defaults only; the core accepts any non-zero size.
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TARGET_SCORE` | 10 | Per-bin cap and win threshold |
//! | `DIGIT_COUNT` | 10 | Digits are `0..=9` |
//! | `DEFAULT_RULESET` | `"Tempe"` | Ruleset active at startup |
//!
//! # Examples
//!
//! ```
//! use tui_bins_types::{Bin, Coord, GameAction, GRID_COLS, GRID_ROWS};
//!
//! // Parse a bin (case-insensitive)
//! let bin = Bin::from_str("w").unwrap();
//! assert_eq!(bin, Bin::W);
//!
//! // Bins always come in the same order
//! assert_eq!(Bin::ALL, [Bin::W, Bin::F, Bin::D, Bin::M]);
//!
//! // Parse a game action
//! let action = GameAction::from_str("nextRuleset").unwrap();
//! assert_eq!(action, GameAction::NextRuleset);
//!
//! // Coordinates are (row, col)
//! let c = Coord::new(1, 2);
//! assert_eq!((c.row, c.col), (1, 2));
//!
//! assert_eq!(GRID_ROWS, 8);
//! assert_eq!(GRID_COLS, 16);
//! ```

use std::fmt;

/// Default grid height in cells (8 rows)
pub const GRID_ROWS: usize = 8;

/// Default grid width in cells (16 columns)
pub const GRID_COLS: usize = 16;

/// Per-bin score cap, also the win threshold for every bin.
pub const TARGET_SCORE: u8 = 10;

/// Number of distinct digits (`0..=9`).
pub const DIGIT_COUNT: usize = 10;

/// Ruleset selected when a game starts.
pub const DEFAULT_RULESET: &str = "Tempe";

/// A single grid value in `0..=9`.
pub type Digit = u8;

/// Cell on the grid (None = emptied during compaction, Some = digit)
pub type Cell = Option<Digit>;

/// Grid coordinate, 0-indexed. `row` grows downward, `col` grows rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four bins a selection can be committed to.
///
/// Every shipped ruleset defines a rule for each of them; what a bin *means*
/// depends on the active ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bin {
    W,
    F,
    D,
    M,
}

impl Bin {
    /// All bins in display order.
    pub const ALL: [Bin; 4] = [Bin::W, Bin::F, Bin::D, Bin::M];

    /// Parse a bin from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_bins_types::Bin;
    ///
    /// assert_eq!(Bin::from_str("W"), Some(Bin::W));
    /// assert_eq!(Bin::from_str("m"), Some(Bin::M));
    /// assert_eq!(Bin::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "w" => Some(Bin::W),
            "f" => Some(Bin::F),
            "d" => Some(Bin::D),
            "m" => Some(Bin::M),
            _ => None,
        }
    }

    /// Single-letter uppercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bin::W => "W",
            Bin::F => "F",
            Bin::D => "D",
            Bin::M => "M",
        }
    }

    /// Position in [`Bin::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Bin::W => 0,
            Bin::F => 1,
            Bin::D => 2,
            Bin::M => 3,
        }
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Anchor a selection at the cursor, or drop the current one.
    ToggleSelection,
    ClearSelection,
    ChooseBin(Bin),
    NextRuleset,
    PrevRuleset,
}

impl GameAction {
    /// Parse action from string
    ///
    /// Bin choices are spelled `bin:W`, `bin:F`, ...
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some(rest) = s.strip_prefix("bin:") {
            return Bin::from_str(rest).map(GameAction::ChooseBin);
        }
        match s.to_lowercase().as_str() {
            "cursorup" => Some(GameAction::CursorUp),
            "cursordown" => Some(GameAction::CursorDown),
            "cursorleft" => Some(GameAction::CursorLeft),
            "cursorright" => Some(GameAction::CursorRight),
            "toggleselection" => Some(GameAction::ToggleSelection),
            "clearselection" => Some(GameAction::ClearSelection),
            "nextruleset" => Some(GameAction::NextRuleset),
            "prevruleset" => Some(GameAction::PrevRuleset),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CursorUp => "cursorUp",
            GameAction::CursorDown => "cursorDown",
            GameAction::CursorLeft => "cursorLeft",
            GameAction::CursorRight => "cursorRight",
            GameAction::ToggleSelection => "toggleSelection",
            GameAction::ClearSelection => "clearSelection",
            GameAction::ChooseBin(Bin::W) => "bin:W",
            GameAction::ChooseBin(Bin::F) => "bin:F",
            GameAction::ChooseBin(Bin::D) => "bin:D",
            GameAction::ChooseBin(Bin::M) => "bin:M",
            GameAction::NextRuleset => "nextRuleset",
            GameAction::PrevRuleset => "prevRuleset",
        }
    }
}
