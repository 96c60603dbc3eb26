//! Plain-data view of a game for presenters.

use crate::decision::DecisionOutcome;
use crate::scoring::BinScores;
use crate::selection::SelectionRect;
use crate::types::{Coord, Digit, TARGET_SCORE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major digits; `u8::MAX` marks an empty cell.
    pub digits: Vec<u8>,
    pub cursor: Coord,
    pub selection: Option<SelectionRect>,
    pub ruleset: String,
    pub ruleset_index: usize,
    pub ruleset_count: usize,
    pub scores: BinScores,
    pub target: u8,
    pub won: bool,
    pub last_outcome: Option<DecisionOutcome>,
}

impl GameSnapshot {
    pub fn digit(&self, row: usize, col: usize) -> Option<Digit> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.digits
            .get(row * self.cols + col)
            .copied()
            .filter(|&d| d != u8::MAX)
    }

    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.selection
            .is_some_and(|rect| rect.contains(Coord::new(row, col)))
    }

}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            digits: Vec::new(),
            cursor: Coord::default(),
            selection: None,
            ruleset: String::new(),
            ruleset_index: 0,
            ruleset_count: 0,
            scores: BinScores::new(),
            target: TARGET_SCORE,
            won: false,
            last_outcome: None,
        }
    }
}
