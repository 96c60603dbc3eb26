//! Decision cycle - analyze, judge, score, compact, re-check the win
//!
//! [`apply_bin_decision`] is the single entry point that commits a selection
//! to a bin. It runs to completion: once it returns, the grid is full again
//! and the scores reflect the decision.

use tracing::{debug, info};

use crate::gravity::compact_and_refill;
use crate::grid::Grid;
use crate::rng::DigitSource;
use crate::rules::RulesetCatalog;
use crate::scoring::BinScores;
use crate::stats::analyze_selection;
use crate::types::{Bin, Coord};

/// Result of one bin decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub bin: Bin,
    /// The selection satisfied the bin's rule.
    pub correct: bool,
    /// Scores of the ruleset after the decision (all zero for unknown rulesets).
    pub scores: BinScores,
    /// Win state of the ruleset after the decision.
    pub won: bool,
    /// Cells removed and refilled.
    pub removed: usize,
}

/// Commit the selection `coords` to `bin` under ruleset `ruleset`.
///
/// The selected cells are consumed whether or not the decision was correct.
/// An empty selection changes nothing and reports an incorrect decision with
/// zero cells removed.
pub fn apply_bin_decision(
    catalog: &mut RulesetCatalog,
    ruleset: &str,
    bin: Bin,
    coords: &[Coord],
    grid: &mut Grid,
    rng: &mut impl DigitSource,
) -> DecisionOutcome {
    let Some(stats) = analyze_selection(coords, grid) else {
        debug!(ruleset, %bin, "no selection, nothing to evaluate");
        return DecisionOutcome {
            bin,
            correct: false,
            scores: catalog.scores(ruleset).unwrap_or_default(),
            won: catalog.is_won(ruleset),
            removed: 0,
        };
    };

    let correct = catalog.evaluate(ruleset, bin, &stats);
    catalog.record_outcome(ruleset, bin, correct);
    if !correct {
        debug!(ruleset, %bin, "incorrect bin");
    }

    let refill = compact_and_refill(grid, coords, rng);

    let won = catalog.is_won(ruleset);
    if won {
        info!(ruleset, "ruleset complete");
    }

    DecisionOutcome {
        bin,
        correct,
        scores: catalog.scores(ruleset).unwrap_or_default(),
        won,
        removed: refill.total(),
    }
}
