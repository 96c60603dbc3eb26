//! Rules module - data-driven bin predicates and the ruleset catalog
//!
//! A rule is a required selection shape plus a list of conditions over
//! [`SelectionStats`]. All shipped rulesets are expressed with the same few
//! [`Condition`] kinds, interpreted by one evaluator.
//!
//! The catalog is the fault boundary: unknown rulesets, unknown bins and
//! condition faults all come out as "not a match", never as an error.
//!
//! | Ruleset | W | F | D | M |
//! |---------|---|---|---|---|
//! | Tempe | 2x3, one 1 | 2x3, one 7 | 2x3, one 6 | 2x3, one 8 |
//! | Evanston | 2x3, two 1s | 2x3, top-left 7 | 2x2, one 6 | 2x3, two 8s |
//! | Rockville | 2x3, top-left and bottom-right 1 | 2x3, cell (1,1) is 7 | 2x2, three 6s | 4x4, three 8s |

use thiserror::Error;
use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::scoring::BinScores;
use crate::stats::SelectionStats;
use crate::types::{Bin, Digit, TARGET_SCORE};

/// Required selection dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

/// Internal fault raised while checking a condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleFault {
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} selection")]
    CellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{0} is not a digit")]
    NotADigit(Digit),
}

/// One check against selection statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// `digit` occurs at least `at_least` times.
    MinCount { digit: Digit, at_least: u32 },
    /// The top-left cell holds this digit.
    TopLeft(Digit),
    /// The bottom-right cell holds this digit.
    BottomRight(Digit),
    /// The digits add up to exactly this value.
    Sum(u32),
    /// The cell at selection-relative `(row, col)` holds `digit`.
    CellEquals { row: usize, col: usize, digit: Digit },
}

impl Condition {
    pub fn check(&self, stats: &SelectionStats) -> Result<bool, RuleFault> {
        match *self {
            Condition::MinCount { digit, at_least } => {
                if digit > 9 {
                    return Err(RuleFault::NotADigit(digit));
                }
                Ok(stats.count(digit) >= at_least)
            }
            Condition::TopLeft(d) => Ok(stats.top_left == d),
            Condition::BottomRight(d) => Ok(stats.bottom_right == d),
            Condition::Sum(n) => Ok(stats.sum == n),
            Condition::CellEquals { row, col, digit } => stats
                .cell(row, col)
                .map(|d| d == digit)
                .ok_or(RuleFault::CellOutOfRange {
                    row,
                    col,
                    rows: stats.rows,
                    cols: stats.cols,
                }),
        }
    }
}

/// A bin predicate: exact shape plus every condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub shape: Shape,
    pub conditions: Vec<Condition>,
}

impl Rule {
    pub fn new(shape: Shape, conditions: impl Into<Vec<Condition>>) -> Self {
        Self {
            shape,
            conditions: conditions.into(),
        }
    }

    /// Evaluate the rule.
    ///
    /// The shape is checked first, so conditions only ever run against a
    /// selection of the expected size.
    pub fn matches(&self, stats: &SelectionStats) -> Result<bool, RuleFault> {
        if !stats.is_shape(self.shape.rows, self.shape.cols) {
            return Ok(false);
        }
        for cond in &self.conditions {
            if !cond.check(stats)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A named set of bin rules together with its own scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    name: String,
    rules: Vec<(Bin, Rule)>,
    scores: BinScores,
}

impl Ruleset {
    pub fn new(name: impl Into<String>, rules: Vec<(Bin, Rule)>) -> Self {
        Self {
            name: name.into(),
            rules,
            scores: BinScores::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self, bin: Bin) -> Option<&Rule> {
        self.rules.iter().find(|(b, _)| *b == bin).map(|(_, r)| r)
    }

    /// Bins this ruleset defines, in declaration order.
    pub fn bins(&self) -> Vec<Bin> {
        self.rules.iter().map(|(b, _)| *b).collect()
    }

    pub fn scores(&self) -> &BinScores {
        &self.scores
    }

    /// Won iff every bin this ruleset defines has reached the target.
    ///
    /// A ruleset without bins is never won.
    pub fn is_won(&self) -> bool {
        !self.rules.is_empty()
            && self
                .rules
                .iter()
                .all(|(bin, _)| self.scores.get(*bin) >= TARGET_SCORE)
    }
}

fn cond_count(digit: Digit, at_least: u32) -> Condition {
    Condition::MinCount { digit, at_least }
}

const TWO_BY_THREE: Shape = Shape::new(2, 3);
const TWO_BY_TWO: Shape = Shape::new(2, 2);

/// Registry of rulesets; exactly one is active at a time in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesetCatalog {
    rulesets: Vec<Ruleset>,
}

impl RulesetCatalog {
    pub fn new(rulesets: Vec<Ruleset>) -> Self {
        Self { rulesets }
    }

    /// The three rulesets the game ships with, in rolodex order.
    pub fn standard() -> Self {
        let tempe = Ruleset::new(
            "Tempe",
            vec![
                (Bin::W, Rule::new(TWO_BY_THREE, [cond_count(1, 1)])),
                (Bin::F, Rule::new(TWO_BY_THREE, [cond_count(7, 1)])),
                (Bin::D, Rule::new(TWO_BY_THREE, [cond_count(6, 1)])),
                (Bin::M, Rule::new(TWO_BY_THREE, [cond_count(8, 1)])),
            ],
        );
        let evanston = Ruleset::new(
            "Evanston",
            vec![
                (Bin::W, Rule::new(TWO_BY_THREE, [cond_count(1, 2)])),
                (Bin::F, Rule::new(TWO_BY_THREE, [Condition::TopLeft(7)])),
                (Bin::D, Rule::new(TWO_BY_TWO, [cond_count(6, 1)])),
                (Bin::M, Rule::new(TWO_BY_THREE, [cond_count(8, 2)])),
            ],
        );
        let rockville = Ruleset::new(
            "Rockville",
            vec![
                (
                    Bin::W,
                    Rule::new(
                        TWO_BY_THREE,
                        [Condition::TopLeft(1), Condition::BottomRight(1)],
                    ),
                ),
                (
                    Bin::F,
                    Rule::new(
                        TWO_BY_THREE,
                        [Condition::CellEquals {
                            row: 1,
                            col: 1,
                            digit: 7,
                        }],
                    ),
                ),
                (Bin::D, Rule::new(TWO_BY_TWO, [cond_count(6, 3)])),
                (Bin::M, Rule::new(Shape::new(4, 4), [cond_count(8, 3)])),
            ],
        );
        Self::new(vec![tempe, evanston, rockville])
    }

    pub fn len(&self) -> usize {
        self.rulesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rulesets.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rulesets.iter().map(Ruleset::name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.rulesets.iter().position(|r| r.name == name)
    }

    pub fn get(&self, name: &str) -> CoreResult<&Ruleset> {
        self.rulesets
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| CoreError::UnknownRuleset(name.to_string()))
    }

    pub fn rulesets(&self) -> &[Ruleset] {
        &self.rulesets
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Ruleset> {
        self.rulesets.iter_mut().find(|r| r.name == name)
    }

    /// Bin identifiers of a ruleset.
    pub fn list_bins(&self, name: &str) -> CoreResult<Vec<Bin>> {
        self.get(name).map(Ruleset::bins)
    }

    /// Judge `stats` against the rule for `bin` in ruleset `name`.
    ///
    /// Missing rulesets or bins and faulting conditions all evaluate to false.
    pub fn evaluate(&self, name: &str, bin: Bin, stats: &SelectionStats) -> bool {
        let Ok(ruleset) = self.get(name) else {
            warn!(ruleset = name, "rule lookup for unknown ruleset");
            return false;
        };
        let Some(rule) = ruleset.rule(bin) else {
            warn!(ruleset = name, %bin, "ruleset has no rule for bin");
            return false;
        };
        match rule.matches(stats) {
            Ok(hit) => hit,
            Err(fault) => {
                warn!(ruleset = name, %bin, %fault, "rule faulted, treating as no match");
                false
            }
        }
    }

    /// Record a decision against ruleset `name`.
    ///
    /// Returns true iff a score changed. Unknown rulesets are ignored.
    pub fn record_outcome(&mut self, name: &str, bin: Bin, correct: bool) -> bool {
        let Some(ruleset) = self.get_mut(name) else {
            return false;
        };
        let changed = ruleset.scores.record(bin, correct);
        if changed {
            info!(
                ruleset = name,
                %bin,
                score = ruleset.scores.get(bin),
                "bin scored"
            );
        }
        changed
    }

    pub fn scores(&self, name: &str) -> Option<BinScores> {
        self.get(name).ok().map(|r| r.scores)
    }

    /// Won iff the ruleset exists and every bin has reached the target.
    pub fn is_won(&self, name: &str) -> bool {
        self.get(name).map(Ruleset::is_won).unwrap_or(false)
    }
}

impl Default for RulesetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
