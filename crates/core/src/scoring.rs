//! Scoring module - per-bin counters and the win predicate
//!
//! Each bin score is a monotonically non-decreasing counter clamped to
//! `[0, TARGET_SCORE]`. A ruleset is won when every bin reaches the target;
//! that is recomputed from the counters on every call, never cached.

use crate::types::{Bin, TARGET_SCORE};

/// Score counters for the four bins of one ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BinScores {
    scores: [u8; 4],
}

impl BinScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, bin: Bin) -> u8 {
        self.scores[bin.index()]
    }

    /// Apply one decision outcome.
    ///
    /// A correct decision adds exactly one point unless the bin is already at
    /// the target. Returns true iff the score changed.
    pub fn record(&mut self, bin: Bin, correct: bool) -> bool {
        let score = &mut self.scores[bin.index()];
        if correct && *score < TARGET_SCORE {
            *score += 1;
            return true;
        }
        false
    }

    /// True iff every bin has reached the target.
    pub fn is_won(&self) -> bool {
        self.scores.iter().all(|&s| s >= TARGET_SCORE)
    }

    /// `(bin, score)` pairs in [`Bin::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Bin, u8)> + '_ {
        Bin::ALL.into_iter().map(move |bin| (bin, self.get(bin)))
    }

    /// Fill fraction of a bin in `0.0..=1.0`, for progress displays.
    pub fn progress(&self, bin: Bin) -> f32 {
        (self.get(bin) as f32 / TARGET_SCORE as f32).min(1.0)
    }

    /// Build scores directly, clamping each value to the target.
    pub fn from_array(scores: [u8; 4]) -> Self {
        Self {
            scores: scores.map(|s| s.min(TARGET_SCORE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_increments_by_one() {
        let mut scores = BinScores::new();
        assert!(scores.record(Bin::W, true));
        assert_eq!(scores.get(Bin::W), 1);
        assert_eq!(scores.get(Bin::F), 0);
    }

    #[test]
    fn test_incorrect_is_noop() {
        let mut scores = BinScores::from_array([3, 0, 0, 0]);
        assert!(!scores.record(Bin::W, false));
        assert_eq!(scores.get(Bin::W), 3);
    }

    #[test]
    fn test_capped_at_target() {
        let mut scores = BinScores::new();
        for _ in 0..25 {
            scores.record(Bin::D, true);
        }
        assert_eq!(scores.get(Bin::D), TARGET_SCORE);
        assert!(!scores.record(Bin::D, true));
        assert_eq!(scores.progress(Bin::D), 1.0);
    }

    #[test]
    fn test_win_transition_on_last_bin() {
        let t = TARGET_SCORE;
        let mut scores = BinScores::from_array([t, t, t, t - 1]);
        assert!(!scores.is_won());
        scores.record(Bin::M, true);
        assert!(scores.is_won());
    }

    #[test]
    fn test_from_array_clamps() {
        let scores = BinScores::from_array([200, 1, 2, 3]);
        assert_eq!(scores.get(Bin::W), TARGET_SCORE);
        let pairs: Vec<(Bin, u8)> = scores.iter().collect();
        assert_eq!(
            pairs,
            vec![(Bin::W, TARGET_SCORE), (Bin::F, 1), (Bin::D, 2), (Bin::M, 3)]
        );
    }
}
