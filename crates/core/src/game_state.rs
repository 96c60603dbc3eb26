//! Game state module - owns one complete game
//!
//! This module ties together all core components: grid, selection, rules,
//! scoring, gravity and the digit source. Nothing is global; several games can
//! live side by side, and a game built from the same config and source always
//! plays out the same way.

use tracing::{debug, info};

use crate::decision::{apply_bin_decision, DecisionOutcome};
use crate::error::{CoreError, CoreResult};
use crate::grid::Grid;
use crate::presenter::Presenter;
use crate::rng::{DigitSource, SimpleRng};
use crate::rules::{Ruleset, RulesetCatalog};
use crate::selection::{resolve_selection, Selection, SelectionRect};
use crate::snapshot::GameSnapshot;
use crate::stats::{analyze_rect, SelectionStats};
use crate::types::*;

/// Runtime configuration for a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub seed: u32,
    /// Ruleset active at start.
    pub ruleset: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            seed: 1,
            ruleset: DEFAULT_RULESET.to_string(),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: DigitSource = SimpleRng> {
    grid: Grid,
    catalog: RulesetCatalog,
    /// Index of the active ruleset in the catalog.
    active: usize,
    cursor: Coord,
    /// While a selection exists its free endpoint follows the cursor.
    selection: Option<Selection>,
    last_outcome: Option<DecisionOutcome>,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Create a new game seeded from `config.seed`.
    pub fn new(config: &GameConfig) -> CoreResult<Self> {
        Self::with_source(config, SimpleRng::new(config.seed))
    }
}

impl<R: DigitSource> GameState<R> {
    /// Create a new game drawing digits from `rng`.
    pub fn with_source(config: &GameConfig, mut rng: R) -> CoreResult<Self> {
        let grid = Grid::new(config.rows, config.cols, &mut rng)?;
        Self::from_parts(grid, RulesetCatalog::standard(), &config.ruleset, rng)
    }

    /// Assemble a game from an existing grid and catalog.
    pub fn from_parts(
        grid: Grid,
        catalog: RulesetCatalog,
        ruleset: &str,
        rng: R,
    ) -> CoreResult<Self> {
        let active = catalog
            .index_of(ruleset)
            .ok_or_else(|| CoreError::UnknownRuleset(ruleset.to_string()))?;
        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            ruleset,
            "game ready"
        );
        Ok(Self {
            grid,
            catalog,
            active,
            cursor: Coord::default(),
            selection: None,
            last_outcome: None,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &RulesetCatalog {
        &self.catalog
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn last_outcome(&self) -> Option<&DecisionOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn active_ruleset(&self) -> &Ruleset {
        // `active` is only ever set from a catalog lookup.
        &self.catalog.rulesets()[self.active]
    }

    pub fn active_name(&self) -> &str {
        self.active_ruleset().name()
    }

    /// Won state of the active ruleset, recomputed from its scores.
    pub fn is_won(&self) -> bool {
        self.active_ruleset().is_won()
    }

    /// Make `name` the active ruleset.
    ///
    /// Scores of every ruleset are kept; only the selection is dropped.
    pub fn switch_ruleset(&mut self, name: &str) -> CoreResult<&Ruleset> {
        let index = self
            .catalog
            .index_of(name)
            .ok_or_else(|| CoreError::UnknownRuleset(name.to_string()))?;
        self.activate(index);
        Ok(self.active_ruleset())
    }

    /// Rotate to the next ruleset, wrapping around.
    pub fn next_ruleset(&mut self) -> &Ruleset {
        let index = (self.active + 1) % self.catalog.len();
        self.activate(index);
        self.active_ruleset()
    }

    /// Rotate to the previous ruleset, wrapping around.
    pub fn prev_ruleset(&mut self) -> &Ruleset {
        let len = self.catalog.len();
        let index = (self.active + len - 1) % len;
        self.activate(index);
        self.active_ruleset()
    }

    fn activate(&mut self, index: usize) {
        if index != self.active {
            let from = self.active_name().to_string();
            self.active = index;
            info!(from = %from, to = self.active_name(), "switched ruleset");
        }
        self.selection = None;
        self.last_outcome = None;
    }

    /// Move the cursor by a delta, clamped to the grid.
    ///
    /// Returns true if the cursor moved.
    pub fn move_cursor(&mut self, drow: isize, dcol: isize) -> bool {
        let target = self.grid.clamp(
            self.cursor.row as isize + drow,
            self.cursor.col as isize + dcol,
        );
        self.set_cursor(target)
    }

    /// Put the cursor on `coord` (clamped). Extends an active selection.
    pub fn set_cursor(&mut self, coord: Coord) -> bool {
        let coord = self.grid.clamp(coord.row as isize, coord.col as isize);
        if coord == self.cursor {
            return false;
        }
        self.cursor = coord;
        if let Some(sel) = self.selection.as_mut() {
            sel.update(coord);
        }
        true
    }

    /// Anchor a new selection at the cursor.
    pub fn begin_selection(&mut self) {
        self.selection = Some(Selection::new(self.cursor));
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selection.take().is_some()
    }

    pub fn toggle_selection(&mut self) {
        if !self.clear_selection() {
            self.begin_selection();
        }
    }

    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection.map(|s| s.rect())
    }

    /// Coordinates covered by the current selection (empty if none).
    pub fn selection_coords(&self) -> Vec<Coord> {
        match self.selection {
            Some(sel) => resolve_selection(
                sel.anchor(),
                sel.current(),
                self.grid.rows(),
                self.grid.cols(),
            ),
            None => Vec::new(),
        }
    }

    pub fn selection_stats(&self) -> Option<SelectionStats> {
        analyze_rect(self.selection_rect()?, &self.grid)
    }

    /// Commit the current selection to `bin` under the active ruleset.
    ///
    /// Returns None without touching anything when there is no selection or
    /// the active ruleset is already won.
    pub fn choose_bin(&mut self, bin: Bin) -> Option<DecisionOutcome> {
        if self.selection.is_none() {
            return None;
        }
        if self.is_won() {
            debug!(ruleset = self.active_name(), "ruleset already won, bins closed");
            return None;
        }

        let coords = self.selection_coords();
        let name = self.active_name().to_string();
        let outcome = apply_bin_decision(
            &mut self.catalog,
            &name,
            bin,
            &coords,
            &mut self.grid,
            &mut self.rng,
        );
        self.selection = None;
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    /// Apply a game action. Returns true if anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::CursorUp => self.move_cursor(-1, 0),
            GameAction::CursorDown => self.move_cursor(1, 0),
            GameAction::CursorLeft => self.move_cursor(0, -1),
            GameAction::CursorRight => self.move_cursor(0, 1),
            GameAction::ToggleSelection => {
                self.toggle_selection();
                true
            }
            GameAction::ClearSelection => self.clear_selection(),
            GameAction::ChooseBin(bin) => self.choose_bin(bin).is_some(),
            GameAction::NextRuleset => {
                let before = self.active;
                self.next_ruleset();
                self.active != before
            }
            GameAction::PrevRuleset => {
                let before = self.active;
                self.prev_ruleset();
                self.active != before
            }
        }
    }

    /// Apply an action and report the result to `presenter`.
    pub fn dispatch<P: Presenter>(
        &mut self,
        action: GameAction,
        presenter: &mut P,
    ) -> Result<bool, P::Error> {
        let rect_before = self.selection_rect();

        let changed = match action {
            GameAction::ChooseBin(bin) => match self.choose_bin(bin) {
                Some(outcome) => {
                    presenter.on_bin_chosen(&outcome);
                    true
                }
                None => false,
            },
            other => self.apply_action(other),
        };

        let rect_after = self.selection_rect();
        if rect_after != rect_before {
            presenter.on_selection_change(rect_after);
        }
        presenter.render(&self.snapshot())?;
        Ok(changed)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let ruleset = self.active_ruleset();

        self.grid.write_digits(&mut out.digits);
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cursor = self.cursor;
        out.selection = self.selection_rect();
        out.ruleset.clear();
        out.ruleset.push_str(ruleset.name());
        out.ruleset_index = self.active;
        out.ruleset_count = self.catalog.len();
        out.scores = *ruleset.scores();
        out.target = TARGET_SCORE;
        out.won = ruleset.is_won();
        out.last_outcome = self.last_outcome.clone();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DigitSequence;

    fn game_with(rows: &[Vec<Digit>], ruleset: &str) -> GameState<DigitSequence> {
        GameState::from_parts(
            Grid::from_rows(rows).unwrap(),
            RulesetCatalog::standard(),
            ruleset,
            DigitSequence::repeat(0),
        )
        .unwrap()
    }

    fn select(game: &mut GameState<DigitSequence>, from: Coord, to: Coord) {
        game.set_cursor(from);
        game.begin_selection();
        game.set_cursor(to);
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(&GameConfig::default()).unwrap();
        assert_eq!(state.grid().rows(), GRID_ROWS);
        assert_eq!(state.grid().cols(), GRID_COLS);
        assert!(state.grid().is_full());
        assert_eq!(state.active_name(), DEFAULT_RULESET);
        assert_eq!(state.cursor(), Coord::new(0, 0));
        assert!(state.selection().is_none());
        assert!(!state.is_won());
    }

    #[test]
    fn test_same_seed_same_grid() {
        let config = GameConfig {
            seed: 99,
            ..GameConfig::default()
        };
        let a = GameState::new(&config).unwrap();
        let b = GameState::new(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_unknown_start_ruleset_fails() {
        let config = GameConfig {
            ruleset: "Nowhere".into(),
            ..GameConfig::default()
        };
        assert_eq!(
            GameState::new(&config).err(),
            Some(CoreError::UnknownRuleset("Nowhere".into()))
        );
    }

    #[test]
    fn test_cursor_clamped() {
        let mut state = game_with(&[vec![1, 2], vec![3, 4]], "Tempe");
        assert!(!state.move_cursor(-1, 0));
        assert!(state.move_cursor(5, 5));
        assert_eq!(state.cursor(), Coord::new(1, 1));
    }

    #[test]
    fn test_selection_follows_cursor() {
        let mut state = game_with(&vec![vec![0; 4]; 4], "Tempe");
        state.set_cursor(Coord::new(2, 2));
        state.begin_selection();
        state.apply_action(GameAction::CursorUp);
        state.apply_action(GameAction::CursorLeft);
        state.apply_action(GameAction::CursorLeft);

        let rect = state.selection_rect().unwrap();
        assert_eq!(rect, SelectionRect::from_corners(Coord::new(2, 2), Coord::new(1, 0)));
        assert_eq!(state.selection_coords().len(), 6);
        assert_eq!(state.selection_stats().unwrap().rows, 2);
    }

    #[test]
    fn test_choose_bin_without_selection_is_noop() {
        let mut state = game_with(&[vec![1, 1, 1], vec![1, 1, 1]], "Tempe");
        let before = state.grid().clone();
        assert_eq!(state.choose_bin(Bin::W), None);
        assert_eq!(state.grid(), &before);
        assert!(!state.apply_action(GameAction::ChooseBin(Bin::W)));
    }

    #[test]
    fn test_choose_bin_scores_and_clears_selection() {
        let mut state = game_with(&[vec![1, 0, 0], vec![0, 0, 0]], "Tempe");
        select(&mut state, Coord::new(0, 0), Coord::new(1, 2));

        let outcome = state.choose_bin(Bin::W).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.scores.get(Bin::W), 1);
        assert!(state.selection().is_none());
        assert_eq!(state.last_outcome(), Some(&outcome));
        assert!(state.grid().is_full());
    }

    #[test]
    fn test_switch_preserves_scores() {
        let mut state = game_with(&[vec![1, 1, 1], vec![1, 1, 1]], "Tempe");
        for _ in 0..3 {
            select(&mut state, Coord::new(0, 0), Coord::new(1, 2));
            state.choose_bin(Bin::W);
            // Refill with zeros, then restore ones for the next round.
            for r in 0..2 {
                for c in 0..3 {
                    state.grid.set(Coord::new(r, c), Some(1));
                }
            }
        }
        assert_eq!(state.active_ruleset().scores().get(Bin::W), 3);

        state.switch_ruleset("Evanston").unwrap();
        for _ in 0..5 {
            select(&mut state, Coord::new(0, 0), Coord::new(1, 2));
            state.choose_bin(Bin::W);
            for r in 0..2 {
                for c in 0..3 {
                    state.grid.set(Coord::new(r, c), Some(1));
                }
            }
        }
        assert_eq!(state.active_ruleset().scores().get(Bin::W), 5);

        let back = state.switch_ruleset("Tempe").unwrap();
        assert_eq!(back.scores().get(Bin::W), 3);
    }

    #[test]
    fn test_switch_unknown_ruleset_fails() {
        let mut state = game_with(&[vec![1]], "Tempe");
        assert!(state.switch_ruleset("Nowhere").is_err());
        assert_eq!(state.active_name(), "Tempe");
    }

    #[test]
    fn test_switch_clears_selection_keeps_grid() {
        let mut state = game_with(&[vec![4, 5], vec![6, 7]], "Tempe");
        let grid = state.grid().clone();
        state.begin_selection();
        state.next_ruleset();
        assert!(state.selection().is_none());
        assert_eq!(state.grid(), &grid);
    }

    #[test]
    fn test_rolodex_wraps() {
        let mut state = game_with(&[vec![1]], "Tempe");
        assert_eq!(state.prev_ruleset().name(), "Rockville");
        assert_eq!(state.next_ruleset().name(), "Tempe");
        assert_eq!(state.next_ruleset().name(), "Evanston");
        assert_eq!(state.next_ruleset().name(), "Rockville");
        assert_eq!(state.next_ruleset().name(), "Tempe");
    }

    #[test]
    fn test_bins_closed_after_win() {
        let mut catalog = RulesetCatalog::standard();
        for bin in Bin::ALL {
            for _ in 0..TARGET_SCORE {
                catalog.record_outcome("Tempe", bin, true);
            }
        }
        let mut state = GameState::from_parts(
            Grid::from_rows(&[vec![1, 1, 1], vec![1, 1, 1]]).unwrap(),
            catalog,
            "Tempe",
            DigitSequence::repeat(0),
        )
        .unwrap();
        assert!(state.is_won());

        select(&mut state, Coord::new(0, 0), Coord::new(1, 2));
        let before = state.grid().clone();
        assert_eq!(state.choose_bin(Bin::W), None);
        assert_eq!(state.grid(), &before);

        // Other rulesets stay playable.
        state.switch_ruleset("Evanston").unwrap();
        select(&mut state, Coord::new(0, 0), Coord::new(1, 2));
        assert!(state.choose_bin(Bin::W).unwrap().correct);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = game_with(&[vec![1, 2, 3], vec![4, 5, 6]], "Evanston");
        select(&mut state, Coord::new(0, 0), Coord::new(1, 1));
        let snap = state.snapshot();

        assert_eq!(snap.rows, 2);
        assert_eq!(snap.cols, 3);
        assert_eq!(snap.digit(1, 2), Some(6));
        assert_eq!(snap.digit(2, 0), None);
        assert_eq!(snap.ruleset, "Evanston");
        assert_eq!(snap.ruleset_index, 1);
        assert_eq!(snap.ruleset_count, 3);
        assert!(snap.is_selected(1, 1));
        assert!(!snap.is_selected(0, 2));
        assert_eq!(snap.cursor, Coord::new(1, 1));
        assert!(!snap.won);
    }

    #[derive(Default)]
    struct Recorder {
        renders: usize,
        selections: Vec<Option<SelectionRect>>,
        outcomes: Vec<DecisionOutcome>,
    }

    impl Presenter for Recorder {
        type Error = std::convert::Infallible;

        fn render(&mut self, _snap: &GameSnapshot) -> Result<(), Self::Error> {
            self.renders += 1;
            Ok(())
        }

        fn on_selection_change(&mut self, rect: Option<SelectionRect>) {
            self.selections.push(rect);
        }

        fn on_bin_chosen(&mut self, outcome: &DecisionOutcome) {
            self.outcomes.push(outcome.clone());
        }
    }

    #[test]
    fn test_dispatch_notifies_presenter() {
        let mut state = game_with(&[vec![1, 0, 0], vec![0, 0, 0]], "Tempe");
        let mut rec = Recorder::default();

        state.dispatch(GameAction::ToggleSelection, &mut rec).unwrap();
        state.dispatch(GameAction::CursorDown, &mut rec).unwrap();
        state.dispatch(GameAction::CursorRight, &mut rec).unwrap();
        state.dispatch(GameAction::CursorRight, &mut rec).unwrap();
        let changed = state.dispatch(GameAction::ChooseBin(Bin::W), &mut rec).unwrap();

        assert!(changed);
        assert_eq!(rec.renders, 5);
        assert_eq!(rec.outcomes.len(), 1);
        assert!(rec.outcomes[0].correct);
        // Anchor, three extensions, then cleared by the decision.
        assert_eq!(rec.selections.len(), 5);
        assert_eq!(rec.selections.last(), Some(&None));
    }
}
