//! Presentation boundary.
//!
//! The core never draws anything. A front-end implements [`Presenter`] and
//! receives a fresh [`GameSnapshot`] after every dispatched action, plus
//! optional notifications for selection changes and bin decisions.

use crate::decision::DecisionOutcome;
use crate::selection::SelectionRect;
use crate::snapshot::GameSnapshot;

pub trait Presenter {
    type Error;

    /// Draw the current state.
    fn render(&mut self, snap: &GameSnapshot) -> Result<(), Self::Error>;

    /// The selection rectangle changed (None when the selection was dropped).
    fn on_selection_change(&mut self, _rect: Option<SelectionRect>) {}

    /// A bin decision completed.
    fn on_bin_chosen(&mut self, _outcome: &DecisionOutcome) {}
}
