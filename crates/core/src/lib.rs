//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole selection → rule → score → gravity cycle of
//! the digit-bin puzzle. It has **no dependencies** on terminals, input
//! devices or I/O, making it:
//!
//! - **Deterministic**: the digit source is injected, so the same seed (or
//!   script) produces the same game
//! - **Testable**: every component can be driven in isolation
//! - **Portable**: any front-end can present it through [`Presenter`]
//!
//! # Module Structure
//!
//! - [`grid`]: R x C digit matrix (8 x 16 by default)
//! - [`selection`]: anchor/current drag → normalized rectangle
//! - [`stats`]: rectangle → counts, sum, corners
//! - [`rules`]: data-driven bin rules and the ruleset catalog
//! - [`gravity`]: remove cells, compact columns downward, refill the top
//! - [`scoring`]: per-bin counters capped at the target, win predicate
//! - [`decision`]: the atomic bin-decision cycle
//! - [`game_state`]: one complete game (grid, rulesets, cursor, selection)
//! - [`rng`]: injectable digit sources
//!
//! # Game Rules
//!
//! - Select a rectangle of digits and drop it into one of the bins W, F, D, M
//! - The active ruleset decides whether the selection fits the bin
//! - A fitting selection scores one point for that bin, up to 10
//! - The selected digits are consumed either way; columns fall and new digits
//!   appear at the top
//! - A ruleset is complete once all four bins reach 10
//! - Every ruleset keeps its own scores; switching never resets them
//!
//! # Example
//!
//! ```
//! use tui_bins_core::{GameConfig, GameState};
//! use tui_bins_types::{Bin, GameAction};
//!
//! let mut game = GameState::new(&GameConfig::default()).unwrap();
//!
//! // Select a 2x3 rectangle
//! game.apply_action(GameAction::ToggleSelection);
//! game.apply_action(GameAction::CursorDown);
//! game.apply_action(GameAction::CursorRight);
//! game.apply_action(GameAction::CursorRight);
//! assert_eq!(game.selection_coords().len(), 6);
//!
//! // Commit it to a bin
//! let outcome = game.choose_bin(Bin::W).unwrap();
//! assert_eq!(outcome.removed, 6);
//! assert!(game.grid().is_full());
//! assert!(game.selection().is_none());
//! ```

pub mod decision;
pub mod error;
pub mod game_state;
pub mod gravity;
pub mod grid;
pub mod presenter;
pub mod rng;
pub mod rules;
pub mod scoring;
pub mod selection;
pub mod snapshot;
pub mod stats;

pub use tui_bins_types as types;

// Re-export commonly used types for convenience
pub use decision::{apply_bin_decision, DecisionOutcome};
pub use error::{CoreError, CoreResult};
pub use game_state::{GameConfig, GameState};
pub use gravity::{compact_and_refill, Refill};
pub use grid::Grid;
pub use presenter::Presenter;
pub use rng::{DigitSequence, DigitSource, SimpleRng};
pub use rules::{Condition, Rule, RuleFault, Ruleset, RulesetCatalog, Shape};
pub use scoring::BinScores;
pub use selection::{resolve_selection, Selection, SelectionRect};
pub use snapshot::GameSnapshot;
pub use stats::{analyze_rect, analyze_selection, SelectionStats};
