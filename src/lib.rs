//! Digit-bin puzzle (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tui_bins::{core, input, term, types}` and ships the
//! `tui-bins` terminal binary.

pub use tui_bins_core as core;
pub use tui_bins_input as input;
pub use tui_bins_term as term;
pub use tui_bins_types as types;
