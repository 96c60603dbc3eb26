//! Terminal front-end for the digit-bin puzzle.
//!
//! Rendering goes through a small framebuffer instead of a widget toolkit:
//! [`GameView`] paints a [`crate::core::GameSnapshot`] into a [`FrameBuffer`],
//! and [`TerminalRenderer`] flushes only the cells that changed since the
//! previous frame. [`TerminalPresenter`] ties both to the core's
//! [`Presenter`](crate::core::Presenter) trait.

pub mod fb;
pub mod game_view;
pub mod presenter;
pub mod renderer;

pub use tui_bins_core as core;
pub use tui_bins_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use presenter::TerminalPresenter;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
