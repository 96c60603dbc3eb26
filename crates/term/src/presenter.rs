//! [`Presenter`] implementation that draws into a real terminal.

use std::io::{self, Write};

use anyhow::Result;

use crate::core::{GameSnapshot, Presenter};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::renderer::TerminalRenderer;

pub struct TerminalPresenter<W: Write = io::Stdout> {
    renderer: TerminalRenderer<W>,
    view: GameView,
    viewport: Viewport,
    fb: FrameBuffer,
    frames: u64,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(renderer: TerminalRenderer<W>, view: GameView, viewport: Viewport) -> Self {
        Self {
            renderer,
            view,
            viewport,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            frames: 0,
        }
    }

    pub fn renderer_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.renderer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Adopt a new terminal size; the next frame is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.renderer.invalidate();
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    type Error = anyhow::Error;

    fn render(&mut self, snap: &GameSnapshot) -> Result<()> {
        self.view.render_into(snap, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)?;
        self.frames += 1;
        Ok(())
    }
}
