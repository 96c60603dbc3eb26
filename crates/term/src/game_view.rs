//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: the digit grid sits in a box on the left, the ruleset and bin
//! scores in a panel to its right, and a key hint line under the box.

use crate::core::{DecisionOutcome, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Bin;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PANEL_W: u16 = 24;
const BAR_W: u16 = 10;

const GRID_BG: Rgb = Rgb::new(24, 26, 34);
const BLACK: Rgb = Rgb::new(0, 0, 0);

pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // " 7 " keeps digits legible and roughly square.
        Self {
            cell_w: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the grid box including its border.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let w = clamp_u16(snap.cols)
            .saturating_mul(self.cell_w)
            .saturating_add(2);
        let h = clamp_u16(snap.rows).saturating_add(2);
        (w, h)
    }

    /// Top-left corner of the grid box for this viewport.
    pub fn frame_origin(&self, snap: &GameSnapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        let total_w = frame_w.saturating_add(2 + PANEL_W);
        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            // One extra row for the key hints.
            AnchorY::Center => viewport.height.saturating_sub(frame_h.saturating_add(1)) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Terminal position of the first column of grid cell `(row, col)`.
    pub fn cell_origin(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        row: usize,
        col: usize,
    ) -> (u16, u16) {
        let (x, y) = self.frame_origin(snap, viewport);
        (
            x.saturating_add(1)
                .saturating_add(clamp_u16(col).saturating_mul(self.cell_w)),
            y.saturating_add(1).saturating_add(clamp_u16(row)),
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(200, 200, 200), BLACK).cell(' '));

        let (start_x, start_y) = self.frame_origin(snap, viewport);
        let (frame_w, frame_h) = self.frame_size(snap);

        let border = CellStyle::new(Rgb::new(190, 190, 200), BLACK);
        fb.fill_rect(
            start_x.saturating_add(1),
            start_y.saturating_add(1),
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(BLACK, GRID_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                self.draw_digit(fb, snap, viewport, row, col);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, viewport, panel_x, start_y);
        self.draw_hints(fb, start_x, start_y.saturating_add(frame_h));

        if snap.won {
            let text = format!(" {} COMPLETE ", snap.ruleset.to_uppercase());
            draw_centered(fb, start_x, start_y.saturating_add(frame_h / 2), frame_w, &text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_digit(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        row: usize,
        col: usize,
    ) {
        let (x, y) = self.cell_origin(snap, viewport, row, col);
        if x >= viewport.width || y >= viewport.height {
            return;
        }

        let selected = snap.is_selected(row, col);
        let is_cursor = snap.cursor.row == row && snap.cursor.col == col;

        let bg = if selected { Rgb::new(60, 70, 120) } else { GRID_BG };
        let mut style = CellStyle::new(digit_color(snap.digit(row, col)), bg);
        if selected {
            style = style.bold();
        }
        if is_cursor {
            style = style.reverse();
        }

        fb.fill_rect(x, y, self.cell_w, 1, ' ', style);
        let ch = snap
            .digit(row, col)
            .map_or('·', |d| char::from(b'0' + d));
        fb.put_char(x.saturating_add(self.cell_w / 2), y, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, x: u16, y: u16) {
        if x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::new(Rgb::new(230, 230, 230), BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        let dim = value.dim();

        let line = |n: u16| y.saturating_add(n);

        fb.put_str(x, y, "RULESET", label);
        let end = fb.put_str(x, line(1), &snap.ruleset, value);
        if snap.ruleset_count > 0 {
            let pos = format!(" {}/{}", snap.ruleset_index + 1, snap.ruleset_count);
            fb.put_str(end, line(1), &pos, dim);
        }

        fb.put_str(x, line(3), "BINS", label);
        for (i, bin) in (0u16..).zip(Bin::ALL) {
            let row = line(4 + i);
            let score = snap.scores.get(bin);
            let highlight = snap
                .last_outcome
                .as_ref()
                .is_some_and(|o| o.bin == bin);
            let name_style = if highlight { label } else { value };
            fb.put_str(x, row, bin.as_str(), name_style);
            draw_bar(fb, x.saturating_add(2), row, snap.scores.progress(bin));
            let end = fb.put_u32(x.saturating_add(3 + BAR_W), row, u32::from(score), value);
            fb.put_char(end, row, '/', dim);
            fb.put_u32(end.saturating_add(1), row, u32::from(snap.target), dim);
        }

        fb.put_str(x, line(9), "LAST", label);
        match &snap.last_outcome {
            Some(outcome) => {
                let (text, style) = outcome_text(outcome);
                fb.put_str(x, line(10), &text, style);
            }
            None => {
                fb.put_str(x, line(10), "-", dim);
            }
        }
    }

    fn draw_hints(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let dim = CellStyle::new(Rgb::new(150, 150, 160), BLACK).dim();
        fb.put_str(
            x,
            y,
            "arrows move  space select  w/f/d/m bin  [ ] ruleset  q quit",
            dim,
        );
    }
}

fn outcome_text(outcome: &DecisionOutcome) -> (String, CellStyle) {
    if outcome.correct {
        (
            format!("{} correct", outcome.bin),
            CellStyle::new(Rgb::new(110, 220, 120), BLACK).bold(),
        )
    } else {
        (
            format!("{} wrong", outcome.bin),
            CellStyle::new(Rgb::new(230, 90, 90), BLACK),
        )
    }
}

/// `progress` is the filled fraction in `0.0..=1.0`.
fn draw_bar(fb: &mut FrameBuffer, x: u16, y: u16, progress: f32) {
    let filled = (progress.clamp(0.0, 1.0) * f32::from(BAR_W)) as u16;
    let on = CellStyle::new(Rgb::new(120, 200, 240), BLACK);
    let off = CellStyle::new(Rgb::new(70, 70, 80), BLACK);
    for i in 0..BAR_W {
        let ch = if i < filled { '█' } else { '░' };
        fb.put_char(x.saturating_add(i), y, ch, if i < filled { on } else { off });
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn digit_color(digit: Option<u8>) -> Rgb {
    match digit {
        Some(1) => Rgb::new(120, 200, 255),
        Some(6) => Rgb::new(250, 200, 90),
        Some(7) => Rgb::new(130, 230, 140),
        Some(8) => Rgb::new(230, 130, 220),
        Some(_) => Rgb::new(210, 210, 215),
        None => Rgb::new(90, 90, 100),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x.saturating_add(w - 1), y.saturating_add(h - 1));

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x.saturating_add(1)..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y.saturating_add(1)..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let cx = x.saturating_add(w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 120, 60)).bold();
    fb.put_str(cx, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BinScores, DigitSequence, GameConfig, GameState};

    fn snapshot() -> GameSnapshot {
        GameState::new(&GameConfig::default()).unwrap().snapshot()
    }

    #[test]
    fn frame_size_follows_grid_dimensions() {
        let view = GameView::default();
        assert_eq!(view.frame_size(&snapshot()), (16 * 3 + 2, 10));
    }

    #[test]
    fn digits_land_in_their_cells() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let snap = snapshot();
        let vp = Viewport::new(100, 20);
        let fb = view.render(&snap, vp);

        for (row, col) in [(0, 0), (3, 7), (7, 15)] {
            let (x, y) = view.cell_origin(&snap, vp, row, col);
            let expected = char::from(b'0' + snap.digit(row, col).unwrap());
            assert_eq!(fb.get(x + 1, y).unwrap().ch, expected);
        }
    }

    #[test]
    fn cursor_cell_is_reversed() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let snap = snapshot();
        let vp = Viewport::new(100, 20);
        let fb = view.render(&snap, vp);

        let (x, y) = view.cell_origin(&snap, vp, 0, 0);
        assert!(fb.get(x, y).unwrap().style.reverse);
        let (x, y) = view.cell_origin(&snap, vp, 0, 1);
        assert!(!fb.get(x, y).unwrap().style.reverse);
    }

    #[test]
    fn narrow_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&snapshot(), Viewport::new(10, 4));
        assert_eq!(fb.width(), 10);
    }

    #[test]
    fn oversized_grid_is_clipped_to_viewport() {
        let config = GameConfig {
            rows: 1,
            cols: 30_000,
            ..GameConfig::default()
        };
        let snap = GameState::with_source(&config, DigitSequence::repeat(4))
            .unwrap()
            .snapshot();
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let vp = Viewport::new(100, 20);

        let fb = view.render(&snap, vp);
        assert_eq!(view.frame_size(&snap).0, u16::MAX);
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(2, 1).unwrap().ch, '4');
        assert_eq!(view.cell_origin(&snap, vp, 0, 29_999).0, u16::MAX);
    }

    #[test]
    fn bar_fills_proportionally() {
        let mut fb = FrameBuffer::new(BAR_W, 1);
        let mut scores = BinScores::new();
        for _ in 0..5 {
            scores.record(Bin::F, true);
        }
        draw_bar(&mut fb, 0, 0, scores.progress(Bin::F));
        assert_eq!(fb.row_text(0), "█████░░░░░");
        draw_bar(&mut fb, 0, 0, scores.progress(Bin::W));
        assert_eq!(fb.row_text(0), "░░░░░░░░░░");
        draw_bar(&mut fb, 0, 0, BinScores::from_array([10, 0, 0, 0]).progress(Bin::W));
        assert_eq!(fb.row_text(0), "██████████");
    }
}
