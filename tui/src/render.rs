//! Buffer Renderer
//!
//! Draws scene glyphs into a ratatui [`Buffer`]. Scene coordinates are
//! relative to the renderer's area; glyphs outside it are dropped, which is
//! normal while a row swings left of the list during a move.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use reflow_core::{Renderer, Rgb};

use crate::theme::to_color;

/// [`Renderer`] that writes into a region of a ratatui buffer
pub struct BufferRenderer<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferRenderer<'a> {
    /// Render into `area`, which is clipped to the buffer
    pub fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buf.area);
        Self { buf, area }
    }

    fn cell_position(&self, col: i32, row: i32) -> Option<(u16, u16)> {
        let col = u16::try_from(col).ok()?;
        let row = u16::try_from(row).ok()?;
        if col >= self.area.width || row >= self.area.height {
            return None;
        }
        Some((self.area.x + col, self.area.y + row))
    }
}

impl Renderer for BufferRenderer<'_> {
    fn clear(&mut self) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn draw_glyph(&mut self, col: i32, row: i32, glyph: char, fg: Rgb, bg: Rgb) {
        let Some(position) = self.cell_position(col, row) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut(position) {
            cell.set_char(glyph).set_fg(to_color(fg)).set_bg(to_color(bg));
        }
    }
}
