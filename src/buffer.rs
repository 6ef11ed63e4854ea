//! RAM-backed character display.
//!
//! [`CharBuffer`] implements [`CharDisplay`] over an in-memory grid of
//! character codes. It records how many writes reached it so redraw
//! minimisation can be observed, and the simulator prints its rows.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use log::trace;

use crate::display::{CharDisplay, GlyphBitmap};
use crate::config::GLYPH_SLOTS;

const BLANK: u8 = b' ';

/// Hardware cursor state as last set through [`CharDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub x: u8,
    pub y: u8,
    pub visible: bool,
    pub blink: bool,
}

pub struct CharBuffer {
    width: u8,
    height: u8,
    cells: Vec<u8>,
    glyphs: [Option<GlyphBitmap>; GLYPH_SLOTS as usize],
    cursor: CursorState,
    draw_calls: usize,
    clears: usize,
}

impl CharBuffer {
    /// Allocate a blank buffer of `width` x `height` cells.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; width as usize * height as usize],
            glyphs: [None; GLYPH_SLOTS as usize],
            cursor: CursorState::default(),
            draw_calls: 0,
            clears: 0,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Raw character codes of one row. Custom glyphs appear as their slot.
    pub fn row(&self, y: u8) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// One row as text. Every cell holds an ASCII code, so this only fails
    /// for rows outside the buffer.
    pub fn row_text(&self, y: u8) -> Option<&str> {
        self.row(y).and_then(|row| core::str::from_utf8(row).ok())
    }

    /// Character code at a cell.
    pub fn cell(&self, x: u8, y: u8) -> Option<u8> {
        self.row(y).and_then(|row| row.get(x as usize).copied())
    }

    pub fn glyph(&self, slot: u8) -> Option<&GlyphBitmap> {
        self.glyphs.get(slot as usize).and_then(Option::as_ref)
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Number of `draw_text`/`draw_glyph` calls since the last reset.
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    /// Number of full clears since the last reset.
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn reset_stats(&mut self) {
        self.draw_calls = 0;
        self.clears = 0;
    }

    fn put(&mut self, x: usize, y: usize, code: u8) {
        if x < self.width as usize && y < self.height as usize {
            self.cells[y * self.width as usize + x] = code;
        }
    }
}

impl CharDisplay for CharBuffer {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.cells.fill(BLANK);
        self.clears += 1;
        Ok(())
    }

    fn create_glyph(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), Self::Error> {
        if let Some(entry) = self.glyphs.get_mut(slot as usize) {
            *entry = Some(*bitmap);
        }
        Ok(())
    }

    fn draw_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), Self::Error> {
        self.draw_calls += 1;
        if y >= self.height {
            trace!("Dropping text below the buffer at row {}", y);
        }
        for (i, code) in text.bytes().enumerate() {
            self.put(x as usize + i, y as usize, code);
        }
        Ok(())
    }

    fn draw_glyph(&mut self, x: u8, y: u8, slot: u8) -> Result<(), Self::Error> {
        self.draw_calls += 1;
        self.put(x as usize, y as usize, slot);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), Self::Error> {
        self.cursor.visible = visible;
        Ok(())
    }

    fn set_cursor_blink(&mut self, blink: bool) -> Result<(), Self::Error> {
        self.cursor.blink = blink;
        Ok(())
    }

    fn move_cursor(&mut self, x: u8, y: u8) -> Result<(), Self::Error> {
        self.cursor.x = x;
        self.cursor.y = y;
        Ok(())
    }
}
