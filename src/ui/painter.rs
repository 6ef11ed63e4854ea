// src/ui/painter.rs
//! Clipped drawing front-end handed to components during paint.

use embedded_graphics::prelude::Point;
use log::trace;

use crate::display::CharDisplay;
use crate::ui::core::ComponentId;

/// Spaces used to blank cells without allocating.
const BLANKS: &str = "                                        ";

/// Half-open band of visible rows, `top..bottom`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rows {
    pub top: i32,
    pub bottom: i32,
}

impl Rows {
    /// `height` rows starting at `top`.
    pub fn new(top: i32, height: u32) -> Self {
        Self {
            top,
            bottom: top.saturating_add(height as i32),
        }
    }

    pub fn contains(&self, row: i32) -> bool {
        row >= self.top && row < self.bottom
    }

    /// Last visible row. Below `top` when the band is empty.
    pub fn last(&self) -> i32 {
        self.bottom - 1
    }

    pub fn intersect(&self, other: Rows) -> Rows {
        Rows {
            top: self.top.max(other.top),
            bottom: self.bottom.min(other.bottom),
        }
    }
}

/// Drawing context for one paint pass.
///
/// Writes outside the current clip band or at negative coordinates are
/// dropped, so components may paint at their stored position without
/// checking whether it is on screen.
pub struct Painter<'a, D: CharDisplay> {
    display: &'a mut D,
    clip: Rows,
    focus: Option<ComponentId>,
    cursor: &'a mut Point,
    checkmark_slot: u8,
}

impl<'a, D: CharDisplay> Painter<'a, D> {
    pub fn new(
        display: &'a mut D,
        clip: Rows,
        focus: Option<ComponentId>,
        cursor: &'a mut Point,
        checkmark_slot: u8,
    ) -> Self {
        Self {
            display,
            clip,
            focus,
            cursor,
            checkmark_slot,
        }
    }

    /// Component holding focus during this pass.
    pub fn focus(&self) -> Option<ComponentId> {
        self.focus
    }

    pub fn clip(&self) -> Rows {
        self.clip
    }

    /// Replace the clip band, returning the previous one.
    pub fn set_clip(&mut self, clip: Rows) -> Rows {
        core::mem::replace(&mut self.clip, clip)
    }

    pub fn is_visible(&self, row: i32) -> bool {
        self.clip.contains(row)
    }

    pub fn checkmark_slot(&self) -> u8 {
        self.checkmark_slot
    }

    fn cell(&self, at: Point) -> Option<(u8, u8)> {
        if !self.is_visible(at.y) {
            trace!("Clipped write at ({}, {})", at.x, at.y);
            return None;
        }
        Some((u8::try_from(at.x).ok()?, u8::try_from(at.y).ok()?))
    }

    pub fn draw_text(&mut self, at: Point, text: &str) -> Result<(), D::Error> {
        match self.cell(at) {
            Some((x, y)) => self.display.draw_text(x, y, text),
            None => Ok(()),
        }
    }

    pub fn draw_glyph(&mut self, at: Point, slot: u8) -> Result<(), D::Error> {
        match self.cell(at) {
            Some((x, y)) => self.display.draw_glyph(x, y, slot),
            None => Ok(()),
        }
    }

    /// Overwrite `width` cells starting at `at` with spaces.
    pub fn blank(&mut self, at: Point, width: u32) -> Result<(), D::Error> {
        let mut remaining = width as usize;
        let mut x = at.x;
        while remaining > 0 {
            let chunk = remaining.min(BLANKS.len());
            self.draw_text(Point::new(x, at.y), &BLANKS[..chunk])?;
            remaining -= chunk;
            x += chunk as i32;
        }
        Ok(())
    }

    /// Record where the hardware cursor goes once painting finishes.
    pub fn set_cursor_location(&mut self, at: Point) {
        *self.cursor = at;
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<(), D::Error> {
        self.display.set_cursor_visible(visible)
    }

    pub fn set_cursor_blink(&mut self, blink: bool) -> Result<(), D::Error> {
        self.display.set_cursor_blink(blink)
    }
}
