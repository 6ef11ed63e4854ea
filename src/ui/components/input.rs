// src/ui/components/input.rs
//! Fixed-width text entry driven by an encoder

use embedded_graphics::prelude::Point;

use crate::charset::CharacterSet;
use crate::display::CharDisplay;
use crate::error::UiResult;
use crate::input::InputEvent;
use crate::ui::components::label::{Caption, Frame};
use crate::ui::core::{Component, InputResponse};
use crate::ui::painter::Painter;

/// Edits one character of a fixed-width string at a time.
///
/// Selecting the input captures it in *navigating* mode with the cursor on
/// the first character; vertical movement moves the cursor, and moving past
/// either end releases capture. Selecting again switches to *editing* mode,
/// where vertical movement steps the character under the cursor through the
/// input's [`CharacterSet`]. Each further select toggles between the two.
#[derive(Debug, Clone)]
pub struct Input {
    caption: Caption,
    charset: CharacterSet,
    position: usize,
    editing: bool,
    captured: bool,
}

impl Input {
    /// Input over `text` using [`CharacterSet::DEFAULT`].
    pub fn new(text: &str) -> UiResult<Self> {
        Ok(Self {
            caption: Caption::new(text)?,
            charset: CharacterSet::DEFAULT,
            position: 0,
            editing: false,
            captured: false,
        })
    }

    pub fn with_charset(mut self, charset: CharacterSet) -> Self {
        self.charset = charset;
        self
    }

    pub fn text(&self) -> &str {
        self.caption.as_str()
    }

    /// Replace the text and return to navigating mode at the first cell.
    pub fn set_text(&mut self, text: &str) -> UiResult<()> {
        self.caption.set(text)?;
        self.position = 0;
        self.editing = false;
        Ok(())
    }

    pub fn charset(&self) -> &CharacterSet {
        &self.charset
    }

    /// Cursor position within the text.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    fn edit(&mut self, delta: i32) {
        if let Some(current) = self.caption.byte_at(self.position)
            && let Some(next) = self.charset.step(current, delta)
        {
            self.caption.replace_byte(self.position, next);
        }
    }

    fn navigate(&mut self, delta: i32) {
        let target = self.position as i64 + delta as i64;
        let width = self.caption.len() as i64;
        if target < 0 || target >= width {
            self.captured = false;
            self.position = target.clamp(0, (width - 1).max(0)) as usize;
        } else {
            self.position = target as usize;
        }
    }
}

impl Component for Input {
    fn accepts_focus(&self) -> bool {
        true
    }

    fn handle_input_event(&mut self, event: &InputEvent) -> InputResponse {
        let mut repaint = false;

        if self.captured && event.dy != 0 {
            if self.editing {
                self.edit(event.dy);
            } else {
                self.navigate(event.dy);
            }
            repaint = true;
        }

        if event.selected {
            if self.captured {
                self.editing = !self.editing;
            } else {
                self.captured = true;
                self.position = 0;
                self.editing = false;
            }
            repaint = true;
        }

        InputResponse {
            captured: self.captured,
            repaint,
        }
    }

    fn release_capture(&mut self) {
        self.captured = false;
        self.editing = false;
    }

    fn width(&self) -> u32 {
        self.caption.len() as u32
    }

    fn paint<D: CharDisplay>(
        &mut self,
        painter: &mut Painter<'_, D>,
        origin: Point,
        focused: bool,
    ) -> Result<(), D::Error> {
        let frame = Frame::for_state(true, focused, self.captured);
        self.caption.paint(painter, origin, frame)?;

        if focused {
            // steady cursor on the cell being edited, blinking while navigating
            painter.set_cursor_visible(self.captured && self.editing)?;
            painter.set_cursor_blink(self.captured && !self.editing)?;
            painter.set_cursor_location(origin + Point::new(self.position as i32 + 1, 0));
        }
        Ok(())
    }
}
