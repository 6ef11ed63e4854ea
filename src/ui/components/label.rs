// src/ui/components/label.rs
//! Text label and the caption drawing shared by text-based widgets

use embedded_graphics::prelude::Point;

use crate::display::CharDisplay;
use crate::error::{UiError, UiResult};
use crate::ui::core::Component;
use crate::ui::painter::Painter;

/// Longest text a widget can hold. Matches the widest common character LCD.
pub const TEXT_CAPACITY: usize = 40;

/// Fixed-capacity widget text
pub type Text = heapless::String<TEXT_CAPACITY>;

/// Copy `text` into widget storage, rejecting what the display cannot show.
pub(crate) fn to_text(text: &str) -> UiResult<Text> {
    if !text.is_ascii() {
        return Err(UiError::NonAsciiText);
    }
    let mut out = Text::new();
    out.push_str(text).map_err(|_| UiError::TextTooLong {
        len: text.len(),
        max: TEXT_CAPACITY,
    })?;
    Ok(out)
}

/// Focus decoration drawn around a caption
///
/// - `Unfocused`: `[text]`
/// - `Focused`: `<text>`
/// - `Captured`: `>text<`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    None,
    Unfocused,
    Focused,
    Captured,
}

impl Frame {
    pub fn for_state(accepts_focus: bool, focused: bool, captured: bool) -> Self {
        match (accepts_focus, focused, captured) {
            (false, _, _) => Frame::None,
            (true, false, _) => Frame::Unfocused,
            (true, true, false) => Frame::Focused,
            (true, true, true) => Frame::Captured,
        }
    }

    pub fn brackets(self) -> Option<(&'static str, &'static str)> {
        match self {
            Frame::None => None,
            Frame::Unfocused => Some(("[", "]")),
            Frame::Focused => Some(("<", ">")),
            Frame::Captured => Some((">", "<")),
        }
    }

    /// Cells the opening bracket occupies before the text.
    pub fn inset(self) -> i32 {
        if self == Frame::None { 0 } else { 1 }
    }
}

/// Widget text plus the width of longer text drawn before it, so the
/// leftover cells get blanked exactly once.
#[derive(Debug, Clone, Default)]
pub(crate) struct Caption {
    text: Text,
    stale_width: usize,
}

impl Caption {
    pub fn new(text: &str) -> UiResult<Self> {
        Ok(Self {
            text: to_text(text)?,
            stale_width: 0,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn set(&mut self, text: &str) -> UiResult<()> {
        let text = to_text(text)?;
        self.replace(text);
        Ok(())
    }

    pub fn replace(&mut self, text: Text) {
        if text.len() < self.text.len() {
            self.stale_width = self.stale_width.max(self.text.len());
        }
        self.text = text;
    }

    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.text.as_bytes().get(index).copied()
    }

    /// Swap one character in place. Both characters are ASCII so the text
    /// keeps its width.
    pub fn replace_byte(&mut self, index: usize, code: u8) {
        if index >= self.text.len() || !code.is_ascii() {
            return;
        }
        let mut edited = Text::new();
        for (i, c) in self.text.bytes().enumerate() {
            let c = if i == index { code } else { c };
            // Same length as the current text, so this cannot overflow
            let _ = edited.push(c as char);
        }
        self.text = edited;
    }

    pub fn paint<D: CharDisplay>(
        &mut self,
        painter: &mut Painter<'_, D>,
        origin: Point,
        frame: Frame,
    ) -> Result<(), D::Error> {
        let width = self.text.len() as i32;
        let inset = frame.inset();

        if let Some((open, close)) = frame.brackets() {
            painter.draw_text(origin, open)?;
            painter.draw_text(origin + Point::new(width + 1, 0), close)?;
        }
        painter.draw_text(origin + Point::new(inset, 0), &self.text)?;

        if self.stale_width > self.text.len() {
            let leftover = (self.stale_width - self.text.len()) as u32;
            painter.blank(origin + Point::new(width + 2 * inset, 0), leftover)?;
        }
        self.stale_width = 0;
        Ok(())
    }
}

/// Static text. Never takes focus.
#[derive(Debug, Clone)]
pub struct Label {
    caption: Caption,
}

impl Label {
    pub fn new(text: &str) -> UiResult<Self> {
        Ok(Self {
            caption: Caption::new(text)?,
        })
    }

    pub fn text(&self) -> &str {
        self.caption.as_str()
    }

    /// Replace the text. Shorter text blanks the cells the old text used on
    /// the next paint.
    pub fn set_text(&mut self, text: &str) -> UiResult<()> {
        self.caption.set(text)
    }
}

impl Component for Label {
    fn width(&self) -> u32 {
        self.caption.len() as u32
    }

    fn paint<D: CharDisplay>(
        &mut self,
        painter: &mut Painter<'_, D>,
        origin: Point,
        _focused: bool,
    ) -> Result<(), D::Error> {
        self.caption.paint(painter, origin, Frame::None)
    }
}
