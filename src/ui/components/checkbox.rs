// src/ui/components/checkbox.rs
//! On/off toggle

use embedded_graphics::prelude::Point;

use crate::display::CharDisplay;
use crate::input::InputEvent;
use crate::ui::components::label::Frame;
use crate::ui::core::{Component, InputResponse};
use crate::ui::painter::Painter;

/// One-cell toggle drawn as `[ ]` or `[✓]`, the checkmark being the custom
/// glyph the screen registers at startup.
#[derive(Debug, Clone, Default)]
pub struct Checkbox {
    checked: bool,
}

impl Checkbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Component for Checkbox {
    fn accepts_focus(&self) -> bool {
        true
    }

    fn handle_input_event(&mut self, event: &InputEvent) -> InputResponse {
        if event.selected {
            self.checked = !self.checked;
        }
        InputResponse::release().with_repaint(event.selected)
    }

    fn width(&self) -> u32 {
        1
    }

    fn paint<D: CharDisplay>(
        &mut self,
        painter: &mut Painter<'_, D>,
        origin: Point,
        focused: bool,
    ) -> Result<(), D::Error> {
        let frame = Frame::for_state(true, focused, false);
        if let Some((open, close)) = frame.brackets() {
            painter.draw_text(origin, open)?;
            painter.draw_text(origin + Point::new(2, 0), close)?;
        }

        let mark = origin + Point::new(1, 0);
        if self.checked {
            let slot = painter.checkmark_slot();
            painter.draw_glyph(mark, slot)
        } else {
            painter.draw_text(mark, " ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::CharBuffer;
    use crate::ui::painter::Rows;

    #[test]
    fn test_select_toggles_without_capture() {
        let mut checkbox = Checkbox::new();

        let response = checkbox.handle_input_event(&InputEvent::select());
        assert!(checkbox.checked());
        assert_eq!(response, InputResponse::release().with_repaint(true));

        checkbox.handle_input_event(&InputEvent::select());
        assert!(!checkbox.checked());

        let response = checkbox.handle_input_event(&InputEvent::scroll(3));
        assert!(!checkbox.checked());
        assert!(!response.repaint);
    }

    #[test]
    fn test_checked_draws_glyph() {
        let mut buffer = CharBuffer::new(3, 1);
        let mut cursor = Point::zero();
        let mut checkbox = Checkbox::new().with_checked(true);
        {
            let mut painter = Painter::new(&mut buffer, Rows::new(0, 1), None, &mut cursor, 5);
            checkbox.paint(&mut painter, Point::zero(), true).unwrap();
        }
        assert_eq!(buffer.row(0), Some(&b"<\x05>"[..]));

        checkbox.set_checked(false);
        {
            let mut painter = Painter::new(&mut buffer, Rows::new(0, 1), None, &mut cursor, 5);
            checkbox.paint(&mut painter, Point::zero(), false).unwrap();
        }
        assert_eq!(buffer.row_text(0), Some("[ ]"));
    }
}
