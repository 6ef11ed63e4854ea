// src/ui/components/button.rs
//! Push button

use embedded_graphics::prelude::Point;

use crate::display::CharDisplay;
use crate::error::UiResult;
use crate::input::InputEvent;
use crate::ui::components::label::{Caption, Frame};
use crate::ui::core::{Component, InputResponse};
use crate::ui::painter::Painter;

/// Focusable text that reports a press for the frame it was selected in.
///
/// A button never keeps input captured, so the next movement goes straight
/// back to focus navigation.
#[derive(Debug, Clone)]
pub struct Button {
    caption: Caption,
    pressed: bool,
}

impl Button {
    pub fn new(text: &str) -> UiResult<Self> {
        Ok(Self {
            caption: Caption::new(text)?,
            pressed: false,
        })
    }

    /// True only during the frame in which the button was selected.
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn text(&self) -> &str {
        self.caption.as_str()
    }

    pub fn set_text(&mut self, text: &str) -> UiResult<()> {
        self.caption.set(text)
    }
}

impl Component for Button {
    fn accepts_focus(&self) -> bool {
        true
    }

    fn update(&mut self) {
        self.pressed = false;
    }

    fn handle_input_event(&mut self, event: &InputEvent) -> InputResponse {
        self.pressed = event.selected;
        InputResponse::release()
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
        self.caption
            .paint(painter, origin, Frame::for_state(true, focused, false))
    }
}
