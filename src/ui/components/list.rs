// src/ui/components/list.rs
//! Scroll-through selection list

use alloc::vec::Vec;
use embedded_graphics::prelude::Point;

use crate::display::CharDisplay;
use crate::error::{UiError, UiResult};
use crate::input::InputEvent;
use crate::ui::components::label::{Caption, Frame, Text, to_text};
use crate::ui::core::{Component, InputResponse};
use crate::ui::painter::Painter;

/// Shows one item of a list at a time.
///
/// Selecting the list captures input; while captured, vertical movement
/// steps through the items (clamped at both ends) and selecting again
/// releases it.
#[derive(Debug, Clone)]
pub struct List {
    items: Vec<Text>,
    max_items: usize,
    selected_index: usize,
    captured: bool,
    caption: Caption,
}

impl List {
    /// Empty list that holds at most `max_items` items.
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Vec::with_capacity(max_items),
            max_items,
            selected_index: 0,
            captured: false,
            caption: Caption::default(),
        }
    }

    /// Builder form of [`List::add_item`] for a fixed set of items.
    pub fn with_items<'a>(items: impl IntoIterator<Item = &'a str>) -> UiResult<Self> {
        let items: Vec<&str> = items.into_iter().collect();
        let mut list = Self::new(items.len());
        for item in items {
            list.add_item(item)?;
        }
        Ok(list)
    }

    pub fn add_item(&mut self, item: &str) -> UiResult<()> {
        if self.items.len() >= self.max_items {
            return Err(UiError::ListFull {
                max: self.max_items,
            });
        }
        self.items.push(to_text(item)?);
        if self.items.len() == 1 {
            self.caption.set(item)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.as_str())
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// `None` only while the list is empty.
    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected_index).map(|item| item.as_str())
    }

    /// Select an item, clamping to the last one.
    pub fn set_selected_index(&mut self, index: usize) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        self.selected_index = index.min(last);
        self.caption.replace(self.items[self.selected_index].clone());
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

impl Component for List {
    fn accepts_focus(&self) -> bool {
        true
    }

    fn handle_input_event(&mut self, event: &InputEvent) -> InputResponse {
        let mut repaint = false;

        if self.captured && event.dy != 0 && !self.items.is_empty() {
            let last = self.items.len() as i64 - 1;
            let target = (self.selected_index as i64 + event.dy as i64).clamp(0, last);
            self.set_selected_index(target as usize);
            repaint = true;
        }

        if event.selected {
            self.captured = !self.captured;
            repaint = true;
        }

        InputResponse {
            captured: self.captured,
            repaint,
        }
    }

    fn release_capture(&mut self) {
        self.captured = false;
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
        self.caption.paint(painter, origin, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> List {
        List::with_items(["C", "F", "K"]).unwrap()
    }

    #[test]
    fn test_first_item_is_shown() {
        let list = units();
        assert_eq!(list.len(), 3);
        assert_eq!(list.selected_index(), 0);
        assert_eq!(list.selected_item(), Some("C"));
        assert_eq!(list.width(), 1);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut list = List::new(1);
        list.add_item("one").unwrap();
        assert_eq!(list.add_item("two"), Err(UiError::ListFull { max: 1 }));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_movement_ignored_until_captured() {
        let mut list = units();
        let response = list.handle_input_event(&InputEvent::scroll(1));
        assert_eq!(list.selected_index(), 0);
        assert!(!response.captured);
    }

    #[test]
    fn test_captured_movement_clamps() {
        let mut list = units();
        assert!(list.handle_input_event(&InputEvent::select()).captured);

        assert!(list.handle_input_event(&InputEvent::scroll(1)).captured);
        assert_eq!(list.selected_item(), Some("F"));

        list.handle_input_event(&InputEvent::scroll(10));
        assert_eq!(list.selected_index(), 2);

        list.handle_input_event(&InputEvent::scroll(-10));
        assert_eq!(list.selected_index(), 0);

        let response = list.handle_input_event(&InputEvent::select());
        assert!(!response.captured);
        assert!(!list.is_captured());
    }

    #[test]
    fn test_set_selected_index_clamps() {
        let mut list = units();
        list.set_selected_index(7);
        assert_eq!(list.selected_item(), Some("K"));

        let mut empty = List::new(2);
        empty.set_selected_index(1);
        assert_eq!(empty.selected_item(), None);
        assert!(empty.handle_input_event(&InputEvent::select()).captured);
    }

    #[test]
    fn test_release_capture() {
        let mut list = units();
        list.handle_input_event(&InputEvent::select());
        list.release_capture();
        assert!(!list.is_captured());
    }
}
