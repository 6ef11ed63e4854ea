//! Screen: the root container and per-frame input/focus/paint loop.
//!
//! The host builds a [`Screen`], adds components to it, then calls
//! [`Screen::update`] once per main-loop iteration. After each call the
//! host reads widget state back through [`Screen::widget`].

use embedded_graphics::prelude::Point;
use log::debug;

use crate::config::{NavigationAxis, ScreenConfig};
use crate::display::{CHECKMARK, CharDisplay};
use crate::error::{UiError, UiResult};
use crate::input::{InputEvent, InputSource};
use crate::ui::core::{ComponentId, Node, Widget, WidgetKind};
use crate::ui::layouts::Container;
use crate::ui::painter::{Painter, Rows};
use crate::ui::tree::ComponentTree;

/// Who receives input on the next frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Nothing focused yet (or nothing can take focus)
    #[default]
    Unfocused,
    /// Movement navigates focus; select is forwarded to the holder
    Idle(ComponentId),
    /// Every input event goes to the holder until it releases capture
    Captured(ComponentId),
}

impl FocusState {
    pub fn holder(&self) -> Option<ComponentId> {
        match *self {
            FocusState::Unfocused => None,
            FocusState::Idle(id) | FocusState::Captured(id) => Some(id),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, FocusState::Captured(_))
    }
}

pub struct Screen<D: CharDisplay, I: InputSource> {
    tree: ComponentTree,
    root: ComponentId,
    display: D,
    input: I,
    config: ScreenConfig,
    focus: FocusState,
    cursor: Point,
    cleared: bool,
    focus_moved: bool,
}

impl<D: CharDisplay, I: InputSource> Screen<D, I> {
    /// Create an empty screen and register the checkmark glyph.
    pub fn new(mut display: D, input: I, config: ScreenConfig) -> Result<Self, D::Error> {
        display.create_glyph(config.glyph_slot(), &CHECKMARK)?;

        let mut tree = ComponentTree::new();
        let root = tree.insert(
            Container::with_size(config.width as u32, config.height as u32).into(),
        );

        Ok(Self {
            tree,
            root,
            display,
            input,
            config,
            focus: FocusState::Unfocused,
            cursor: Point::zero(),
            cleared: false,
            focus_moved: false,
        })
    }

    /// Add a component to the screen at an absolute cell position.
    pub fn add(&mut self, widget: impl Into<Widget>, x: i32, y: i32) -> UiResult<ComponentId> {
        self.tree.add(self.root, widget, x, y)
    }

    /// Add a component to a container already on the screen, at a position
    /// relative to that container.
    pub fn add_to(
        &mut self,
        parent: ComponentId,
        widget: impl Into<Widget>,
        x: i32,
        y: i32,
    ) -> UiResult<ComponentId> {
        self.tree.add(parent, widget, x, y)
    }

    /// Run one frame: poll input, route it or move focus, then paint
    /// whatever changed.
    pub fn update(&mut self) -> Result<(), D::Error> {
        if !self.cleared {
            debug!("Clearing display before first frame");
            self.display.clear()?;
            self.cleared = true;
        }

        self.tree.update(self.root);
        let event = self.input.poll();

        if let Some(holder) = self.focus.holder()
            && !self.tree.is_live(holder)
        {
            debug!("Dropping stale focus holder {:?}", holder);
            self.focus = FocusState::Unfocused;
        }
        let previous = self.focus.holder();

        if !event.is_idle() {
            self.focus = self.route_event(&event);
        }
        if self.focus.holder().is_none()
            && let Some(first) = self.tree.next_focus_holder(self.root, None, false)
        {
            self.focus = FocusState::Idle(first);
        }

        let current = self.focus.holder();
        if previous != current {
            debug!("Focus moved from {:?} to {:?}", previous, current);
            if let Some(old) = previous {
                self.tree.repaint(old);
            }
            if let Some(new) = current {
                self.tree.repaint(new);
            }
            self.focus_moved = true;
        }
        if self.focus_moved {
            // the new holder turns the cursor back on when it paints
            self.display.set_cursor_visible(false)?;
            self.display.set_cursor_blink(false)?;
            self.focus_moved = false;
        }

        self.paint(current)?;
        self.display.move_cursor(clamp_cell(self.cursor.x), clamp_cell(self.cursor.y))
    }

    fn paint(&mut self, focus: Option<ComponentId>) -> Result<(), D::Error> {
        if !self.tree.is_dirty(self.root, focus) {
            return Ok(());
        }
        let mut painter = Painter::new(
            &mut self.display,
            Rows::new(0, self.config.height as u32),
            focus,
            &mut self.cursor,
            self.config.glyph_slot(),
        );
        self.tree.paint(self.root, &mut painter)
    }

    fn route_event(&mut self, event: &InputEvent) -> FocusState {
        match self.focus {
            FocusState::Captured(holder) => self.dispatch(holder, event),
            FocusState::Idle(holder) if event.selected => self.dispatch(holder, event),
            focus if event.selected => focus,
            focus => match self.navigation_delta(event).signum() {
                1 => self.move_focus(focus, false),
                -1 => self.move_focus(focus, true),
                _ => focus,
            },
        }
    }

    fn dispatch(&mut self, holder: ComponentId, event: &InputEvent) -> FocusState {
        let captured = self.tree.handle_input_event(holder, event);
        if captured != self.focus.is_captured() {
            debug!(
                "{:?} {} input",
                holder,
                if captured { "captured" } else { "released" }
            );
        }
        if captured {
            FocusState::Captured(holder)
        } else {
            FocusState::Idle(holder)
        }
    }

    fn navigation_delta(&self, event: &InputEvent) -> i32 {
        match self.config.navigation_axis {
            NavigationAxis::Vertical => event.dy,
            NavigationAxis::Horizontal => event.dx,
        }
    }

    /// Step focus to the next eligible leaf, wrapping at either end when
    /// configured to.
    fn move_focus(&self, focus: FocusState, reverse: bool) -> FocusState {
        let current = focus.holder();
        let next = self
            .tree
            .next_focus_holder(self.root, current, reverse)
            .or_else(|| {
                if self.config.wrap_focus {
                    self.tree.next_focus_holder(self.root, None, reverse)
                } else {
                    None
                }
            });

        match next {
            Some(next) => FocusState::Idle(next),
            None => focus,
        }
    }

    /// Focus a component before (or between) frames, e.g. to preselect a
    /// default button. Any capture held by the previous holder is dropped.
    pub fn set_focus_holder(&mut self, id: ComponentId) -> UiResult<()> {
        let node = self.tree.get(id).ok_or(UiError::UnknownComponent)?;
        if !node.accepts_focus() || !self.tree.contains(self.root, id) {
            return Err(UiError::FocusRejected);
        }

        match self.focus {
            FocusState::Captured(previous) => self.tree.release_capture(previous),
            FocusState::Idle(previous) => self.tree.repaint(previous),
            FocusState::Unfocused => {}
        }
        self.focus = FocusState::Idle(id);
        self.focus_moved = true;
        self.tree.repaint(id);
        Ok(())
    }

    pub fn focus_holder(&self) -> Option<ComponentId> {
        self.focus.holder()
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    pub fn is_focus_captured(&self) -> bool {
        self.focus.is_captured()
    }

    /// Where the hardware cursor is placed after each frame.
    pub fn cursor_location(&self) -> Point {
        self.cursor
    }

    pub fn set_cursor_location(&mut self, x: u8, y: u8) {
        self.cursor = Point::new(x as i32, y as i32);
    }

    /// Typed read access to a component's widget.
    pub fn widget<W: WidgetKind>(&self, id: ComponentId) -> Option<&W> {
        self.tree.widget(id)
    }

    /// Change a widget and schedule it for painting.
    pub fn widget_mut<W: WidgetKind, R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut W) -> R,
    ) -> Option<R> {
        let result = self.tree.widget_mut(id).map(f)?;
        self.tree.repaint(id);
        Some(result)
    }

    pub fn component(&self, id: ComponentId) -> Option<&Node> {
        self.tree.get(id)
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    /// Repaint everything on the next frame.
    pub fn repaint(&mut self) {
        self.tree.repaint(self.root);
    }

    pub fn is_dirty(&self) -> bool {
        self.tree.is_dirty(self.root, self.focus.holder())
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn into_parts(self) -> (D, I) {
        (self.display, self.input)
    }
}

fn clamp_cell(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::buffer::CharBuffer;
    use crate::input::ScriptedInput;
    use crate::ui::components::{Button, Checkbox, Input, Label, List};
    use crate::ui::layouts::ScrollContainer;

    type TestScreen = Screen<CharBuffer, ScriptedInput>;

    fn screen(config: ScreenConfig) -> TestScreen {
        let width = config.width;
        let height = config.height;
        Screen::new(CharBuffer::new(width, height), ScriptedInput::new(), config).unwrap()
    }

    fn frame(screen: &mut TestScreen, event: InputEvent) {
        screen.input_mut().push(event);
        screen.update().unwrap();
    }

    fn row(screen: &TestScreen, y: u8) -> &str {
        screen.display().row_text(y).unwrap()
    }

    /// Four-row screen, title on row 0, two-row viewport at row 1 over five
    /// buttons.
    fn scrolling_menu() -> (TestScreen, ComponentId, Vec<ComponentId>) {
        let mut screen = screen(ScreenConfig::new(8, 4));
        screen.add(Label::new("menu").unwrap(), 0, 0).unwrap();
        let scroll = screen.add(ScrollContainer::new(8, 2), 0, 1).unwrap();
        let rows = ["1", "2", "3", "4", "5"]
            .iter()
            .enumerate()
            .map(|(y, text)| {
                screen
                    .add_to(scroll, Button::new(text).unwrap(), 0, y as i32)
                    .unwrap()
            })
            .collect();
        (screen, scroll, rows)
    }

    fn scroll_offset(screen: &TestScreen, scroll: ComponentId) -> i32 {
        screen.widget::<ScrollContainer>(scroll).unwrap().scroll_offset()
    }

    #[test]
    fn test_new_registers_checkmark_glyph() {
        let screen = screen(ScreenConfig::new(16, 2).with_checkmark_slot(3));
        assert_eq!(screen.display().glyph(3), Some(&CHECKMARK));
        assert_eq!(screen.display().glyph(7), None);
    }

    #[test]
    fn test_first_frame_clears_once_and_paints_everything() {
        let mut screen = screen(ScreenConfig::new(8, 2));
        let ok = screen.add(Button::new("ok").unwrap(), 0, 0).unwrap();
        screen.add(Label::new("hi").unwrap(), 0, 1).unwrap();

        screen.update().unwrap();
        assert_eq!(screen.display().clears(), 1);
        assert_eq!(screen.focus_holder(), Some(ok));
        assert_eq!(row(&screen, 0), "<ok>    ");
        assert_eq!(row(&screen, 1), "hi      ");

        screen.update().unwrap();
        assert_eq!(screen.display().clears(), 1);
    }

    #[test]
    fn test_idle_frames_draw_nothing() {
        let mut screen = screen(ScreenConfig::new(8, 2));
        screen.add(Button::new("ok").unwrap(), 0, 0).unwrap();
        screen.add(Checkbox::new(), 0, 1).unwrap();
        screen.update().unwrap();

        screen.display_mut().reset_stats();
        screen.update().unwrap();
        screen.update().unwrap();
        assert_eq!(screen.display().draw_calls(), 0);
        assert!(!screen.is_dirty());
    }

    #[test]
    fn test_scrolling_menu_visits_rows_in_order() {
        let (mut screen, scroll, rows) = scrolling_menu();

        screen.update().unwrap();
        assert_eq!(screen.focus_holder(), Some(rows[0]));
        assert_eq!(row(&screen, 1), "<1>     ");
        assert_eq!(row(&screen, 2), "[2]     ");

        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_holder(), Some(rows[1]));
        assert_eq!(scroll_offset(&screen, scroll), 0);

        for (step, &expected) in rows[2..].iter().enumerate() {
            frame(&mut screen, InputEvent::scroll(1));
            assert_eq!(screen.focus_holder(), Some(expected));
            assert_eq!(scroll_offset(&screen, scroll), -(step as i32 + 1));
            assert_eq!(screen.component(expected).unwrap().y(), 2);
        }

        assert_eq!(row(&screen, 0), "menu    ");
        assert_eq!(row(&screen, 1), "[4]     ");
        assert_eq!(row(&screen, 2), "<5>     ");
        assert_eq!(row(&screen, 3), "        ");
    }

    #[test]
    fn test_focus_wraps_at_both_ends() {
        let (mut screen, scroll, rows) = scrolling_menu();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::scroll(-1));
        assert_eq!(screen.focus_holder(), Some(rows[4]));
        assert_eq!(scroll_offset(&screen, scroll), -3);

        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_holder(), Some(rows[0]));
        assert_eq!(scroll_offset(&screen, scroll), 0);
        assert_eq!(row(&screen, 1), "<1>     ");
    }

    #[test]
    fn test_single_leaf_reselects_itself() {
        let mut screen = screen(ScreenConfig::new(8, 2));
        let only = screen.add(Button::new("ok").unwrap(), 0, 0).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_holder(), Some(only));
        frame(&mut screen, InputEvent::scroll(-1));
        assert_eq!(screen.focus_holder(), Some(only));
    }

    #[test]
    fn test_wrap_can_be_disabled() {
        let mut screen = screen(ScreenConfig::new(8, 2).with_wrap_focus(false));
        let first = screen.add(Button::new("a").unwrap(), 0, 0).unwrap();
        let last = screen.add(Button::new("b").unwrap(), 0, 1).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::scroll(-1));
        assert_eq!(screen.focus_holder(), Some(first));
        frame(&mut screen, InputEvent::scroll(1));
        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_holder(), Some(last));
    }

    #[test]
    fn test_horizontal_axis_ignores_vertical_movement() {
        let config = ScreenConfig::new(8, 1).with_navigation_axis(NavigationAxis::Horizontal);
        let mut screen = screen(config);
        let left = screen.add(Button::new("a").unwrap(), 0, 0).unwrap();
        let right = screen.add(Button::new("b").unwrap(), 4, 0).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_holder(), Some(left));
        frame(&mut screen, InputEvent::shift(1));
        assert_eq!(screen.focus_holder(), Some(right));
        assert_eq!(row(&screen, 0), "[a] <b> ");
    }

    #[test]
    fn test_select_without_focusable_leaves_is_harmless() {
        let mut screen = screen(ScreenConfig::new(8, 1));
        screen.add(Label::new("idle").unwrap(), 0, 0).unwrap();

        frame(&mut screen, InputEvent::select());
        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_state(), FocusState::Unfocused);
        assert_eq!(row(&screen, 0), "idle    ");
    }

    #[test]
    fn test_button_is_pressed_for_one_frame() {
        let mut screen = screen(ScreenConfig::new(8, 1));
        let ok = screen.add(Button::new("ok").unwrap(), 0, 0).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::select());
        assert!(screen.widget::<Button>(ok).unwrap().pressed());
        assert!(!screen.is_focus_captured());

        screen.update().unwrap();
        assert!(!screen.widget::<Button>(ok).unwrap().pressed());
    }

    #[test]
    fn test_checkbox_toggles_checkmark_glyph() {
        let mut screen = screen(ScreenConfig::new(4, 1));
        let check = screen.add(Checkbox::new(), 0, 0).unwrap();
        screen.update().unwrap();
        assert_eq!(screen.display().cell(1, 0), Some(b' '));

        frame(&mut screen, InputEvent::select());
        assert!(screen.widget::<Checkbox>(check).unwrap().checked());
        assert_eq!(screen.display().cell(1, 0), Some(7));
    }

    #[test]
    fn test_captured_list_consumes_movement() {
        let mut screen = screen(ScreenConfig::new(8, 2));
        let unit = screen
            .add(List::with_items(["C", "F", "K"]).unwrap(), 0, 0)
            .unwrap();
        let ok = screen.add(Button::new("ok").unwrap(), 0, 1).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::select());
        assert_eq!(screen.focus_state(), FocusState::Captured(unit));
        assert_eq!(row(&screen, 0), ">C<     ");

        frame(&mut screen, InputEvent::scroll(1));
        frame(&mut screen, InputEvent::scroll(5));
        assert_eq!(screen.focus_holder(), Some(unit));
        assert_eq!(screen.widget::<List>(unit).unwrap().selected_item(), Some("K"));
        assert_eq!(row(&screen, 0), ">K<     ");

        frame(&mut screen, InputEvent::select());
        assert_eq!(screen.focus_state(), FocusState::Idle(unit));
        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_holder(), Some(ok));
        assert_eq!(row(&screen, 0), "[K]     ");
    }

    #[test]
    fn test_cancel_is_routed_without_moving_focus() {
        let mut screen = screen(ScreenConfig::new(8, 2));
        let unit = screen
            .add(List::with_items(["C", "F", "K"]).unwrap(), 0, 0)
            .unwrap();
        screen.add(Button::new("ok").unwrap(), 0, 1).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::cancel());
        assert_eq!(screen.focus_state(), FocusState::Idle(unit));

        frame(&mut screen, InputEvent::select());
        frame(&mut screen, InputEvent::cancel());
        assert_eq!(screen.focus_state(), FocusState::Captured(unit));
        assert_eq!(screen.widget::<List>(unit).unwrap().selected_index(), 0);
        assert_eq!(row(&screen, 0), ">C<     ");
    }

    #[test]
    fn test_text_input_edits_through_charset() {
        let mut screen = screen(ScreenConfig::new(12, 1));
        let hex = screen.add(Input::new("0xffee").unwrap(), 2, 0).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::select());
        assert!(screen.is_focus_captured());
        assert!(screen.display().cursor().blink);

        frame(&mut screen, InputEvent::select());
        assert!(screen.widget::<Input>(hex).unwrap().is_editing());

        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.widget::<Input>(hex).unwrap().text(), "1xffee");
        assert_eq!(row(&screen, 0), "  >1xffee<  ");

        let cursor = screen.display().cursor();
        assert!(cursor.visible);
        assert!(!cursor.blink);
        assert_eq!((cursor.x, cursor.y), (3, 0));
    }

    #[test]
    fn test_cursor_hidden_when_focus_leaves_input() {
        let mut screen = screen(ScreenConfig::new(12, 2));
        screen.add(Input::new("ab").unwrap(), 0, 0).unwrap();
        let ok = screen.add(Button::new("ok").unwrap(), 0, 1).unwrap();
        screen.update().unwrap();
        frame(&mut screen, InputEvent::select());
        assert!(screen.display().cursor().blink);

        screen.set_focus_holder(ok).unwrap();
        screen.update().unwrap();
        let cursor = screen.display().cursor();
        assert!(!cursor.visible);
        assert!(!cursor.blink);
    }

    #[test]
    fn test_text_input_releases_past_left_edge() {
        let mut screen = screen(ScreenConfig::new(12, 2));
        let input = screen.add(Input::new("ab").unwrap(), 0, 0).unwrap();
        let next = screen.add(Button::new("go").unwrap(), 0, 1).unwrap();
        screen.update().unwrap();

        frame(&mut screen, InputEvent::select());
        frame(&mut screen, InputEvent::scroll(-1));
        assert_eq!(screen.focus_state(), FocusState::Idle(input));

        frame(&mut screen, InputEvent::scroll(1));
        assert_eq!(screen.focus_holder(), Some(next));
    }

    #[test]
    fn test_set_focus_holder_validates_target() {
        let mut screen = screen(ScreenConfig::new(8, 2));
        let label = screen.add(Label::new("x").unwrap(), 0, 0).unwrap();
        let ok = screen.add(Button::new("ok").unwrap(), 0, 1).unwrap();

        assert_eq!(screen.set_focus_holder(label), Err(UiError::FocusRejected));
        assert_eq!(
            screen.set_focus_holder(screen.root()),
            Err(UiError::FocusRejected)
        );
        assert_eq!(screen.set_focus_holder(ok), Ok(()));

        screen.update().unwrap();
        assert_eq!(screen.focus_holder(), Some(ok));
        assert_eq!(row(&screen, 1), "<ok>    ");
    }

    #[test]
    fn test_set_focus_holder_releases_capture() {
        let mut screen = screen(ScreenConfig::new(8, 2));
        let unit = screen.add(List::with_items(["C", "F"]).unwrap(), 0, 0).unwrap();
        let ok = screen.add(Button::new("ok").unwrap(), 0, 1).unwrap();
        screen.update().unwrap();
        frame(&mut screen, InputEvent::select());
        assert!(screen.is_focus_captured());

        screen.set_focus_holder(ok).unwrap();
        assert!(!screen.widget::<List>(unit).unwrap().is_captured());
        screen.update().unwrap();
        assert_eq!(row(&screen, 0), "[C]     ");
        assert_eq!(row(&screen, 1), "<ok>    ");
    }

    #[test]
    fn test_widget_mut_repaints_shorter_text() {
        let mut screen = screen(ScreenConfig::new(8, 1));
        let label = screen.add(Label::new("12.5C").unwrap(), 0, 0).unwrap();
        screen.update().unwrap();

        screen
            .widget_mut::<Label, _>(label, |l| l.set_text("9C"))
            .unwrap()
            .unwrap();
        assert!(screen.is_dirty());
        screen.update().unwrap();
        assert_eq!(row(&screen, 0), "9C      ");
        assert_eq!(screen.widget_mut::<Button, _>(label, |_| ()), None);
    }
}
