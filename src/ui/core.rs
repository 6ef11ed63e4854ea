// src/ui/core.rs
//! Core UI traits and types for the screen UI system

use embedded_graphics::prelude::{Point, Size};
use slotmap::new_key_type;

use crate::display::CharDisplay;
use crate::input::InputEvent;
use crate::ui::components::{Button, Checkbox, Input, Label, List};
use crate::ui::layouts::{Container, ScrollContainer};
use crate::ui::painter::Painter;

new_key_type! {
    /// Handle to a component in a [`ComponentTree`](crate::ui::ComponentTree).
    ///
    /// Handles are generational: a handle to a slot that has been reused no
    /// longer resolves, so holding one never keeps a dangling reference.
    pub struct ComponentId;
}

/// Result from routing an input event to the focused component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// Keep receiving input on following frames instead of yielding it to
    /// focus navigation
    pub captured: bool,
    /// The component's appearance changed and it needs to be painted
    pub repaint: bool,
}

impl InputResponse {
    /// Give input back to focus navigation.
    pub fn release() -> Self {
        Self::default()
    }

    /// Keep receiving input on following frames.
    pub fn capture() -> Self {
        Self {
            captured: true,
            repaint: false,
        }
    }

    pub fn with_repaint(mut self, repaint: bool) -> Self {
        self.repaint = repaint;
        self
    }
}

/// Behaviour shared by every leaf widget.
///
/// Containers are not components in this sense: the tree walks them
/// directly, so only leaves are ever focused, updated or painted through
/// this trait.
pub trait Component {
    /// Whether focus navigation may stop on this component.
    fn accepts_focus(&self) -> bool {
        false
    }

    /// Per-frame housekeeping, called before input is routed.
    fn update(&mut self) {}

    /// Handle input while focused (and selected or captured).
    fn handle_input_event(&mut self, _event: &InputEvent) -> InputResponse {
        InputResponse::release()
    }

    /// Drop any capture state because focus was taken away externally.
    fn release_capture(&mut self) {}

    /// Width in character cells, excluding focus decorations.
    fn width(&self) -> u32;

    fn height(&self) -> u32 {
        1
    }

    /// Draw at `origin`. Only called when the component is dirty and visible.
    fn paint<D: CharDisplay>(
        &mut self,
        painter: &mut Painter<'_, D>,
        origin: Point,
        focused: bool,
    ) -> Result<(), D::Error>;
}

/// Every kind of node the tree can hold
pub enum Widget {
    Label(Label),
    Button(Button),
    Checkbox(Checkbox),
    List(List),
    Input(Input),
    Container(Container),
    Scroll(ScrollContainer),
}

/// Run `$body` with `$leaf` bound to the leaf component, or evaluate
/// `$fallback` for containers.
macro_rules! with_leaf {
    ($widget:expr, |$leaf:ident| $body:expr, else $fallback:expr) => {
        match $widget {
            Widget::Label($leaf) => $body,
            Widget::Button($leaf) => $body,
            Widget::Checkbox($leaf) => $body,
            Widget::List($leaf) => $body,
            Widget::Input($leaf) => $body,
            Widget::Container(_) | Widget::Scroll(_) => $fallback,
        }
    };
}
pub(crate) use with_leaf;

/// Coarse node classification used when walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Leaf,
    Container,
    Scroll,
}

impl Widget {
    pub fn is_container(&self) -> bool {
        matches!(self, Widget::Container(_) | Widget::Scroll(_))
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Widget::Container(_) => NodeKind::Container,
            Widget::Scroll(_) => NodeKind::Scroll,
            _ => NodeKind::Leaf,
        }
    }

    /// Child bookkeeping shared by plain and scrolling containers.
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Widget::Container(container) => Some(container),
            Widget::Scroll(scroll) => Some(scroll.container()),
            _ => None,
        }
    }

    pub(crate) fn as_container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Widget::Container(container) => Some(container),
            Widget::Scroll(scroll) => Some(scroll.container_mut()),
            _ => None,
        }
    }

    pub fn accepts_focus(&self) -> bool {
        with_leaf!(self, |leaf| leaf.accepts_focus(), else false)
    }
}

/// Typed access to the widget stored in a node
pub trait WidgetKind: Sized {
    fn from_widget(widget: &Widget) -> Option<&Self>;
    fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self>;
}

macro_rules! widget_kinds {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Widget {
                fn from(widget: $ty) -> Self {
                    Widget::$variant(widget)
                }
            }

            impl WidgetKind for $ty {
                fn from_widget(widget: &Widget) -> Option<&Self> {
                    match widget {
                        Widget::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }

                fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self> {
                    match widget {
                        Widget::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

widget_kinds! {
    Label => Label,
    Button => Button,
    Checkbox => Checkbox,
    List => List,
    Input => Input,
    Container => Container,
    Scroll => ScrollContainer,
}

/// A positioned widget plus its dirty flag
pub struct Node {
    origin: Point,
    dirty: bool,
    widget: Widget,
}

impl Node {
    /// Nodes start dirty so their first frame always paints them.
    pub(crate) fn new(widget: Widget) -> Self {
        Self {
            origin: Point::zero(),
            dirty: true,
            widget,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn x(&self) -> i32 {
        self.origin.x
    }

    pub fn y(&self) -> i32 {
        self.origin.y
    }

    pub(crate) fn set_location(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Leaves size themselves from their content; containers carry an
    /// explicit size.
    pub fn size(&self) -> Size {
        match &self.widget {
            Widget::Container(container) => container.size(),
            Widget::Scroll(scroll) => scroll.container().size(),
            leaf => with_leaf!(leaf, |c| Size::new(c.width(), c.height()), else Size::zero()),
        }
    }

    pub fn width(&self) -> u32 {
        self.size().width
    }

    pub fn height(&self) -> u32 {
        self.size().height
    }

    /// Resize a container. Leaves keep their content size.
    pub(crate) fn set_size(&mut self, size: Size) {
        if let Some(container) = self.widget.as_container_mut() {
            container.set_size(size);
        }
    }

    /// Own dirty flag. Containers derive dirtiness from their children; see
    /// [`ComponentTree::is_dirty`](crate::ui::ComponentTree::is_dirty).
    pub fn is_marked_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn is_container(&self) -> bool {
        self.widget.is_container()
    }

    pub fn accepts_focus(&self) -> bool {
        self.widget.accepts_focus()
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub(crate) fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    pub(crate) fn kind(&self) -> NodeKind {
        self.widget.kind()
    }
}
