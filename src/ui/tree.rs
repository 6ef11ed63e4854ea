// src/ui/tree.rs
//! Component arena.
//!
//! Every component lives in one [`SlotMap`] owned by [`ComponentTree`];
//! containers refer to their children by [`ComponentId`]. The walks that
//! apply to every node (update, paint, dirtiness, input routing) live here.
//! Container-specific behaviour is in [`layouts`](crate::ui::layouts).

use embedded_graphics::prelude::{Point, Size};
use slotmap::SlotMap;

use crate::display::CharDisplay;
use crate::error::{UiError, UiResult};
use crate::input::InputEvent;
use crate::ui::core::{Component, ComponentId, Node, NodeKind, Widget, WidgetKind, with_leaf};
use crate::ui::painter::Painter;

const NO_CHILDREN: &[ComponentId] = &[];

#[derive(Default)]
pub struct ComponentTree {
    nodes: SlotMap<ComponentId, Node>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node with no parent. Only the screen's root stays detached;
    /// everything else is attached by [`ComponentTree::add`].
    pub(crate) fn insert(&mut self, widget: Widget) -> ComponentId {
        self.nodes.insert(Node::new(widget))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` still refers to a component of this tree.
    pub fn is_live(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: ComponentId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Typed view of a component's widget.
    pub fn widget<W: WidgetKind>(&self, id: ComponentId) -> Option<&W> {
        self.nodes
            .get(id)
            .and_then(|node| W::from_widget(node.widget()))
    }

    pub(crate) fn widget_mut<W: WidgetKind>(&mut self, id: ComponentId) -> Option<&mut W> {
        self.nodes
            .get_mut(id)
            .and_then(|node| W::from_widget_mut(node.widget_mut()))
    }

    /// Children of a container in insertion order. Empty for leaves.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes
            .get(id)
            .and_then(|node| node.widget().as_container())
            .map_or(NO_CHILDREN, |container| container.children())
    }

    pub(crate) fn child_at(&self, id: ComponentId, index: usize) -> Option<ComponentId> {
        self.children(id).get(index).copied()
    }

    pub fn set_location(&mut self, id: ComponentId, x: i32, y: i32) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.set_location(Point::new(x, y));
        }
    }

    /// Resize a container. Leaves size themselves from their content, so
    /// resizing one is rejected with [`UiError::NotAContainer`].
    pub fn set_size(&mut self, id: ComponentId, width: u32, height: u32) -> UiResult<()> {
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownComponent)?;
        if !node.is_container() {
            return Err(UiError::NotAContainer);
        }
        node.set_size(Size::new(width, height));
        Ok(())
    }

    /// Move a component and everything below it vertically.
    pub(crate) fn translate(&mut self, id: ComponentId, dy: i32) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.set_location(node.origin() + Point::new(0, dy));

        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            self.translate(child, dy);
            i += 1;
        }
    }

    /// Pre-frame housekeeping for `id` and everything below it.
    pub fn update(&mut self, id: ComponentId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.kind() == NodeKind::Leaf {
            with_leaf!(node.widget_mut(), |leaf| leaf.update(), else ());
            return;
        }

        self.place_children(id);
        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            self.update(child);
            i += 1;
        }
    }

    /// Route an input event to a leaf. Returns whether it keeps input
    /// captured; containers never do.
    pub fn handle_input_event(&mut self, id: ComponentId, event: &InputEvent) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        let response = with_leaf!(
            node.widget_mut(),
            |leaf| leaf.handle_input_event(event),
            else return false
        );
        if response.repaint {
            node.mark_dirty();
        }
        response.captured
    }

    /// Tell a leaf that focus was moved away from it while it held capture.
    pub(crate) fn release_capture(&mut self, id: ComponentId) {
        if let Some(node) = self.nodes.get_mut(id) {
            with_leaf!(node.widget_mut(), |leaf| leaf.release_capture(), else ());
            node.mark_dirty();
        }
    }

    /// Whether `id` needs painting: its own flag for leaves, any dirty
    /// descendant for containers, plus a pending scroll for scroll
    /// containers.
    pub fn is_dirty(&self, id: ComponentId, focus: Option<ComponentId>) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        match node.kind() {
            NodeKind::Leaf => node.is_marked_dirty(),
            NodeKind::Container => self.any_child_dirty(id, focus),
            NodeKind::Scroll => {
                self.any_child_dirty(id, focus) || self.scroll_needed(id, focus)
            }
        }
    }

    fn any_child_dirty(&self, id: ComponentId, focus: Option<ComponentId>) -> bool {
        self.children(id)
            .iter()
            .any(|&child| self.is_dirty(child, focus))
    }

    /// Mark `id` for painting. Containers pass this on to their children.
    pub fn repaint(&mut self, id: ComponentId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if !node.is_container() {
            node.mark_dirty();
            return;
        }

        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            self.repaint(child);
            i += 1;
        }
    }

    /// Drop pending paint work for `id` and everything below it.
    pub fn clear_dirty(&mut self, id: ComponentId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.mark_clean();

        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            self.clear_dirty(child);
            i += 1;
        }
    }

    /// Whether `target` is somewhere below `ancestor`.
    pub fn contains(&self, ancestor: ComponentId, target: ComponentId) -> bool {
        self.children(ancestor)
            .iter()
            .any(|&child| child == target || self.contains(child, target))
    }

    /// Paint `id`. Callers check [`ComponentTree::is_dirty`] first; this
    /// always draws.
    pub fn paint<D: CharDisplay>(
        &mut self,
        id: ComponentId,
        painter: &mut Painter<'_, D>,
    ) -> Result<(), D::Error> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Ok(());
        };
        node.mark_clean();

        match node.kind() {
            NodeKind::Container => self.paint_children(id, painter),
            NodeKind::Scroll => self.paint_scroll(id, painter),
            NodeKind::Leaf => {
                let origin = node.origin();
                let focused = painter.focus() == Some(id);
                with_leaf!(
                    node.widget_mut(),
                    |leaf| leaf.paint(painter, origin, focused),
                    else Ok(())
                )
            }
        }
    }
}
