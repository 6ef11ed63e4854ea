// src/ui/layouts/container.rs
//! Container layout component holding an ordered list of children

use alloc::vec::Vec;
use embedded_graphics::prelude::{Point, Size};
use log::debug;

use crate::display::CharDisplay;
use crate::error::{UiError, UiResult};
use crate::ui::core::{ComponentId, NodeKind, Widget};
use crate::ui::painter::Painter;
use crate::ui::tree::ComponentTree;

/// Ordered, append-only set of child components.
///
/// Children are added with positions relative to the container. The
/// container converts them to screen positions on its first update, once its
/// own parent has placed it; children added after that are placed
/// immediately.
#[derive(Debug, Clone, Default)]
pub struct Container {
    children: Vec<ComponentId>,
    size: Size,
    placed: bool,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Whether children have been converted to screen positions.
    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Make room for one more child, growing storage to `2n + 1` when full.
    fn reserve_slot(&mut self) -> UiResult<()> {
        let capacity = self.children.capacity();
        if self.children.len() < capacity {
            return Ok(());
        }
        self.children
            .try_reserve_exact(capacity + 1)
            .map_err(|_| UiError::StorageExhausted)
    }

    fn push(&mut self, child: ComponentId) {
        self.children.push(child);
    }
}

impl ComponentTree {
    /// Create a component inside container `parent` at `(x, y)` relative to
    /// the container, and mark it for painting.
    pub fn add(
        &mut self,
        parent: ComponentId,
        widget: impl Into<Widget>,
        x: i32,
        y: i32,
    ) -> UiResult<ComponentId> {
        let parent_node = self.get(parent).ok_or(UiError::UnknownComponent)?;
        let container = parent_node
            .widget()
            .as_container()
            .ok_or(UiError::NotAContainer)?;
        let offset = if container.is_placed() {
            parent_node.y() + self.scroll_offset(parent)
        } else {
            0
        };

        self.get_mut(parent)
            .and_then(|node| node.widget_mut().as_container_mut())
            .ok_or(UiError::NotAContainer)?
            .reserve_slot()?;

        let child = self.insert(widget.into());
        if let Some(container) = self
            .get_mut(parent)
            .and_then(|node| node.widget_mut().as_container_mut())
        {
            container.push(child);
        }
        self.set_location(child, x, y + offset);
        self.repaint(child);
        Ok(child)
    }

    /// Shift direct children down by the container's own row, once.
    pub(crate) fn place_children(&mut self, id: ComponentId) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let dy = node.y();
        let Some(container) = node.widget_mut().as_container_mut() else {
            return;
        };
        if container.placed {
            return;
        }
        container.placed = true;

        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            if let Some(child) = self.get_mut(child) {
                child.set_location(child.origin() + Point::new(0, dy));
            }
            i += 1;
        }
    }

    /// Next focus-eligible leaf after `current` in depth-first order
    /// (reverse order if `reverse`).
    ///
    /// With no `current` this is the first (or last) eligible leaf. The search
    /// does not wrap: past the end, or when `current` is not below `root`, it
    /// returns `None`.
    pub fn next_focus_holder(
        &self,
        root: ComponentId,
        current: Option<ComponentId>,
        reverse: bool,
    ) -> Option<ComponentId> {
        let mut found = false;
        self.search_focus(root, current, reverse, &mut found)
    }

    fn search_focus(
        &self,
        id: ComponentId,
        current: Option<ComponentId>,
        reverse: bool,
        found: &mut bool,
    ) -> Option<ComponentId> {
        let children = self.children(id);
        let count = children.len();

        for step in 0..count {
            let child = children[if reverse { count - 1 - step } else { step }];
            let Some(node) = self.get(child) else {
                continue;
            };

            if node.is_container() {
                if let Some(next) = self.search_focus(child, current, reverse, found) {
                    return Some(next);
                }
            } else if node.accepts_focus() {
                match current {
                    None => return Some(child),
                    Some(_) if *found => return Some(child),
                    Some(current) if current == child => *found = true,
                    Some(_) => {}
                }
            }
        }
        None
    }

    /// Paint the dirty children of a container. Leaves outside the visible
    /// rows are marked clean without drawing.
    pub(crate) fn paint_children<D: CharDisplay>(
        &mut self,
        id: ComponentId,
        painter: &mut Painter<'_, D>,
    ) -> Result<(), D::Error> {
        let focus = painter.focus();
        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            i += 1;
            if !self.is_dirty(child, focus) {
                continue;
            }
            let Some(node) = self.get(child) else {
                continue;
            };
            if node.kind() == NodeKind::Leaf && !painter.is_visible(node.y()) {
                debug!("Skipping {:?} outside visible rows at row {}", child, node.y());
                self.clear_dirty(child);
                continue;
            }
            self.paint(child, painter)?;
        }
        Ok(())
    }
}
