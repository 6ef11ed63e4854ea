// src/ui/layouts/scrollable.rs
//! Scrollable container for content that exceeds visible bounds

use embedded_graphics::prelude::Point;
use log::debug;

use crate::display::CharDisplay;
use crate::ui::core::{ComponentId, Widget};
use crate::ui::layouts::container::Container;
use crate::ui::painter::{Painter, Rows};
use crate::ui::tree::ComponentTree;

/// Fixed-height viewport over a vertical run of children.
///
/// Children are added at rows relative to the top of the content, which may
/// be taller than the viewport. Whenever the screen's focus moves to a
/// descendant outside the viewport, the container shifts all of its content
/// by exactly enough rows to bring that descendant onto the nearer edge.
#[derive(Debug, Clone)]
pub struct ScrollContainer {
    container: Container,
    last_focus_holder: Option<ComponentId>,
    scroll_offset: i32,
}

impl ScrollContainer {
    /// Viewport of `width` x `height` cells.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            container: Container::with_size(width, height),
            last_focus_holder: None,
            scroll_offset: 0,
        }
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub(crate) fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Rows the content has moved since placement. Negative once scrolled
    /// down.
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    /// Focus holder the last scroll was made for.
    pub fn last_focus_holder(&self) -> Option<ComponentId> {
        self.last_focus_holder
    }

    /// Visible rows for a viewport whose top edge is at `top`.
    pub fn viewport(&self, top: i32) -> Rows {
        Rows::new(top, self.container.size().height)
    }
}

impl ComponentTree {
    /// Scroll applied to the children of `id`; zero unless it is a scroll
    /// container.
    pub(crate) fn scroll_offset(&self, id: ComponentId) -> i32 {
        match self.get(id).map(|node| node.widget()) {
            Some(Widget::Scroll(scroll)) => scroll.scroll_offset(),
            _ => 0,
        }
    }

    /// Whether focus has moved to a descendant of scroll container `id` that
    /// sits outside its viewport.
    pub fn scroll_needed(&self, id: ComponentId, focus: Option<ComponentId>) -> bool {
        let Some(focus) = focus else {
            return false;
        };
        let Some(node) = self.get(id) else {
            return false;
        };
        let Widget::Scroll(scroll) = node.widget() else {
            return false;
        };
        if scroll.last_focus_holder == Some(focus) || !self.contains(id, focus) {
            return false;
        }
        self.get(focus)
            .is_some_and(|target| !scroll.viewport(node.y()).contains(target.y()))
    }

    pub(crate) fn paint_scroll<D: CharDisplay>(
        &mut self,
        id: ComponentId,
        painter: &mut Painter<'_, D>,
    ) -> Result<(), D::Error> {
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        let Widget::Scroll(scroll) = node.widget() else {
            return Ok(());
        };
        let viewport = scroll.viewport(node.y());

        if let Some(focus) = painter.focus()
            && self.scroll_needed(id, Some(focus))
        {
            self.scroll_to(id, focus, painter)?;
        }

        let outer = painter.set_clip(painter.clip().intersect(viewport));
        let result = self.paint_children(id, painter);
        painter.set_clip(outer);
        result
    }

    /// Blank the viewport and shift content so `focus` lands on the edge it
    /// crossed.
    fn scroll_to<D: CharDisplay>(
        &mut self,
        id: ComponentId,
        focus: ComponentId,
        painter: &mut Painter<'_, D>,
    ) -> Result<(), D::Error> {
        let (Some(node), Some(target)) = (self.get(id), self.get(focus)) else {
            return Ok(());
        };
        let origin = node.origin();
        let size = node.size();
        let viewport = Rows::new(origin.y, size.height);
        let target_row = target.y();

        for row in 0..size.height as i32 {
            painter.blank(Point::new(origin.x, origin.y + row), size.width)?;
        }

        let shift = if target_row > viewport.last() {
            viewport.last() - target_row
        } else {
            viewport.top - target_row
        };

        let mut i = 0;
        while let Some(child) = self.child_at(id, i) {
            self.translate(child, shift);
            i += 1;
        }

        if let Some(Widget::Scroll(scroll)) = self.get_mut(id).map(|node| node.widget_mut()) {
            scroll.last_focus_holder = Some(focus);
            scroll.scroll_offset += shift;
        }
        debug!("Scrolled {:?} by {} rows to show {:?}", id, shift, focus);

        self.repaint(id);
        Ok(())
    }
}
