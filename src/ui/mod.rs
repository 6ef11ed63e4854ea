// src/ui/mod.rs
//! Screen UI - a retained-mode component tree for character displays
//!
//! This module provides:
//! - The component arena and the capability trait leaves implement
//! - Containers, including a vertically scrolling viewport
//! - Leaf widgets (labels, buttons, checkboxes, lists, text inputs)
//! - A clipped painter over any [`CharDisplay`](crate::display::CharDisplay)
//! - Dirty tracking so only changed cells are redrawn

pub mod components;
pub mod core;
pub mod layouts;
pub mod painter;
pub mod tree;

// Re-export commonly used items
pub use self::core::{Component, ComponentId, InputResponse, Node, Widget, WidgetKind};
pub use components::{Button, Checkbox, Frame, Input, Label, List, TEXT_CAPACITY, Text};
pub use layouts::{Container, ScrollContainer};
pub use painter::{Painter, Rows};
pub use tree::ComponentTree;
