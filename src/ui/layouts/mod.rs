// src/ui/layouts/mod.rs
//! Containers that own and position other components

pub mod container;
pub mod scrollable;

pub use container::Container;
pub use scrollable::ScrollContainer;
