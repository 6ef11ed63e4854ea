// src/ui/components/mod.rs
//! Leaf widgets

pub mod button;
pub mod checkbox;
pub mod input;
pub mod label;
pub mod list;

pub use button::Button;
pub use checkbox::Checkbox;
pub use input::Input;
pub use label::{Frame, Label, TEXT_CAPACITY, Text};
pub use list::List;
