//! Retained-mode UI toolkit for small character LCDs.
//!
//! Components live in a [`ComponentTree`](ui::ComponentTree) owned by a
//! [`Screen`]. Each call to [`Screen::update`] polls one [`InputEvent`],
//! moves focus or routes the event to the focused widget, then repaints
//! only the components whose content changed.
//!
//! ```ignore
//! let mut screen = Screen::new(lcd, encoder, ScreenConfig::new(16, 2))?;
//! screen.add(Label::new("Temp")?, 0, 0)?;
//! let ok = screen.add(Button::new("OK")?, 10, 1)?;
//! loop {
//!     screen.update()?;
//!     if screen.widget::<Button>(ok).is_some_and(Button::pressed) {
//!         break;
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod buffer;
pub mod charset;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod screen;
pub mod ui;

pub use buffer::CharBuffer;
pub use charset::{CharRange, CharacterSet};
pub use config::{NavigationAxis, ScreenConfig};
pub use display::{CHECKMARK, CharDisplay, GlyphBitmap};
pub use error::{UiError, UiResult};
pub use input::{InputEvent, InputSource, ScriptedInput};
pub use screen::{FocusState, Screen};
pub use ui::{
    Button, Checkbox, Component, ComponentId, Container, Input, Label, List, ScrollContainer,
    Widget,
};
