//! Display collaborator interface.
//!
//! Hosts implement [`CharDisplay`] over their LCD driver. Coordinates are
//! zero-based character cells; the screen never asks for negative positions.

use core::fmt::Debug;

/// Custom glyph bitmap: eight rows of 5-bit patterns, top row first.
pub type GlyphBitmap = [u8; 8];

/// Checkmark drawn by [`Checkbox`](crate::ui::Checkbox) when checked.
pub const CHECKMARK: GlyphBitmap = [
    0b00000, //
    0b00000, //
    0b00001, //
    0b00010, //
    0b10100, //
    0b01000, //
    0b00000, //
    0b00000, //
];

/// Character-cell output device
pub trait CharDisplay {
    type Error: Debug;

    /// Blank the whole display.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Define custom glyph `slot` (0..=7).
    fn create_glyph(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), Self::Error>;

    /// Write text starting at a cell. Text running past the edge is the
    /// driver's to clip.
    fn draw_text(&mut self, x: u8, y: u8, text: &str) -> Result<(), Self::Error>;

    /// Write a previously created custom glyph at a cell.
    fn draw_glyph(&mut self, x: u8, y: u8, slot: u8) -> Result<(), Self::Error>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), Self::Error>;

    fn set_cursor_blink(&mut self, blink: bool) -> Result<(), Self::Error>;

    fn move_cursor(&mut self, x: u8, y: u8) -> Result<(), Self::Error>;
}
