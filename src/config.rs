//! Screen configuration.
//!
//! The configuration is plain data so a host can keep it in flash and load it
//! at boot with [`ScreenConfig::from_bytes`].

use serde::{Deserialize, Serialize};

use crate::error::{UiError, UiResult};

/// Glyph slot used for the checkbox checkmark unless configured otherwise.
pub const DEFAULT_CHECKMARK_SLOT: u8 = 7;

/// Number of custom glyph slots on HD44780-style controllers.
pub const GLYPH_SLOTS: u8 = 8;

/// Which input delta moves focus between components while nothing is captured
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationAxis {
    /// Vertical delta (rotary encoders report here)
    #[default]
    Vertical,
    /// Horizontal delta (left/right button pads)
    Horizontal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    /// Display width in character cells
    pub width: u8,
    /// Display height in character rows
    pub height: u8,
    /// Custom glyph slot the checkmark is registered in
    pub checkmark_slot: u8,
    pub navigation_axis: NavigationAxis,
    /// Wrap focus from the last eligible component back to the first
    pub wrap_focus: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 2,
            checkmark_slot: DEFAULT_CHECKMARK_SLOT,
            navigation_axis: NavigationAxis::Vertical,
            wrap_focus: true,
        }
    }
}

impl ScreenConfig {
    /// Config for a display of the given size with default behaviour.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_checkmark_slot(mut self, slot: u8) -> Self {
        self.checkmark_slot = slot;
        self
    }

    pub fn with_navigation_axis(mut self, axis: NavigationAxis) -> Self {
        self.navigation_axis = axis;
        self
    }

    pub fn with_wrap_focus(mut self, wrap: bool) -> Self {
        self.wrap_focus = wrap;
        self
    }

    /// Checkmark slot masked into the valid glyph range.
    pub fn glyph_slot(&self) -> u8 {
        self.checkmark_slot % GLYPH_SLOTS
    }

    /// Serialize into `buf`, returning the used prefix.
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> UiResult<&'a mut [u8]> {
        postcard::to_slice(self, buf).map_err(|_| UiError::InvalidConfig)
    }

    /// Deserialize a config previously written by [`ScreenConfig::to_slice`].
    pub fn from_bytes(bytes: &[u8]) -> UiResult<Self> {
        postcard::from_bytes(bytes).map_err(|_| UiError::InvalidConfig)
    }
}
