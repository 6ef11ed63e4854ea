//! Error types for UI construction and configuration.
//!
//! The frame loop itself never fails on bad widget state: indices clamp and
//! missing focus degrades to "nothing focused". The errors here cover the
//! conditions a host can act on while building a screen.

use thiserror_no_std::Error;

/// Errors surfaced while building or configuring a UI
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UiError {
    /// Text does not fit in the fixed-capacity text storage
    #[error("Text too long: {len} characters (max: {max})")]
    TextTooLong {
        /// Length of the rejected text
        len: usize,
        /// Capacity of the text storage
        max: usize,
    },

    /// Character LCDs only render single-byte character codes
    #[error("Text contains non-ASCII characters")]
    NonAsciiText,

    /// List item capacity exceeded
    #[error("List capacity exceeded (max: {max})")]
    ListFull {
        /// Maximum number of items the list was created with
        max: usize,
    },

    /// Components can only be added to containers
    #[error("Component is not a container")]
    NotAContainer,

    /// Handle does not refer to a live component
    #[error("Unknown component")]
    UnknownComponent,

    /// Component cannot hold focus on this screen
    #[error("Component does not accept focus")]
    FocusRejected,

    /// Child storage could not grow
    #[error("Child storage exhausted")]
    StorageExhausted,

    /// Character set range is reversed, non-ASCII or overlaps an earlier one
    #[error("Invalid character range at index {index}")]
    InvalidCharRange {
        /// Position of the offending range
        index: usize,
    },

    /// Serialized screen configuration could not be encoded or decoded
    #[error("Invalid screen configuration")]
    InvalidConfig,
}

/// Result type for UI operations
pub type UiResult<T> = Result<T, UiError>;
