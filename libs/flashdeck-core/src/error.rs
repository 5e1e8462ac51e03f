//! Error types for flashdeck-core.
//!
//! Parsing is total and never fails; only layout can refuse its input.

use thiserror::Error;

/// Result type alias using LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised while resolving print options into a `PrintConfig`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("duplex mode is required")]
    MissingDuplexMode,

    #[error("unknown duplex mode: {0}")]
    UnknownDuplexMode(String),

    #[error("back offset {axis} must be a finite number of millimetres, got {value}")]
    NonFiniteOffset { axis: char, value: f64 },
}

/// Errors that stop a deck from being laid out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("nothing to render: the deck is empty")]
    EmptyDeck,

    #[error("invalid print configuration: {0}")]
    Config(#[from] ConfigError),
}
