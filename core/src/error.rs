//! Engine Errors
//!
//! Every failure the engine can report is a setup-time problem: a text
//! whose anchor is malformed, an id that does not belong to this scene, a
//! color that does not parse, or a configuration that does not validate.
//! Once a [`Scene`](crate::Scene) is built, ticking and reordering cannot fail.

use thiserror::Error;

use crate::config::ConfigError;
use crate::console::ConsoleId;

/// Errors raised while building or mutating a scene
#[derive(Debug, Error)]
pub enum EngineError {
    /// A text item was given neither a left nor a right anchor
    #[error("Text anchor must set one of `left` or `right`, found neither")]
    MissingAnchor,

    /// A text item was given both a left and a right anchor
    #[error("Text anchor must set one of `left` or `right`, found both")]
    ConflictingAnchor,

    /// An id that does not belong to this console tree
    #[error("Unknown console {0:?}")]
    UnknownConsole(ConsoleId),

    /// A color string that is not `#rrggbb`
    #[error("Invalid color {0:?}: expected #rrggbb")]
    InvalidColor(String),

    /// Configuration could not be loaded or validated
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
