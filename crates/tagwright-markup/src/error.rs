//! Error types for markup generation.

use thiserror::Error;

use crate::Construct;

/// Errors that can occur while emitting markup.
#[derive(Debug, Error)]
pub enum Error {
    /// Text content and a nested block were given for the same element.
    #[error("element <{name}> cannot mix a text argument with a nested block")]
    InvalidArgumentCombination { name: String },

    /// A nested block was given to a construct that cannot have children.
    #[error("blocks are not allowed on {construct}s")]
    IllegalBlockUsage { construct: Construct },

    /// A declaration keyword or instruction target that is not recognized.
    #[error("unknown {kind} '{name}'")]
    UnknownConstruct { kind: Construct, name: String },

    /// The event target has no way to represent this construct.
    #[error("event target cannot represent {construct} output")]
    UnsupportedConstruct { construct: Construct },

    /// I/O error from a byte sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An event target rejected an event.
    #[error("event target error: {0}")]
    Target(String),

    /// XML writer error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for markup operations.
pub type Result<T> = std::result::Result<T, Error>;
