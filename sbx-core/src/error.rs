//! Error types for values parsed from the DOM, the CLI or config documents.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("unknown symbol shape: {0}")]
    UnknownShape(String),

    #[error("invalid map config: {0}")]
    InvalidConfig(String),
}
