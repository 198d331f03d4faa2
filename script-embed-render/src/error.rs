//! Renderer error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Reserved word used as identifier: {0}")]
    ReservedWord(String),

    #[error("Return statement outside of a function body")]
    ReturnOutsideFunction,
}
