//! Error types for the core crate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid attribute name: {0:?}")]
    InvalidAttributeName(String),

    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
