//! Renderers for generated script and templated markup
//!
//! This crate turns script units into JavaScript text and markup trees
//! into HTML strings. The embedding layer calls into both.

pub mod error;
pub mod html;
pub mod script;

pub use error::RenderError;
pub use html::{escape_attribute, escape_text, render_html};
pub use script::{is_identifier_name, quote_str, RenderMode, ScriptRenderer};
