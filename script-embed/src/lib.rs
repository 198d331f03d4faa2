//! Script embedding for server-rendered markup
//!
//! Embeds generated client-side script into templated markup, either as
//! a `<script>` child or as an attribute value, and converts pure markup
//! into a script expression that rebuilds it in the browser.
//!
//! Every embedded block draws one integer from an [`IdentitySupply`]; the
//! integer labels the block's hygienic names so separate blocks on one
//! page never collide. [`RenderContext`] scopes one counter to one
//! top-level render.

pub mod context;
pub mod embedder;

pub use context::{render_document, RenderContext};
pub use embedder::{PureMarkup, ScriptEmbedder};

pub use script_embed_core::{
    AttrName, Attribute, BinOp, CoreError, EmbedConfig, Element, Expr, Ident, Literal,
    NamedScript, Node, ScriptUnit, Stmt, TagName, UnaryOp,
};
pub use script_embed_identity::{next_integer_from_state, Counter, IdentitySupply, IntegerState};
pub use script_embed_render::{render_html, RenderError, RenderMode, ScriptRenderer};
