//! Per-render context
//!
//! A context owns the identifier counter for exactly one top-level
//! render. Labels restart for every document, so output stays stable
//! and the counter never grows across requests.

use script_embed_core::{Attribute, CoreError, EmbedConfig, Expr, NamedScript, Node, ScriptUnit};
use script_embed_identity::{Counter, IdentitySupply};
use script_embed_render::render_html;

use crate::embedder::{PureMarkup, ScriptEmbedder};

#[derive(Debug)]
pub struct RenderContext {
    embedder: ScriptEmbedder,
    counter: Counter,
}

impl RenderContext {
    pub fn new(config: &EmbedConfig) -> Result<Self, CoreError> {
        Ok(Self {
            embedder: ScriptEmbedder::new(config)?,
            counter: Counter::starting_at(config.counter_start),
        })
    }

    /// `<script>` child for `script`, labelled from this context
    pub fn child(&mut self, script: &ScriptUnit) -> Node {
        self.embedder.embed_child(&mut self.counter, script)
    }

    /// Attribute holding `named.script`, labelled from this context
    pub fn attribute(&mut self, named: &NamedScript) -> Attribute {
        self.embedder.embed_attribute(&mut self.counter, named)
    }

    pub fn expression(&self, markup: impl PureMarkup) -> Expr {
        self.embedder.markup_to_expression(markup)
    }

    /// Draw a label for callers building their own labelled output
    pub fn next_label(&mut self) -> u64 {
        self.counter.next_integer()
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn embedder(&self) -> &ScriptEmbedder {
        &self.embedder
    }
}

/// Run one top-level render with a fresh context and return the HTML
pub fn render_document<F>(config: &EmbedConfig, build: F) -> Result<String, CoreError>
where
    F: FnOnce(&mut RenderContext) -> Node,
{
    let mut context = RenderContext::new(config)?;
    let start = context.counter.current();
    tracing::debug!(start, "starting render context");

    let root = build(&mut context);
    let html = render_html(&root);

    tracing::debug!(
        labels_used = context.counter.current().saturating_sub(start),
        bytes = html.len(),
        "finished render context"
    );
    Ok(html)
}
