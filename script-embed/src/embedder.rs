//! Script embedding
//!
//! Converts script units into `<script>` children or attribute values of
//! templated markup, and converts pure markup into a script expression
//! that rebuilds it as a DOM node.

use script_embed_core::{
    AttrName, Attribute, CoreError, EmbedConfig, Element, Expr, Ident, NamedScript, Node,
    ScriptUnit, Stmt, TagName,
};
use script_embed_identity::IdentitySupply;
use script_embed_render::{render_html, ScriptRenderer};

/// Markup that can be evaluated without a rendering context.
///
/// Markup holding embedded script blocks is only produced through an
/// identity supply, so it never reaches [`ScriptEmbedder::markup_to_expression`]
/// as a computation; only its finished tree can.
pub trait PureMarkup {
    fn evaluate(self) -> Node;
}

impl PureMarkup for Node {
    fn evaluate(self) -> Node {
        self
    }
}

impl PureMarkup for &Node {
    fn evaluate(self) -> Node {
        self.clone()
    }
}

impl PureMarkup for Element {
    fn evaluate(self) -> Node {
        Node::Element(self)
    }
}

impl PureMarkup for Vec<Node> {
    fn evaluate(self) -> Node {
        Node::Fragment(self)
    }
}

/// Embeds script units into markup
#[derive(Debug, Clone)]
pub struct ScriptEmbedder {
    renderer: ScriptRenderer,
    script_tag: TagName,
    type_attr: AttrName,
    script_type: String,
    container_tag: String,
}

impl ScriptEmbedder {
    pub fn new(config: &EmbedConfig) -> Result<Self, CoreError> {
        config.validate()?;

        Ok(Self {
            renderer: ScriptRenderer::with_fresh_prefix(config.fresh_prefix.clone()),
            script_tag: TagName::new("script")?,
            type_attr: AttrName::new("type")?,
            script_type: config.script_type.clone(),
            container_tag: config.container_tag.clone(),
        })
    }

    pub fn renderer(&self) -> &ScriptRenderer {
        &self.renderer
    }

    /// Draw a fresh label and render `script` on one line with it
    fn render_labelled<S>(&self, supply: &mut S, script: &ScriptUnit) -> (u64, String)
    where
        S: IdentitySupply + ?Sized,
    {
        let label = supply.next_integer();
        let text = self.renderer.render_one_line(script, &label.to_string());
        (label, text)
    }

    /// Wrap `script` in a `<script type="...">` element
    pub fn embed_child<S>(&self, supply: &mut S, script: &ScriptUnit) -> Node
    where
        S: IdentitySupply + ?Sized,
    {
        let (label, text) = self.render_labelled(supply, script);
        tracing::debug!(label, bytes = text.len(), "embedded script block as child");

        Element::new(self.script_tag.clone())
            .with_attribute(Attribute::new(self.type_attr.clone(), self.script_type.as_str()))
            .with_child(Node::Text(text))
            .into()
    }

    /// Render `named.script` inline as the value of attribute `named.name`
    pub fn embed_attribute<S>(&self, supply: &mut S, named: &NamedScript) -> Attribute
    where
        S: IdentitySupply + ?Sized,
    {
        let (label, text) = self.render_labelled(supply, &named.script);
        tracing::debug!(
            label,
            attribute = named.name.as_str(),
            "embedded script block as attribute"
        );

        Attribute::new(named.name.clone(), text)
    }

    /// Expression that parses the rendered markup into a detached
    /// container and returns its first child node
    pub fn markup_to_expression(&self, markup: impl PureMarkup) -> Expr {
        let html = render_html(&markup.evaluate());
        tracing::debug!(bytes = html.len(), "converted markup to script expression");

        let node = Ident::named("node");
        Expr::iife(vec![
            Stmt::var(
                node.clone(),
                Some(
                    Expr::var("document")
                        .member("createElement")
                        .call(vec![Expr::str(self.container_tag.as_str())]),
                ),
            ),
            Stmt::expr(Expr::Var(node.clone()).member("innerHTML").assign(Expr::str(html))),
            Stmt::ret(Expr::Var(node).member("childNodes").index(Expr::int(0))),
        ])
    }
}
