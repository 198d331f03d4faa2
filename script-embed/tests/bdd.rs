//! BDD Test Harness for script embedding
//!
//! Run with: cargo test --test bdd -p script-embed

use cucumber::{given, then, when, World};
use script_embed::{
    render_document, render_html, Attribute, EmbedConfig, Element, Expr, Ident, NamedScript,
    Node, RenderContext, RenderMode, ScriptUnit, Stmt,
};

/// World state shared across steps
#[derive(Debug, Default, World)]
pub struct EmbedWorld {
    /// Context for the scenario's render
    context: Option<RenderContext>,

    /// Last embedded child
    last_child: Option<Node>,

    /// Last embedded attribute
    last_attribute: Option<Attribute>,

    /// Last converted markup, rendered on one line
    last_expression: Option<String>,

    /// Whole documents rendered by the scenario
    pages: Vec<String>,
}

impl EmbedWorld {
    fn context(&mut self) -> &mut RenderContext {
        self.context.as_mut().expect("No render context; add a Given step")
    }
}

fn fresh_local_page(ctx: &mut RenderContext) -> Node {
    let declare: ScriptUnit = Stmt::var(Ident::fresh(0), None).into();
    Element::named("body")
        .unwrap()
        .with_child(ctx.child(&declare))
        .with_child(ctx.child(&declare))
        .into()
}

// ==================== GIVEN Steps ====================

#[given(expr = "a render context whose counter starts at {int}")]
fn context_starting_at(world: &mut EmbedWorld, start: u64) {
    let config = EmbedConfig {
        counter_start: start,
        ..EmbedConfig::default()
    };
    world.context = Some(RenderContext::new(&config).expect("Failed to create context"));
}

// ==================== WHEN Steps ====================

#[when(expr = "I embed the assignment {word} = {int} as a child")]
fn embed_assignment(world: &mut EmbedWorld, name: String, value: i64) {
    let unit: ScriptUnit = Stmt::expr(Expr::var(name).assign(Expr::int(value))).into();
    let child = world.context().child(&unit);
    world.last_child = Some(child);
}

#[when("I embed a declaration of a fresh local as a child")]
fn embed_fresh_declaration(world: &mut EmbedWorld) {
    let unit: ScriptUnit = Stmt::var(Ident::fresh(0), None).into();
    let child = world.context().child(&unit);
    world.last_child = Some(child);
}

#[when(expr = "I embed a call to {word} with argument {word} as attribute {word}")]
fn embed_call_attribute(world: &mut EmbedWorld, function: String, argument: String, attribute: String) {
    let call = Stmt::expr(Expr::var(function).call(vec![Expr::str(argument)]));
    let named = NamedScript::new(&attribute, call).expect("Invalid attribute name");
    let attribute = world.context().attribute(&named);
    world.last_attribute = Some(attribute);
}

#[when(expr = "I convert a paragraph saying {word} to a script expression")]
fn convert_paragraph(world: &mut EmbedWorld, text: String) {
    let paragraph = Element::named("p").unwrap().with_child(text);
    let context = world.context();
    let expr = context.expression(paragraph);
    let rendered = context
        .embedder()
        .renderer()
        .render_expr(&expr, RenderMode::SingleLine);
    world.last_expression = Some(rendered);
}

#[when("I render a page with two fresh-local blocks twice")]
fn render_two_pages(world: &mut EmbedWorld) {
    let config = EmbedConfig::default();
    for _ in 0..2 {
        let page = render_document(&config, fresh_local_page).expect("Render failed");
        world.pages.push(page);
    }
}

// ==================== THEN Steps ====================

#[then(regex = r"^the rendered child is `(.*)`$")]
fn rendered_child_is(world: &mut EmbedWorld, expected: String) {
    let child = world.last_child.as_ref().expect("No child embedded");
    assert_eq!(render_html(child), expected);
}

#[then(regex = r"^the attribute (\S+) has value `(.*)`$")]
fn attribute_has_value(world: &mut EmbedWorld, name: String, expected: String) {
    let attribute = world.last_attribute.as_ref().expect("No attribute embedded");
    assert_eq!(attribute.name.as_str(), name);
    assert_eq!(attribute.value, expected);
}

#[then(regex = r"^the expression is `(.*)`$")]
fn expression_is(world: &mut EmbedWorld, expected: String) {
    let expression = world.last_expression.as_ref().expect("No expression converted");
    assert_eq!(expression, &expected);
}

#[then(expr = "the counter is at {int}")]
fn counter_is_at(world: &mut EmbedWorld, expected: u64) {
    assert_eq!(world.context().counter().current(), expected);
}

#[then("both pages are identical")]
fn pages_identical(world: &mut EmbedWorld) {
    assert_eq!(world.pages.len(), 2, "Expected two rendered pages");
    assert_eq!(world.pages[0], world.pages[1]);
}

#[then("each page labels its blocks 0 and 1")]
fn pages_label_from_zero(world: &mut EmbedWorld) {
    for page in &world.pages {
        assert!(page.contains("var jsid_0_0;"), "{}", page);
        assert!(page.contains("var jsid_1_0;"), "{}", page);
    }
}

// ==================== Main ====================

fn main() {
    futures::executor::block_on(EmbedWorld::cucumber().run_and_exit("tests/features"));
}
