use script_embed::{
    next_integer_from_state, render_document, AttrName, Attribute, EmbedConfig, Element, Expr,
    Ident, IdentitySupply, IntegerState, NamedScript, Node, RenderContext, RenderMode,
    ScriptEmbedder, ScriptUnit, Stmt,
};

fn assign_x_one() -> ScriptUnit {
    Stmt::expr(Expr::var("x").assign(Expr::int(1))).into()
}

#[test]
fn test_two_blocks_in_one_context() {
    let mut context = RenderContext::new(&EmbedConfig::default()).unwrap();
    assert_eq!(context.counter().current(), 0);

    let first = context.child(&assign_x_one());
    assert_eq!(
        script_embed::render_html(&first),
        "<script type=\"text/javascript\">x=1;</script>"
    );
    assert_eq!(context.counter().current(), 1);

    let labelled: ScriptUnit = vec![
        Stmt::var(Ident::fresh(0), Some(Expr::int(1))),
        Stmt::expr(Expr::var("x").assign(Expr::fresh(0))),
    ]
    .into();
    let second = context.child(&labelled);
    assert_eq!(
        script_embed::render_html(&second),
        "<script type=\"text/javascript\">var jsid_1_0=1;x=jsid_1_0;</script>"
    );
    assert_eq!(context.counter().current(), 2);
}

#[test]
fn test_full_page_render() {
    let config = EmbedConfig::default();

    let html = render_document(&config, |ctx| {
        let banner = Element::named("p").unwrap().with_child("Saved & synced");
        let show_banner = Stmt::expr(
            Expr::var("document")
                .member("body")
                .member("appendChild")
                .call(vec![ctx.expression(banner)]),
        );
        let onclick = NamedScript::new("onclick", show_banner.clone()).unwrap();
        let on_load: ScriptUnit = show_banner.into();

        let button = Element::named("button")
            .unwrap()
            .with_attribute(ctx.attribute(&onclick))
            .with_child("Save");

        Element::named("body")
            .unwrap()
            .with_child(button)
            .with_child(ctx.child(&on_load))
            .into()
    })
    .unwrap();

    let call = "document.body.appendChild((function(){var node=document.createElement('div');\
                node.innerHTML='<p>Saved &amp; synced<\\/p>';return node.childNodes[0];})());";
    assert_eq!(
        html,
        format!(
            "<body><button onclick=\"{}\">Save</button><script type=\"text/javascript\">{}</script></body>",
            call.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;"),
            call
        )
    );
}

#[test]
fn test_attribute_embedding_with_explicit_supply() {
    let embedder = ScriptEmbedder::new(&EmbedConfig::default()).unwrap();
    let mut counter = script_embed::Counter::starting_at(7);
    let named = NamedScript::new(
        "onchange",
        Stmt::var(Ident::fresh(1), Some(Expr::var("this").member("value"))),
    )
    .unwrap();

    let attribute = embedder.embed_attribute(&mut counter, &named);

    assert_eq!(
        attribute,
        Attribute::new(AttrName::new("onchange").unwrap(), "var jsid_7_1=this.value;")
    );
    assert_eq!(counter.current(), 8);
}

/// Host-provided state cell, e.g. a field on a request object
struct RequestState {
    labels: u64,
}

impl IntegerState for RequestState {
    fn get_integer(&self) -> u64 {
        self.labels
    }

    fn put_integer(&mut self, value: u64) {
        self.labels = value;
    }
}

impl IdentitySupply for RequestState {
    fn next_integer(&mut self) -> u64 {
        next_integer_from_state(self)
    }
}

#[test]
fn test_host_state_backs_the_supply() {
    let embedder = ScriptEmbedder::new(&EmbedConfig::default()).unwrap();
    let mut request = RequestState { labels: 41 };
    let unit: ScriptUnit = Stmt::var(Ident::fresh(0), None).into();

    let node = embedder.embed_child(&mut request, &unit);

    assert_eq!(
        node.as_element().unwrap().children,
        vec![Node::text("var jsid_41_0;")]
    );
    assert_eq!(request.labels, 42);
}

#[test]
fn test_boxed_supply() {
    let embedder = ScriptEmbedder::new(&EmbedConfig::default()).unwrap();
    let mut supply: Box<dyn IdentitySupply> = Box::new(script_embed::Counter::new());

    embedder.embed_child(&mut supply, &assign_x_one());
    assert_eq!(supply.next_integer(), 1);
}

#[test]
fn test_embedded_text_never_contains_line_breaks() {
    let embedder = ScriptEmbedder::new(&EmbedConfig::default()).unwrap();
    let mut counter = script_embed::Counter::new();
    let unit: ScriptUnit = vec![
        Stmt::var(Ident::fresh(0), Some(Expr::str("first\nsecond\r\nthird"))),
        Stmt::If(
            Expr::var("ready"),
            vec![Stmt::expr(Expr::var("run").call(vec![Expr::fresh(0)]))],
            vec![Stmt::expr(Expr::var("queue").call(vec![Expr::fresh(0)]))],
        ),
    ]
    .into();

    let pretty = embedder.renderer().render(&unit, RenderMode::Pretty, Some("0"));
    assert!(pretty.contains('\n'));

    let node = embedder.embed_child(&mut counter, &unit);
    let html = script_embed::render_html(&node);
    assert!(!html.contains('\n') && !html.contains('\r'), "{}", html);

    let named = NamedScript::new("onload", unit).unwrap();
    let attribute = embedder.embed_attribute(&mut counter, &named);
    assert!(!attribute.value.contains('\n'), "{}", attribute.value);
}
