//! HTML serialisation of markup trees

use script_embed_core::{Element, Node};

/// Render a markup tree to an HTML string
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, false);
    tracing::trace!(bytes = out.len(), "rendered markup");
    out
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

fn write_node(out: &mut String, node: &Node, raw_text: bool) {
    match node {
        Node::Element(element) => write_element(out, element),
        // Raw-text content is unescaped, but must not be able to close
        // its parent early.
        Node::Text(text) if raw_text => out.push_str(&text.replace("</", "<\\/")),
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Fragment(children) => {
            for child in children {
                write_node(out, child, raw_text);
            }
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag.as_str());
    for attribute in &element.attributes {
        out.push(' ');
        out.push_str(attribute.name.as_str());
        out.push_str("=\"");
        out.push_str(&escape_attribute(&attribute.value));
        out.push('"');
    }
    out.push('>');

    if element.tag.is_void() {
        return;
    }

    let raw_text = element.tag.is_raw_text();
    for child in &element.children {
        write_node(out, child, raw_text);
    }

    out.push_str("</");
    out.push_str(element.tag.as_str());
    out.push('>');
}
