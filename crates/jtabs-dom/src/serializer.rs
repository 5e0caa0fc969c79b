//! HTML serializer for [`Document`] trees.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::fmt::Write;

use crate::tree::{Document, Element, NodeId, NodeKind};

/// Elements whose text content is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe",
    "noembed",
    "noframes",
    "noscript",
    "plaintext",
    "script",
    "style",
    "xmp",
];

/// Serialize documents back to HTML.
///
/// Follows the HTML fragment serialization algorithm: void elements are
/// written without a closing tag, every other element gets an explicit end
/// tag, and text inside raw text elements is written as is.
pub struct HtmlSerializer;

impl HtmlSerializer {
    /// Create a new serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize a node and its subtree.
    pub fn serialize_node(&self, doc: &Document, id: NodeId) -> String {
        let mut out = String::new();
        write_node(doc, id, false, &mut out);
        out
    }

    /// Serialize the children of a node.
    pub fn serialize_children(&self, doc: &Document, id: NodeId) -> String {
        let raw = doc.element(id).is_some_and(is_raw_text);
        let mut out = String::with_capacity(1024);
        for child in doc.children(id) {
            write_node(doc, *child, raw, &mut out);
        }
        out
    }
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_node(doc: &Document, id: NodeId, raw_text: bool, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Document => {
            for child in doc.children(id) {
                write_node(doc, *child, false, out);
            }
        }
        NodeKind::Text(text) if raw_text => out.push_str(text),
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Comment(body) => {
            let _ = write!(out, "<!--{body}-->");
        }
        NodeKind::Doctype(body) => {
            let _ = write!(out, "<!DOCTYPE {body}>");
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (key, value) in &element.attrs {
                let _ = write!(out, r#" {key}="{}""#, escape_attr(value));
            }
            out.push('>');

            if element.is_void() {
                return;
            }

            if drops_leading_newline(element)
                && let Some(NodeKind::Text(text)) = doc.children(id).first().map(|c| doc.kind(*c))
                && text.starts_with('\n')
            {
                out.push('\n');
            }

            let raw = is_raw_text(element);
            for child in doc.children(id) {
                write_node(doc, *child, raw, out);
            }
            let _ = write!(out, "</{}>", element.tag);
        }
    }
}

fn is_raw_text(element: &Element) -> bool {
    RAW_TEXT_ELEMENTS.contains(&element.tag.as_str())
}

/// Elements whose first newline the parser strips.
fn drops_leading_newline(element: &Element) -> bool {
    matches!(element.tag.as_str(), "pre" | "textarea" | "listing")
}

fn escape_text(text: &str) -> String {
    escape_html(text, false)
}

fn escape_attr(text: &str) -> String {
    escape_html(text, true)
}

fn escape_html(text: &str, in_attribute: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '\u{a0}' => result.push_str("&nbsp;"),
            '"' if in_attribute => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }
    result
}
