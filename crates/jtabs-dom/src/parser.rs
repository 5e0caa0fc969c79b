//! HTML5 parsing through `scraper` (html5ever), copied into the arena.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use scraper::{ElementRef, Html, Node};

use crate::tree::{Document, Element, NodeId, NodeKind};

/// Parse HTML into a [`Document`].
///
/// Parsing follows the HTML5 tree construction rules, so entities, raw text
/// in `<script>`/`<style>` and implicitly closed elements (`<p>`, `<li>`)
/// behave as in a browser. Parsing never fails; malformed markup is
/// recovered the same way a browser recovers it.
///
/// Input that starts with a doctype or an `<html>` tag is parsed as a full
/// document. Anything else is parsed as a `<body>` fragment, so no
/// `<html>`/`<head>`/`<body>` wrapper is added around it.
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a full document or a fragment, depending on how `html` starts.
    pub fn parse(&self, html: &str) -> Document {
        if is_full_document(html) {
            self.parse_document(html)
        } else {
            self.parse_fragment(html)
        }
    }

    /// Parse a full document, adding the implied `<html>`, `<head>` and
    /// `<body>` elements.
    pub fn parse_document(&self, html: &str) -> Document {
        let parsed = Html::parse_document(html);
        let mut doc = Document::new();
        let root = doc.root();
        for child in parsed.tree.root().children() {
            match ElementRef::wrap(child) {
                Some(element) => append_element(&mut doc, root, element),
                None => append_leaf(&mut doc, root, child.value()),
            }
        }
        doc
    }

    /// Parse a `<body>` fragment.
    pub fn parse_fragment(&self, html: &str) -> Document {
        let parsed = Html::parse_fragment(html);
        let mut doc = Document::new();
        let root = doc.root();
        append_children(&mut doc, root, parsed.root_element());
        doc
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `html` opens with a doctype or `<html>`, after a BOM, whitespace
/// and comments.
fn is_full_document(html: &str) -> bool {
    let mut rest = html.trim_start_matches('\u{feff}').trim_start();
    while let Some(comment) = rest.strip_prefix("<!--") {
        let Some(end) = comment.find("-->") else {
            return false;
        };
        rest = comment[end + 3..].trim_start();
    }
    starts_with_ignore_case(rest, "<!doctype") || is_html_tag(rest)
}

fn is_html_tag(text: &str) -> bool {
    starts_with_ignore_case(text, "<html")
        && text[5..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c == '/' || c.is_ascii_whitespace())
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn append_element(doc: &mut Document, parent: NodeId, source: ElementRef<'_>) {
    let value = source.value();
    let mut element = Element::new(value.name());
    for (name, attr_value) in value.attrs() {
        element.attrs.push((name.to_owned(), attr_value.to_owned()));
    }

    let id = doc.create_element(element);
    doc.append_child(parent, id);
    append_children(doc, id, source);
}

fn append_children(doc: &mut Document, parent: NodeId, source: ElementRef<'_>) {
    for child in source.children() {
        match ElementRef::wrap(child) {
            Some(element) => append_element(doc, parent, element),
            None => append_leaf(doc, parent, child.value()),
        }
    }
}

/// Copy a non-element node. Processing instructions have no HTML
/// serialization and are dropped.
fn append_leaf(doc: &mut Document, parent: NodeId, node: &Node) {
    let kind = match node {
        Node::Text(text) => {
            doc.append_text(parent, text);
            return;
        }
        Node::Comment(comment) => NodeKind::Comment((**comment).to_owned()),
        Node::Doctype(doctype) => NodeKind::Doctype(doctype.name().to_owned()),
        _ => return,
    };
    let id = doc.create_node(kind);
    doc.append_child(parent, id);
}
