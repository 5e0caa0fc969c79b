//! Construction of tab widgets from discovered markers.
//!
//! Generated structure for group `lang`:
//!
//! ```html
//! <div id="tab-block-lang">
//!   <ul class="tab" data-tab="tab-content-lang">
//!     <li class="active"><a href="#" title="Python">Python</a></li>
//!     <li><a href="#" title="JS">JS</a></li>
//!   </ul>
//!   <ul class="tab-content" id="tab-content-lang">
//!     <li class="active">...</li>
//!     <li>...</li>
//!   </ul>
//! </div>
//! ```

use jtabs_dom::{Document, Element, NodeId};

use crate::TabsError;
use crate::markers::{GroupMarkers, TAB_CONTENT_CLASS};

/// Class of the generated header list.
pub(crate) const HEADER_LIST_CLASS: &str = "tab";
/// Class carried by the active header and panel items.
pub(crate) const ACTIVE_CLASS: &str = "active";
/// Attribute on the header list naming the panel list id.
pub(crate) const DATA_TAB_ATTR: &str = "data-tab";
/// Prefix of the panel list id.
pub(crate) const CONTENT_ID_PREFIX: &str = "tab-content-";
/// Prefix of the wrapper block id.
const BLOCK_ID_PREFIX: &str = "tab-block-";

/// Build the widget for one group and insert it before the group's first
/// marker.
///
/// Title and content children are moved into the widget; the emptied
/// markers stay in place so the caller can remove every group's markers
/// once all widgets exist. Header and panel counts are expected to match.
///
/// Returns the wrapper block.
pub(crate) fn build_group(doc: &mut Document, markers: &GroupMarkers) -> Result<NodeId, TabsError> {
    let name = &markers.name;
    let content_id = format!("{CONTENT_ID_PREFIX}{name}");

    let block = doc.create_element(Element::new("div").with_attr("id", format!("{BLOCK_ID_PREFIX}{name}")));
    let header_list = doc.create_element(
        Element::new("ul")
            .with_attr("class", HEADER_LIST_CLASS)
            .with_attr(DATA_TAB_ATTR, content_id.clone()),
    );
    let content_list = doc.create_element(
        Element::new("ul")
            .with_attr("class", TAB_CONTENT_CLASS)
            .with_attr("id", content_id),
    );

    // First marker in document order, computed before any content moves.
    let anchor = first_marker(doc, markers);

    for (position, title) in markers.titles.iter().enumerate() {
        let label = doc.text_content(*title);
        let item = create_item(doc, position == 0);
        let link = doc.create_element(
            Element::new("a")
                .with_attr("href", "#")
                .with_attr("title", label.trim()),
        );
        doc.move_children(*title, link);
        doc.append_child(item, link);
        doc.append_child(header_list, item);
    }

    for (position, content) in markers.contents.iter().enumerate() {
        let item = create_item(doc, position == 0);
        doc.move_children(*content, item);
        doc.append_child(content_list, item);
    }

    doc.append_child(block, header_list);
    doc.append_child(block, content_list);

    match anchor {
        Some(anchor) => doc.insert_before(anchor, block)?,
        None => {
            let root = doc.root();
            doc.append_child(root, block);
        }
    }

    tracing::debug!(
        group = %name,
        headers = markers.titles.len(),
        panels = markers.contents.len(),
        "Built tab group"
    );

    Ok(block)
}

/// Remove every marker of a group from the document.
pub(crate) fn remove_markers(doc: &mut Document, markers: &GroupMarkers) {
    for marker in markers.titles.iter().chain(&markers.contents) {
        doc.detach(*marker);
    }
}

fn create_item(doc: &mut Document, active: bool) -> NodeId {
    let mut item = Element::new("li");
    if active {
        item.add_class(ACTIVE_CLASS);
    }
    doc.create_element(item)
}

fn first_marker(doc: &Document, markers: &GroupMarkers) -> Option<NodeId> {
    doc.descendants(doc.root())
        .find(|node| markers.titles.contains(node) || markers.contents.contains(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::discover_groups;
    use pretty_assertions::assert_eq;

    fn build_all(html: &str) -> Document {
        let mut doc = Document::parse(html);
        let groups = discover_groups(&doc);
        for group in &groups {
            build_group(&mut doc, group).unwrap();
        }
        for group in &groups {
            remove_markers(&mut doc, group);
        }
        doc
    }

    #[test]
    fn test_build_group_structure() {
        let doc = build_all(concat!(
            r#"<p class="tab-title tabgroup-lang">Python</p>"#,
            r#"<p class="tab-title tabgroup-lang">JS</p>"#,
            r#"<div class="tab-content tabgroup-lang"><p>P0</p></div>"#,
            r#"<div class="tab-content tabgroup-lang"><p>P1</p></div>"#,
        ));

        assert_eq!(
            doc.to_html(),
            concat!(
                r#"<div id="tab-block-lang">"#,
                r#"<ul class="tab" data-tab="tab-content-lang">"#,
                r##"<li class="active"><a href="#" title="Python">Python</a></li>"##,
                r##"<li><a href="#" title="JS">JS</a></li>"##,
                "</ul>",
                r#"<ul class="tab-content" id="tab-content-lang">"#,
                r#"<li class="active"><p>P0</p></li>"#,
                "<li><p>P1</p></li>",
                "</ul>",
                "</div>",
            )
        );
    }

    #[test]
    fn test_build_inserts_before_first_marker() {
        let doc = build_all(concat!(
            "<h1>Install</h1>",
            r#"<div class="tab-content tabgroup-os">apt</div>"#,
            r#"<p class="tab-title tabgroup-os">Linux</p>"#,
            "<p>Done</p>",
        ));
        let html = doc.to_html();
        assert!(html.starts_with(r#"<h1>Install</h1><div id="tab-block-os">"#));
        assert!(html.ends_with("</div><p>Done</p>"));
    }

    #[test]
    fn test_build_keeps_title_markup() {
        let doc = build_all(concat!(
            r#"<p class="tab-title tabgroup-lang"><code>cargo</code> build</p>"#,
            r#"<div class="tab-content tabgroup-lang">x</div>"#,
        ));
        assert!(doc.to_html().contains(
            r##"<a href="#" title="cargo build"><code>cargo</code> build</a>"##
        ));
    }

    #[test]
    fn test_build_two_groups_in_place() {
        let doc = build_all(concat!(
            r#"<p class="tab-title tabgroup-a">Go</p>"#,
            r#"<div class="tab-content tabgroup-a">a</div>"#,
            "<hr>",
            r#"<p class="tab-title tabgroup-b">Go</p>"#,
            r#"<div class="tab-content tabgroup-b">b</div>"#,
        ));
        let html = doc.to_html();
        let a = html.find(r#"id="tab-block-a""#).unwrap();
        let hr = html.find("<hr>").unwrap();
        let b = html.find(r#"id="tab-block-b""#).unwrap();
        assert!(a < hr && hr < b);
        assert!(!html.contains("tab-title"));
    }

    #[test]
    fn test_build_nested_group_inside_panel() {
        let doc = build_all(concat!(
            r#"<p class="tab-title tabgroup-outer">One</p>"#,
            r#"<div class="tab-content tabgroup-outer">"#,
            r#"<p class="tab-title tabgroup-inner">A</p>"#,
            r#"<div class="tab-content tabgroup-inner">inner a</div>"#,
            "</div>",
        ));
        assert_eq!(
            doc.to_html(),
            concat!(
                r#"<div id="tab-block-outer">"#,
                r#"<ul class="tab" data-tab="tab-content-outer">"#,
                r##"<li class="active"><a href="#" title="One">One</a></li>"##,
                "</ul>",
                r#"<ul class="tab-content" id="tab-content-outer">"#,
                r#"<li class="active">"#,
                r#"<div id="tab-block-inner">"#,
                r#"<ul class="tab" data-tab="tab-content-inner">"#,
                r##"<li class="active"><a href="#" title="A">A</a></li>"##,
                "</ul>",
                r#"<ul class="tab-content" id="tab-content-inner">"#,
                r#"<li class="active">inner a</li>"#,
                "</ul>",
                "</div>",
                "</li>",
                "</ul>",
                "</div>",
            )
        );
    }
}
