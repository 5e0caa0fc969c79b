//! Discovery of tab marker elements.

use jtabs_dom::{Document, Element, NodeId, Selector};

/// Class marking a header paragraph.
pub(crate) const TAB_TITLE_CLASS: &str = "tab-title";
/// Class marking a panel div, and the class of the generated panel list.
pub(crate) const TAB_CONTENT_CLASS: &str = "tab-content";
/// Prefix of the class carrying the group name.
pub(crate) const TABGROUP_PREFIX: &str = "tabgroup-";

/// Markers belonging to one named group, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMarkers {
    /// Group name (the part after `tabgroup-`).
    pub name: String,
    /// `p.tab-title` markers.
    pub titles: Vec<NodeId>,
    /// `div.tab-content` markers.
    pub contents: Vec<NodeId>,
}

impl GroupMarkers {
    /// Whether header and panel counts line up.
    pub fn is_aligned(&self) -> bool {
        self.titles.len() == self.contents.len()
    }
}

/// Group name carried by an element's `tabgroup-<name>` class.
///
/// Everything after the prefix is the name, so `tabgroup-my-group` names
/// `my-group`. Classes with an empty suffix are ignored.
pub fn group_name(element: &Element) -> Option<&str> {
    element
        .classes()
        .filter_map(|class| class.strip_prefix(TABGROUP_PREFIX))
        .find(|name| !name.is_empty())
}

/// Collect tab groups from marker elements.
///
/// Group names come from `p.tab-title` markers in first-seen order. For each
/// name, titles and `div.tab-content` markers are gathered in document order.
pub fn discover_groups(doc: &Document) -> Vec<GroupMarkers> {
    let mut names: Vec<String> = Vec::new();
    for title in doc.select(&Selector::tag("p").with_class(TAB_TITLE_CLASS)) {
        if let Some(name) = doc.element(title).and_then(group_name)
            && !names.iter().any(|seen| seen == name)
        {
            names.push(name.to_owned());
        }
    }

    names
        .into_iter()
        .map(|name| {
            let group_class = format!("{TABGROUP_PREFIX}{name}");
            let titles = doc.select(
                &Selector::tag("p")
                    .with_class(TAB_TITLE_CLASS)
                    .with_class(group_class.clone()),
            );
            let contents = doc.select(
                &Selector::tag("div")
                    .with_class(TAB_CONTENT_CLASS)
                    .with_class(group_class),
            );
            GroupMarkers {
                name,
                titles,
                contents,
            }
        })
        .collect()
}
