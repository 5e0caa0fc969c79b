//! Tab groups bound to widget markup.

use jtabs_dom::{Document, NodeId, Selector};

use crate::builder::{ACTIVE_CLASS, CONTENT_ID_PREFIX, DATA_TAB_ATTR, HEADER_LIST_CLASS};

/// Address of a header: group index on the page and position in the group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeaderRef {
    /// Index into [`TabPage::groups`](crate::TabPage::groups).
    pub group: usize,
    /// Position within the group.
    pub position: usize,
}

impl HeaderRef {
    #[must_use]
    pub fn new(group: usize, position: usize) -> Self {
        Self { group, position }
    }
}

/// A clickable header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabHeader {
    pub(crate) item: NodeId,
    pub(crate) link: NodeId,
    pub(crate) label: String,
}

impl TabHeader {
    /// The header `<li>`.
    pub fn item(&self) -> NodeId {
        self.item
    }

    /// The click target (`<a>`, or the `<li>` when it has no link).
    pub fn link(&self) -> NodeId {
        self.link
    }

    /// Display text, trimmed.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A content panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabPanel {
    pub(crate) item: NodeId,
}

impl TabPanel {
    /// The panel `<li>`.
    pub fn item(&self) -> NodeId {
        self.item
    }
}

/// A named group of headers and panels with one active position.
///
/// Headers and panels are parallel sequences. Equal lengths are a
/// precondition of the markup; a header without a panel can still be
/// activated, only the header changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabGroup {
    pub(crate) name: String,
    pub(crate) header_list: NodeId,
    pub(crate) content_list: NodeId,
    pub(crate) headers: Vec<TabHeader>,
    pub(crate) panels: Vec<TabPanel>,
    pub(crate) active: usize,
}

impl TabGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[TabHeader] {
        &self.headers
    }

    pub fn panels(&self) -> &[TabPanel] {
        &self.panels
    }

    /// Position of the active header and panel.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_header(&self) -> Option<&TabHeader> {
        self.headers.get(self.active)
    }

    pub fn active_panel(&self) -> Option<&TabPanel> {
        self.panels.get(self.active)
    }

    /// Whether header and panel counts match.
    pub fn is_aligned(&self) -> bool {
        self.headers.len() == self.panels.len()
    }

    /// The header list `<ul class="tab">`.
    pub fn header_list(&self) -> NodeId {
        self.header_list
    }

    /// The panel list `<ul class="tab-content">`.
    pub fn content_list(&self) -> NodeId {
        self.content_list
    }

    /// Index of a header `<li>` among the `<li>` items of the header list.
    pub(crate) fn header_position(&self, doc: &Document, item: NodeId) -> Option<usize> {
        list_items(doc, self.header_list)
            .iter()
            .position(|candidate| *candidate == item)
    }

    /// Make `position` the only active header and panel.
    pub(crate) fn set_active(&mut self, doc: &mut Document, position: usize) {
        let headers = self.headers.iter().map(|h| h.item).enumerate();
        let panels = self.panels.iter().map(|p| p.item).enumerate();
        for (index, item) in headers.chain(panels) {
            let Some(element) = doc.element_mut(item) else {
                continue;
            };
            if index == position {
                element.add_class(ACTIVE_CLASS);
            } else {
                element.remove_class(ACTIVE_CLASS);
            }
        }

        self.active = position;
    }
}

/// Bind every tab widget in the document.
///
/// A widget is a `ul.tab` whose `data-tab` attribute names the id of its
/// panel list. Each group is normalized so exactly one header and the panel
/// at the same position are active (the first header marked active, or
/// position 0).
pub(crate) fn bind_groups(doc: &mut Document, warnings: &mut Vec<String>) -> Vec<TabGroup> {
    let mut groups = Vec::new();

    for header_list in doc.select(&Selector::tag("ul").with_class(HEADER_LIST_CLASS)) {
        let Some(target) = doc
            .element(header_list)
            .and_then(|e| e.attr(DATA_TAB_ATTR))
            .map(str::to_owned)
        else {
            continue;
        };

        let Some(content_list) = doc.element_by_id(&target) else {
            tracing::warn!(target = %target, "Tab list references a missing panel list");
            warnings.push(format!("tab list references missing panel list #{target}"));
            continue;
        };

        let name = target
            .strip_prefix(CONTENT_ID_PREFIX)
            .unwrap_or(&target)
            .to_owned();

        let headers: Vec<TabHeader> = list_items(doc, header_list)
            .into_iter()
            .map(|item| {
                let link = doc
                    .select_within(item, &Selector::tag("a"))
                    .first()
                    .copied()
                    .unwrap_or(item);
                TabHeader {
                    item,
                    link,
                    label: doc.text_content(link).trim().to_owned(),
                }
            })
            .collect();

        let panels: Vec<TabPanel> = list_items(doc, content_list)
            .into_iter()
            .map(|item| TabPanel { item })
            .collect();

        if headers.len() != panels.len() {
            tracing::warn!(
                group = %name,
                headers = headers.len(),
                panels = panels.len(),
                "Tab group has mismatched header and panel counts"
            );
            warnings.push(format!(
                "tab group '{name}' has {} headers but {} panels",
                headers.len(),
                panels.len()
            ));
        }

        let active = headers
            .iter()
            .position(|h| {
                doc.element(h.item)
                    .is_some_and(|e| e.has_class(ACTIVE_CLASS))
            })
            .unwrap_or(0);

        let mut group = TabGroup {
            name,
            header_list,
            content_list,
            headers,
            panels,
            active,
        };
        group.set_active(doc, active);
        groups.push(group);
    }

    groups
}

/// Direct `<li>` children of a list.
fn list_items(doc: &Document, list: NodeId) -> Vec<NodeId> {
    doc.element_children(list)
        .into_iter()
        .filter(|child| doc.element(*child).is_some_and(|e| e.tag == "li"))
        .collect()
}
