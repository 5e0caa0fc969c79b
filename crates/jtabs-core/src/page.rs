//! Page setup and click handling.

use jtabs_dom::{Document, DomError, NodeId};

use crate::builder::{ACTIVE_CLASS, build_group, remove_markers};
use crate::clipboard::{
    ClipboardHost, CopyButton, CopyOutcome, copy_to_clipboard, inject_copy_buttons,
    panel_code_blocks,
};
use crate::group::bind_groups;
use crate::markers::discover_groups;
use crate::{HeaderRef, TabGroup, TabHeader, TabsError, TabsOptions};

/// Headers whose active state changed during one click.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Activated headers, clicked header first, then synced ones.
    pub changed: Vec<HeaderRef>,
}

impl ClickOutcome {
    /// Whether the click left every group unchanged.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Click handler registered for a header: clicks on `target` activate
/// `header`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickBinding {
    pub target: NodeId,
    pub header: HeaderRef,
}

/// A document with bound tab widgets.
///
/// Every method that mutates state runs to completion and leaves each group
/// with exactly one active header and the panel at the same position active.
pub struct TabPage {
    doc: Document,
    options: TabsOptions,
    groups: Vec<TabGroup>,
    bindings: Vec<ClickBinding>,
    copy_buttons: Vec<CopyButton>,
    warnings: Vec<String>,
}

impl TabPage {
    /// Parse markup and run page setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy button markup contains no element.
    pub fn load(html: &str, options: TabsOptions) -> Result<Self, TabsError> {
        Self::from_document(Document::parse(html), options)
    }

    /// Run page setup on a parsed document.
    ///
    /// Builds widgets from markers, binds click handlers for every widget
    /// (including widgets already present in the input) and, if enabled,
    /// injects copy buttons.
    ///
    /// # Errors
    ///
    /// Returns an error if a widget cannot be inserted or the copy button
    /// markup contains no element.
    pub fn from_document(mut doc: Document, options: TabsOptions) -> Result<Self, TabsError> {
        let mut warnings = Vec::new();

        let discovered = discover_groups(&doc);
        for markers in &discovered {
            if !markers.is_aligned() {
                tracing::warn!(
                    group = %markers.name,
                    titles = markers.titles.len(),
                    contents = markers.contents.len(),
                    "Tab markers have mismatched title and content counts"
                );
            }
            build_group(&mut doc, markers)?;
        }
        for markers in &discovered {
            remove_markers(&mut doc, markers);
        }

        let groups = bind_groups(&mut doc, &mut warnings);

        let bindings: Vec<ClickBinding> = groups
            .iter()
            .enumerate()
            .flat_map(|(group_index, group)| {
                group
                    .headers()
                    .iter()
                    .enumerate()
                    .map(move |(position, header)| ClickBinding {
                        target: header.link(),
                        header: HeaderRef::new(group_index, position),
                    })
            })
            .collect();

        let copy_buttons = if options.add_copy_to_clipboard_button {
            inject_copy_buttons(&mut doc, &groups, &options.copy_to_clipboard_button_html)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            built = discovered.len(),
            groups = groups.len(),
            copy_buttons = copy_buttons.len(),
            "Tab page ready"
        );

        Ok(Self {
            doc,
            options,
            groups,
            bindings,
            copy_buttons,
            warnings,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn options(&self) -> &TabsOptions {
        &self.options
    }

    pub fn groups(&self) -> &[TabGroup] {
        &self.groups
    }

    /// Find a group by name.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name() == name)
    }

    /// Look up a header.
    ///
    /// # Errors
    ///
    /// Returns [`TabsError::UnknownHeader`] if the reference is out of range.
    pub fn header(&self, header: HeaderRef) -> Result<&TabHeader, TabsError> {
        self.groups
            .get(header.group)
            .and_then(|g| g.headers().get(header.position))
            .ok_or(TabsError::UnknownHeader(header))
    }

    pub fn bindings(&self) -> &[ClickBinding] {
        &self.bindings
    }

    pub fn copy_buttons(&self) -> &[CopyButton] {
        &self.copy_buttons
    }

    /// Precondition violations noticed during setup.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Serialize the current document.
    pub fn to_html(&self) -> String {
        self.doc.to_html()
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Handle a click on a header.
    ///
    /// Activates the header and its panel; with label sync enabled, also
    /// activates every other header on the page with the same label.
    ///
    /// # Errors
    ///
    /// Returns an error if the header does not exist or is no longer
    /// attached to its list.
    pub fn click(&mut self, header: HeaderRef) -> Result<ClickOutcome, TabsError> {
        let mut outcome = ClickOutcome::default();
        if self.activate(header)? {
            outcome.changed.push(header);
        }

        if self.options.sync_tabs_with_same_labels {
            let label = self.header(header)?.label().to_owned();
            outcome
                .changed
                .extend(self.activate_label(&label, Some(header))?);
        }

        Ok(outcome)
    }

    /// Handle a click on an arbitrary node.
    ///
    /// Returns `None` when no header handler is registered for `target`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`click`](Self::click).
    pub fn dispatch_click(&mut self, target: NodeId) -> Result<Option<ClickOutcome>, TabsError> {
        let binding = self.bindings.iter().find(|b| b.target == target).copied();
        match binding {
            Some(binding) => self.click(binding.header).map(Some),
            None => Ok(None),
        }
    }

    /// Activate every header labelled `label`, in every group.
    ///
    /// Applies regardless of the sync option; used to choose the visible tab
    /// before publishing.
    ///
    /// # Errors
    ///
    /// Returns an error if a matching header is no longer attached.
    pub fn select_label(&mut self, label: &str) -> Result<Vec<HeaderRef>, TabsError> {
        self.activate_label(label, None)
    }

    /// Activation switch for one header.
    ///
    /// The position is the header's index among the `<li>` items of its list,
    /// looked up from the document. Returns `false` when the header is
    /// already active.
    ///
    /// # Errors
    ///
    /// Returns an error if the header does not exist or has no parent list.
    pub fn activate(&mut self, header: HeaderRef) -> Result<bool, TabsError> {
        let item = self.header(header)?.item();
        let position = self.groups[header.group]
            .header_position(&self.doc, item)
            .ok_or(DomError::Detached(item))?;

        if self
            .doc
            .element(item)
            .is_some_and(|e| e.has_class(ACTIVE_CLASS))
        {
            return Ok(false);
        }

        let group = self
            .groups
            .get_mut(header.group)
            .ok_or(TabsError::UnknownHeader(header))?;
        group.set_active(&mut self.doc, position);

        tracing::debug!(group = %group.name(), position, "Activated tab");
        Ok(true)
    }

    fn activate_label(
        &mut self,
        label: &str,
        origin: Option<HeaderRef>,
    ) -> Result<Vec<HeaderRef>, TabsError> {
        let targets: Vec<HeaderRef> = self
            .groups
            .iter()
            .enumerate()
            .flat_map(|(group_index, group)| {
                group
                    .headers()
                    .iter()
                    .enumerate()
                    .filter(|(_, h)| h.label() == label)
                    .map(move |(position, _)| HeaderRef::new(group_index, position))
            })
            .filter(|target| Some(*target) != origin)
            .collect();

        let mut changed = Vec::new();
        for target in targets {
            if self.activate(target)? {
                changed.push(target);
            }
        }
        Ok(changed)
    }

    /// Code blocks inside the panels of a group, in document order.
    pub fn code_blocks(&self, group: usize) -> Vec<NodeId> {
        self.groups
            .get(group)
            .map(|g| panel_code_blocks(&self.doc, std::slice::from_ref(g)))
            .unwrap_or_default()
    }

    /// Code blocks inside one panel, in document order.
    pub fn panel_code_blocks(&self, header: HeaderRef) -> Vec<NodeId> {
        let Some(panel) = self
            .groups
            .get(header.group)
            .and_then(|g| g.panels().get(header.position))
        else {
            return Vec::new();
        };
        self.code_blocks(header.group)
            .into_iter()
            .filter(|block| self.is_within(*block, panel.item()))
            .collect()
    }

    /// Text a copy button would copy for `block`.
    pub fn code_text(&self, block: NodeId) -> String {
        self.doc.text_content(block)
    }

    /// Handle a click on a copy button.
    ///
    /// # Errors
    ///
    /// Returns [`TabsError::UnknownCopyButton`] if `button` is not bound.
    pub fn copy_code(
        &self,
        button: NodeId,
        host: &mut dyn ClipboardHost,
    ) -> Result<CopyOutcome, TabsError> {
        let binding = self
            .copy_buttons
            .iter()
            .find(|b| b.button == button)
            .ok_or(TabsError::UnknownCopyButton(button))?;
        Ok(copy_to_clipboard(host, &self.code_text(binding.block)))
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.doc.ancestors(node).any(|parent| parent == ancestor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::tests::{MemoryClipboard, TestHost};
    use jtabs_dom::Selector;
    use pretty_assertions::assert_eq;

    const LANG: &str = concat!(
        r#"<p class="tab-title tabgroup-lang">Python</p>"#,
        r#"<p class="tab-title tabgroup-lang">JS</p>"#,
        r#"<div class="tab-content tabgroup-lang"><p>P0</p></div>"#,
        r#"<div class="tab-content tabgroup-lang"><p>P1</p></div>"#,
    );

    const SYNCED: &str = concat!(
        r#"<p class="tab-title tabgroup-a">Rust</p>"#,
        r#"<p class="tab-title tabgroup-a">Go</p>"#,
        r#"<div class="tab-content tabgroup-a">a-rust</div>"#,
        r#"<div class="tab-content tabgroup-a">a-go</div>"#,
        r#"<p class="tab-title tabgroup-b">Go</p>"#,
        r#"<p class="tab-title tabgroup-b">Zig</p>"#,
        r#"<div class="tab-content tabgroup-b">b-go</div>"#,
        r#"<div class="tab-content tabgroup-b">b-zig</div>"#,
        r#"<p class="tab-title tabgroup-c">Zig</p>"#,
        r#"<p class="tab-title tabgroup-c">Rust</p>"#,
        r#"<div class="tab-content tabgroup-c">c-zig</div>"#,
        r#"<div class="tab-content tabgroup-c">c-rust</div>"#,
    );

    const CODE: &str = concat!(
        r#"<p class="tab-title tabgroup-sh">Bash</p>"#,
        r#"<p class="tab-title tabgroup-sh">Fish</p>"#,
        r#"<div class="tab-content tabgroup-sh"><pre><code>export A=1</code></pre></div>"#,
        r#"<div class="tab-content tabgroup-sh"><pre><code>set -x A 1</code></pre><pre>echo $A</pre></div>"#,
        "<pre>outside</pre>",
    );

    fn no_buttons() -> TabsOptions {
        TabsOptions::default().with_copy_button(false)
    }

    /// Positions of active headers and panels, checked against the document.
    fn assert_consistent(page: &TabPage) {
        let doc = page.document();
        for group in page.groups() {
            let active_headers: Vec<usize> = group
                .headers()
                .iter()
                .enumerate()
                .filter(|(_, h)| doc.element(h.item()).unwrap().has_class(ACTIVE_CLASS))
                .map(|(i, _)| i)
                .collect();
            let active_panels: Vec<usize> = group
                .panels()
                .iter()
                .enumerate()
                .filter(|(_, p)| doc.element(p.item()).unwrap().has_class(ACTIVE_CLASS))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(active_headers, vec![group.active()], "group {}", group.name());
            assert_eq!(active_panels, vec![group.active()], "group {}", group.name());
        }
    }

    fn active_labels(page: &TabPage) -> Vec<&str> {
        page.groups()
            .iter()
            .map(|g| g.active_header().unwrap().label())
            .collect()
    }

    fn active_panel_text(page: &TabPage, group: usize) -> String {
        let panel = page.groups()[group].active_panel().unwrap();
        page.document().text_content(panel.item())
    }

    #[test]
    fn test_load_builds_and_activates_first_pair() {
        let page = TabPage::load(LANG, no_buttons()).unwrap();
        assert_eq!(page.groups().len(), 1);
        assert_eq!(page.groups()[0].name(), "lang");
        assert_eq!(page.groups()[0].active(), 0);
        assert_eq!(active_panel_text(&page, 0), "P0");
        assert!(page.warnings().is_empty());
        assert_consistent(&page);
    }

    #[test]
    fn test_load_keeps_surrounding_html_intact() {
        let html = concat!(
            "<p>Tom & Jerry</p>",
            r#"<p class="tab-title tabgroup-lang">Python</p>"#,
            r#"<p class="tab-title tabgroup-lang">JS</p>"#,
            r#"<div class="tab-content tabgroup-lang"><ul><li>pip<li>venv</ul></div>"#,
            r#"<div class="tab-content tabgroup-lang"><p>npm<p>yarn</div>"#,
            "<script>for (let i = 0; i < n && ok; i++) {}</script>",
        );
        let mut page = TabPage::load(html, no_buttons()).unwrap();
        page.click(HeaderRef::new(0, 1)).unwrap();

        let out = page.to_html();
        assert!(out.starts_with(r#"<p>Tom &amp; Jerry</p><div id="tab-block-lang">"#));
        assert!(out.contains("<li><ul><li>pip</li><li>venv</li></ul></li>"));
        assert!(out.contains(r#"<li class="active"><p>npm</p><p>yarn</p></li>"#));
        assert!(out.ends_with("</div><script>for (let i = 0; i < n && ok; i++) {}</script>"));
    }

    #[test]
    fn test_click_switches_active_pair() {
        let mut page = TabPage::load(LANG, no_buttons()).unwrap();
        let outcome = page.click(HeaderRef::new(0, 1)).unwrap();

        assert_eq!(outcome.changed, vec![HeaderRef::new(0, 1)]);
        assert_eq!(page.groups()[0].active(), 1);
        assert_eq!(active_panel_text(&page, 0), "P1");
        assert_consistent(&page);

        let html = page.to_html();
        assert!(html.contains(r#"<li class="active"><p>P1</p></li>"#));
        assert!(html.contains("<li><p>P0</p></li>"));
    }

    #[test]
    fn test_click_active_header_is_noop() {
        let mut page = TabPage::load(LANG, no_buttons()).unwrap();
        let before = page.to_html();
        let outcome = page.click(HeaderRef::new(0, 0)).unwrap();

        assert!(outcome.is_noop());
        assert_eq!(page.to_html(), before);
        assert_eq!(page.groups()[0].active(), 0);
    }

    #[test]
    fn test_click_from_any_start_position() {
        let html = concat!(
            r#"<p class="tab-title tabgroup-n">0</p><p class="tab-title tabgroup-n">1</p>"#,
            r#"<p class="tab-title tabgroup-n">2</p><p class="tab-title tabgroup-n">3</p>"#,
            r#"<div class="tab-content tabgroup-n">p0</div><div class="tab-content tabgroup-n">p1</div>"#,
            r#"<div class="tab-content tabgroup-n">p2</div><div class="tab-content tabgroup-n">p3</div>"#,
        );
        for start in 0..4 {
            for target in 0..4 {
                let mut page = TabPage::load(html, no_buttons()).unwrap();
                page.click(HeaderRef::new(0, start)).unwrap();
                page.click(HeaderRef::new(0, target)).unwrap();
                assert_eq!(page.groups()[0].active(), target);
                assert_eq!(active_panel_text(&page, 0), format!("p{target}"));
                assert_consistent(&page);
            }
        }
    }

    #[test]
    fn test_click_counts_only_list_items() {
        let html = concat!(
            r#"<div id="tab-block-x">"#,
            r#"<ul class="tab" data-tab="tab-content-x">"#,
            r##"<li class="active"><a href="#">A</a></li>"##,
            r#"<span class="divider"></span>"#,
            r##"<li><a href="#">B</a></li>"##,
            "</ul>",
            r#"<ul class="tab-content" id="tab-content-x"><li class="active">a</li><li>b</li></ul>"#,
            "</div>",
        );
        let mut page = TabPage::load(html, no_buttons()).unwrap();
        let outcome = page.click(HeaderRef::new(0, 1)).unwrap();

        assert_eq!(outcome.changed, vec![HeaderRef::new(0, 1)]);
        assert_eq!(page.groups()[0].active(), 1);
        assert_eq!(active_panel_text(&page, 0), "b");
        assert_consistent(&page);
    }

    #[test]
    fn test_click_unknown_header() {
        let mut page = TabPage::load(LANG, no_buttons()).unwrap();
        let err = page.click(HeaderRef::new(0, 5)).unwrap_err();
        assert!(matches!(err, TabsError::UnknownHeader(h) if h == HeaderRef::new(0, 5)));
        let err = page.click(HeaderRef::new(3, 0)).unwrap_err();
        assert!(matches!(err, TabsError::UnknownHeader(_)));
    }

    #[test]
    fn test_click_without_sync_leaves_other_groups() {
        let mut page = TabPage::load(SYNCED, no_buttons()).unwrap();
        page.click(HeaderRef::new(0, 1)).unwrap();
        assert_eq!(active_labels(&page), vec!["Go", "Go", "Zig"]);

        page.click(HeaderRef::new(1, 1)).unwrap();
        assert_eq!(active_labels(&page), vec!["Go", "Zig", "Zig"]);
        assert_consistent(&page);
    }

    #[test]
    fn test_sync_activates_same_label_in_other_groups() {
        let mut page = TabPage::load(SYNCED, no_buttons().with_sync(true)).unwrap();

        // Group b starts on "Go" already, group c has no "Go".
        let outcome = page.click(HeaderRef::new(0, 1)).unwrap();
        assert_eq!(outcome.changed, vec![HeaderRef::new(0, 1)]);
        assert_eq!(active_labels(&page), vec!["Go", "Go", "Zig"]);

        let outcome = page.click(HeaderRef::new(0, 0)).unwrap();
        assert_eq!(
            outcome.changed,
            vec![HeaderRef::new(0, 0), HeaderRef::new(2, 1)]
        );
        assert_eq!(active_labels(&page), vec!["Rust", "Go", "Rust"]);
        assert_eq!(active_panel_text(&page, 2), "c-rust");
        assert_consistent(&page);
    }

    #[test]
    fn test_sync_click_on_active_header_still_propagates() {
        let mut page = TabPage::load(SYNCED, no_buttons().with_sync(true)).unwrap();

        // Group a starts on "Rust", so only group c changes.
        let outcome = page.click(HeaderRef::new(0, 0)).unwrap();
        assert_eq!(outcome.changed, vec![HeaderRef::new(2, 1)]);
        assert_eq!(active_labels(&page), vec!["Rust", "Go", "Rust"]);
        assert_eq!(active_panel_text(&page, 2), "c-rust");
        assert_consistent(&page);
    }

    #[test]
    fn test_sync_go_scenario() {
        let html = concat!(
            r#"<p class="tab-title tabgroup-a">Rust</p><p class="tab-title tabgroup-a">Go</p>"#,
            r#"<div class="tab-content tabgroup-a">ar</div><div class="tab-content tabgroup-a">ag</div>"#,
            r#"<p class="tab-title tabgroup-b">Python</p><p class="tab-title tabgroup-b">Go</p>"#,
            r#"<div class="tab-content tabgroup-b">bp</div><div class="tab-content tabgroup-b">bg</div>"#,
        );
        let mut page = TabPage::load(html, no_buttons().with_sync(true)).unwrap();
        page.click(HeaderRef::new(0, 1)).unwrap();

        assert_eq!(active_labels(&page), vec!["Go", "Go"]);
        assert_eq!(active_panel_text(&page, 1), "bg");
        assert_consistent(&page);
    }

    #[test]
    fn test_sync_requires_exact_label() {
        let html = concat!(
            r#"<p class="tab-title tabgroup-a">Go</p><p class="tab-title tabgroup-a">Rust</p>"#,
            r#"<div class="tab-content tabgroup-a">1</div><div class="tab-content tabgroup-a">2</div>"#,
            r#"<p class="tab-title tabgroup-b">Rust</p><p class="tab-title tabgroup-b">Golang</p>"#,
            r#"<div class="tab-content tabgroup-b">3</div><div class="tab-content tabgroup-b">4</div>"#,
        );
        let mut page = TabPage::load(html, no_buttons().with_sync(true)).unwrap();
        page.click(HeaderRef::new(0, 1)).unwrap();
        page.click(HeaderRef::new(0, 0)).unwrap();

        assert_eq!(active_labels(&page), vec!["Go", "Rust"]);
    }

    #[test]
    fn test_select_label_ignores_sync_option() {
        let mut page = TabPage::load(SYNCED, no_buttons()).unwrap();
        let changed = page.select_label("Zig").unwrap();
        assert_eq!(changed, vec![HeaderRef::new(1, 1)]);
        assert_eq!(active_labels(&page), vec!["Rust", "Zig", "Zig"]);
        assert_consistent(&page);
    }

    #[test]
    fn test_dispatch_click_on_link() {
        let mut page = TabPage::load(LANG, no_buttons()).unwrap();
        let link = page.header(HeaderRef::new(0, 1)).unwrap().link();
        assert_eq!(page.document().element(link).unwrap().tag, "a");

        let outcome = page.dispatch_click(link).unwrap().unwrap();
        assert_eq!(outcome.changed, vec![HeaderRef::new(0, 1)]);
        assert_eq!(page.groups()[0].active(), 1);
    }

    #[test]
    fn test_bindings_cover_every_header() {
        let page = TabPage::load(SYNCED, no_buttons()).unwrap();
        assert_eq!(page.bindings().len(), 6);
        for binding in page.bindings() {
            assert_eq!(page.header(binding.header).unwrap().link(), binding.target);
        }
    }

    #[test]
    fn test_dispatch_click_unbound_target() {
        let mut page = TabPage::load(LANG, no_buttons()).unwrap();
        let panel = page.groups()[0].panels()[1].item();
        assert_eq!(page.dispatch_click(panel).unwrap(), None);
        assert_eq!(page.groups()[0].active(), 0);
    }

    #[test]
    fn test_reload_built_output_keeps_state() {
        let mut page = TabPage::load(LANG, no_buttons()).unwrap();
        page.click(HeaderRef::new(0, 1)).unwrap();
        let built = page.to_html();

        let mut reloaded = TabPage::load(&built, no_buttons()).unwrap();
        assert_eq!(reloaded.to_html(), built);
        assert_eq!(reloaded.groups()[0].active(), 1);

        reloaded.click(HeaderRef::new(0, 0)).unwrap();
        assert_eq!(active_panel_text(&reloaded, 0), "P0");
    }

    #[test]
    fn test_mismatched_counts_warn_and_click_header_only() {
        let html = concat!(
            r#"<p class="tab-title tabgroup-x">A</p><p class="tab-title tabgroup-x">B</p>"#,
            r#"<div class="tab-content tabgroup-x">only</div>"#,
        );
        let mut page = TabPage::load(html, no_buttons()).unwrap();
        assert_eq!(page.warnings().len(), 1);

        page.click(HeaderRef::new(0, 1)).unwrap();
        let group = &page.groups()[0];
        assert_eq!(group.active(), 1);
        assert!(group.active_panel().is_none());
        let panel = group.panels()[0].item();
        assert!(!page.document().element(panel).unwrap().has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_activate_detached_header_is_error() {
        let mut page = TabPage::load(LANG, no_buttons()).unwrap();
        let item = page.header(HeaderRef::new(0, 1)).unwrap().item();
        page.doc.detach(item);

        let err = page.click(HeaderRef::new(0, 1)).unwrap_err();
        assert!(matches!(err, TabsError::Dom(_)));
    }

    #[test]
    fn test_copy_buttons_injected_into_panels_only() {
        let page = TabPage::load(CODE, TabsOptions::default()).unwrap();
        assert_eq!(page.copy_buttons().len(), 3);

        let html = page.to_html();
        assert_eq!(html.matches("data-copy-button").count(), 3);
        assert!(html.contains(
            r#"style="cursor:pointer; position: absolute; top: -15px; right: -15px""#
        ));
        assert!(html.contains(r#"<li class="active" style="position: relative">"#));
        assert!(html.ends_with("<pre>outside</pre>"));
    }

    #[test]
    fn test_copy_buttons_disabled() {
        let page = TabPage::load(CODE, no_buttons()).unwrap();
        assert!(page.copy_buttons().is_empty());
        let doc = page.document();
        assert!(doc.select(&Selector::tag("button")).is_empty());
    }

    #[test]
    fn test_copy_buttons_not_duplicated_on_reload() {
        let page = TabPage::load(CODE, TabsOptions::default()).unwrap();
        let built = page.to_html();

        let reloaded = TabPage::load(&built, TabsOptions::default()).unwrap();
        assert_eq!(reloaded.copy_buttons().len(), 3);
        assert_eq!(reloaded.to_html(), built);
    }

    #[test]
    fn test_copy_code_copies_block_text() {
        let page = TabPage::load(CODE, TabsOptions::default()).unwrap();
        let button = page.copy_buttons()[1].button;

        let mut host = TestHost {
            platform: Some(MemoryClipboard::default()),
            ..TestHost::default()
        };
        let outcome = page.copy_code(button, &mut host).unwrap();
        assert_eq!(outcome, CopyOutcome::Platform);
        assert_eq!(
            host.platform.unwrap().contents.as_deref(),
            Some("set -x A 1")
        );
    }

    #[test]
    fn test_copy_code_unknown_button() {
        let page = TabPage::load(CODE, TabsOptions::default()).unwrap();
        let block = page.copy_buttons()[0].block;
        let mut host = TestHost::default();
        let err = page.copy_code(block, &mut host).unwrap_err();
        assert!(matches!(err, TabsError::UnknownCopyButton(_)));
    }

    #[test]
    fn test_invalid_button_markup() {
        let options = TabsOptions {
            copy_to_clipboard_button_html: "just text".to_owned(),
            ..TabsOptions::default()
        };
        let err = TabPage::load(CODE, options).err().unwrap();
        assert!(matches!(err, TabsError::InvalidButtonMarkup(_)));
    }

    #[test]
    fn test_panel_code_blocks() {
        let page = TabPage::load(CODE, no_buttons()).unwrap();
        let texts: Vec<String> = page
            .panel_code_blocks(HeaderRef::new(0, 1))
            .into_iter()
            .map(|b| page.code_text(b))
            .collect();
        assert_eq!(texts, vec!["set -x A 1", "echo $A"]);
        assert_eq!(page.code_blocks(0).len(), 3);
        assert!(page.code_blocks(7).is_empty());
    }

    #[test]
    fn test_group_index() {
        let page = TabPage::load(SYNCED, no_buttons()).unwrap();
        assert_eq!(page.group_index("b"), Some(1));
        assert_eq!(page.group_index("missing"), None);
    }
}
