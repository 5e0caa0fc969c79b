//! Copy-to-clipboard buttons for code blocks inside panels.

use std::collections::HashSet;

use jtabs_dom::{Document, NodeId, Selector};

use crate::{TabGroup, TabPanel, TabsError};

/// Attribute marking an injected copy button.
const COPY_BUTTON_ATTR: &str = "data-copy-button";
const CONTAINER_STYLE: &str = "position: relative";
const BUTTON_STYLE: &str = "position: absolute; top: -15px; right: -15px";

/// Error from a clipboard backend.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// The mechanism is not available in this environment.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// Writing the text failed.
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// A clipboard that accepts text.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Environment in which copy buttons run.
pub trait ClipboardHost {
    /// The platform clipboard, if usable in the current context.
    fn platform(&mut self) -> Option<&mut dyn Clipboard>;

    /// Secondary copy mechanism used when there is no platform clipboard.
    fn fallback_copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Which mechanism handled a copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Written through the platform clipboard.
    Platform,
    /// Written through the fallback mechanism.
    Fallback,
    /// Nothing was copied; the failure was logged.
    Failed,
}

/// Copy `text` using the platform clipboard when available, the fallback
/// otherwise.
///
/// Failures are logged and reported as [`CopyOutcome::Failed`], never
/// propagated.
pub fn copy_to_clipboard(host: &mut dyn ClipboardHost, text: &str) -> CopyOutcome {
    if let Some(clipboard) = host.platform() {
        return match clipboard.write_text(text) {
            Ok(()) => CopyOutcome::Platform,
            Err(e) => {
                tracing::warn!(error = %e, "Platform clipboard write failed");
                CopyOutcome::Failed
            }
        };
    }

    match host.fallback_copy(text) {
        Ok(()) => CopyOutcome::Fallback,
        Err(e) => {
            tracing::error!(error = %e, "Fallback copy failed");
            CopyOutcome::Failed
        }
    }
}

/// A copy button bound to the code block it copies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyButton {
    /// The injected button element.
    pub button: NodeId,
    /// The `<pre>` whose text is copied.
    pub block: NodeId,
}

/// Code blocks inside the panels of `groups`, in document order, each once.
pub(crate) fn panel_code_blocks(doc: &Document, groups: &[TabGroup]) -> Vec<NodeId> {
    let panels: HashSet<NodeId> = groups
        .iter()
        .flat_map(TabGroup::panels)
        .map(TabPanel::item)
        .collect();
    doc.select(&Selector::tag("pre"))
        .into_iter()
        .filter(|block| doc.ancestors(*block).any(|node| panels.contains(&node)))
        .collect()
}

/// Append a copy button next to every code block inside a panel.
///
/// The block's parent becomes the positioning container. Blocks whose parent
/// already holds an injected button (a page loaded from built output) get
/// that button bound instead of a new one.
pub(crate) fn inject_copy_buttons(
    doc: &mut Document,
    groups: &[TabGroup],
    button_html: &str,
) -> Result<Vec<CopyButton>, TabsError> {
    let template = Document::parse(button_html);
    let template_button = template
        .children(template.root())
        .iter()
        .copied()
        .find(|node| template.element(*node).is_some())
        .ok_or_else(|| TabsError::InvalidButtonMarkup(button_html.to_owned()))?;

    let mut buttons = Vec::new();
    let mut claimed = HashSet::new();

    for block in panel_code_blocks(doc, groups) {
        let Some(container) = doc.parent(block) else {
            continue;
        };

        let existing = doc.element_children(container).into_iter().find(|child| {
            !claimed.contains(child)
                && doc
                    .element(*child)
                    .is_some_and(|e| e.attr(COPY_BUTTON_ATTR).is_some())
        });

        let button = match existing {
            Some(button) => button,
            None => {
                let button = doc.import(&template, template_button);
                if let Some(element) = doc.element_mut(button) {
                    element.append_style(BUTTON_STYLE);
                    element.set_attr(COPY_BUTTON_ATTR, "");
                }
                if let Some(element) = doc.element_mut(container)
                    && !element.attr("style").is_some_and(|s| s.contains(CONTAINER_STYLE))
                {
                    element.append_style(CONTAINER_STYLE);
                }
                doc.append_child(container, button);
                button
            }
        };

        claimed.insert(button);
        buttons.push(CopyButton { button, block });
    }

    tracing::debug!(count = buttons.len(), "Bound copy buttons");
    Ok(buttons)
}
