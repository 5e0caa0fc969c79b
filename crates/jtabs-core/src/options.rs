//! Behavior switches passed to [`TabPage::load`](crate::TabPage::load).

/// Markup of the injected copy button.
pub const DEFAULT_COPY_BUTTON_HTML: &str = r#"<button class="btn btn-primary btn-small" style="cursor:pointer;" title="Copy">📋</button>"#;

/// Tab behavior options.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct TabsOptions {
    /// Clicking a header also activates every header with the same label.
    pub sync_tabs_with_same_labels: bool,
    /// Append a copy button to code blocks inside panels.
    pub add_copy_to_clipboard_button: bool,
    /// Markup for the copy button; its first element is used.
    pub copy_to_clipboard_button_html: String,
}

impl Default for TabsOptions {
    fn default() -> Self {
        Self {
            sync_tabs_with_same_labels: false,
            add_copy_to_clipboard_button: true,
            copy_to_clipboard_button_html: DEFAULT_COPY_BUTTON_HTML.to_owned(),
        }
    }
}

impl TabsOptions {
    /// Enable or disable cross-group label sync.
    #[must_use]
    pub fn with_sync(mut self, enabled: bool) -> Self {
        self.sync_tabs_with_same_labels = enabled;
        self
    }

    /// Enable or disable copy buttons.
    #[must_use]
    pub fn with_copy_button(mut self, enabled: bool) -> Self {
        self.add_copy_to_clipboard_button = enabled;
        self
    }
}
