//! `jtabs copy` command implementation.

use std::path::PathBuf;

use clap::Args;
use jtabs_config::Config;
use jtabs_core::{CopyOutcome, DEFAULT_COPY_BUTTON_HTML, HeaderRef, NodeId, TabPage, TabsOptions};

use crate::clipboard::TerminalHost;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the copy command.
#[derive(Args)]
pub(crate) struct CopyArgs {
    /// HTML page holding the code block.
    file: PathBuf,

    /// Tab group name (the part after `tabgroup-`).
    #[arg(short, long)]
    group: String,

    /// Tab label (default: the active tab).
    #[arg(short, long)]
    tab: Option<String>,

    /// Index of the code block within the panel, starting at 0.
    #[arg(short, long, default_value_t = 0)]
    block: usize,

    /// Skip the system clipboard and send an OSC 52 sequence to the terminal.
    #[arg(long)]
    osc52: bool,

    /// Path to configuration file (default: auto-discover jtabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CopyArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let html = std::fs::read_to_string(&self.file)?;
        let page = TabPage::load(&html, copy_options(config.tabs))?;
        let button = find_button(&page, &self.group, self.tab.as_deref(), self.block)?;

        let mut host = if self.osc52 {
            TerminalHost::terminal_only()
        } else {
            TerminalHost::new()
        };

        match page.copy_code(button, &mut host)? {
            CopyOutcome::Platform => output.success("Copied to clipboard"),
            CopyOutcome::Fallback => output.success("Copied through the terminal (OSC 52)"),
            CopyOutcome::Failed => {
                return Err(CliError::Validation("Copy failed".to_owned()));
            }
        }
        Ok(())
    }
}

/// Options with copy buttons enabled, whatever the configuration says.
fn copy_options(tabs: TabsOptions) -> TabsOptions {
    if tabs.add_copy_to_clipboard_button {
        return tabs;
    }
    TabsOptions {
        add_copy_to_clipboard_button: true,
        copy_to_clipboard_button_html: DEFAULT_COPY_BUTTON_HTML.to_owned(),
        ..tabs
    }
}

/// Copy button of the `block`-th code block in a panel.
fn find_button(
    page: &TabPage,
    group_name: &str,
    tab: Option<&str>,
    block: usize,
) -> Result<NodeId, CliError> {
    let group_index = page
        .group_index(group_name)
        .ok_or_else(|| CliError::Validation(format!("No tab group named '{group_name}'")))?;
    let group = &page.groups()[group_index];

    let position = match tab {
        Some(label) => group
            .headers()
            .iter()
            .position(|h| h.label() == label)
            .ok_or_else(|| {
                CliError::Validation(format!("Tab group '{group_name}' has no tab '{label}'"))
            })?,
        None => group.active(),
    };

    let blocks = page.panel_code_blocks(HeaderRef::new(group_index, position));
    let target = blocks.get(block).copied().ok_or_else(|| {
        CliError::Validation(format!(
            "Panel {position} of tab group '{group_name}' has {} code block(s)",
            blocks.len()
        ))
    })?;

    page.copy_buttons()
        .iter()
        .find(|b| b.block == target)
        .map(|b| b.button)
        .ok_or_else(|| CliError::Validation("Code block has no copy button".to_owned()))
}
