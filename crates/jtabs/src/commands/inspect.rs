//! `jtabs inspect` command implementation.

use std::path::PathBuf;

use clap::Args;
use jtabs_config::Config;
use jtabs_core::TabPage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the inspect command.
#[derive(Args)]
pub(crate) struct InspectArgs {
    /// HTML page to inspect.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover jtabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl InspectArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let html = std::fs::read_to_string(&self.file)?;
        let page = TabPage::load(&html, config.tabs)?;

        if page.groups().is_empty() {
            output.info(&format!("{}: no tab groups", self.file.display()));
        }
        for (index, group) in page.groups().iter().enumerate() {
            output.tab_group(group, page.code_blocks(index).len());
        }
        output.page_warnings(&self.file, page.warnings());

        if !page.copy_buttons().is_empty() {
            output.muted(&format!("{} copy button(s)", page.copy_buttons().len()));
        }

        Ok(())
    }
}
