//! Command reports on stderr.
//!
//! Pages, tab groups and their setup warnings are reported the same way by
//! every command, styled when stderr is a terminal.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};
use jtabs_core::TabGroup;

/// Report writer for CLI commands.
pub(crate) struct Output {
    term: Term,
    done: Style,
    warn: Style,
    failed: Style,
    group: Style,
    active: Style,
    dim: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            failed: Style::new().red(),
            group: Style::new().cyan().bold(),
            active: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// A finished action (green).
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.done, msg);
    }

    /// A fatal command error (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.failed, msg);
    }

    /// Secondary detail (dim).
    pub(crate) fn muted(&self, msg: &str) {
        self.styled(&self.dim, msg);
    }

    /// Setup warnings of one page, each prefixed with the page path.
    pub(crate) fn page_warnings(&self, page: &Path, warnings: &[String]) {
        for warning in warnings {
            self.styled(&self.warn, &page_line(page, warning));
        }
    }

    /// A page that could not be processed.
    pub(crate) fn page_failure(&self, page: &Path, error: &dyn Display) {
        self.styled(&self.failed, &page_line(page, error));
    }

    /// A tab group: summary line, then one line per header with the active
    /// one marked.
    pub(crate) fn tab_group(&self, group: &TabGroup, code_blocks: usize) {
        self.styled(&self.group, &group_summary(group, code_blocks));
        for (position, line) in header_lines(group).iter().enumerate() {
            if position == group.active() {
                self.styled(&self.active, line);
            } else {
                self.line(line);
            }
        }
    }

    fn styled(&self, style: &Style, msg: &str) {
        self.line(&style.apply_to(msg).to_string());
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}

fn page_line(page: &Path, detail: &dyn Display) -> String {
    format!("{}: {detail}", page.display())
}

fn group_summary(group: &TabGroup, code_blocks: usize) -> String {
    format!(
        "{} ({} tabs, {} panels, {code_blocks} code blocks)",
        group.name(),
        group.headers().len(),
        group.panels().len()
    )
}

/// One line per header, the active one marked with `*`.
fn header_lines(group: &TabGroup) -> Vec<String> {
    group
        .headers()
        .iter()
        .enumerate()
        .map(|(position, header)| {
            let marker = if position == group.active() { '*' } else { ' ' };
            format!("  {marker} {}", header.label())
        })
        .collect()
}
