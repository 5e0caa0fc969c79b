//! `jtabs build` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use jtabs_config::{CliSettings, Config, SiteConfig};
use jtabs_core::{TabPage, TabsError, TabsOptions};
use rayon::prelude::*;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// HTML file or site directory (default: site.source_dir from config).
    path: Option<PathBuf>,

    /// Output file or directory (default: overwrite in place).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Make tabs with this label active in every group. Repeatable; later
    /// labels win.
    #[arg(long, value_name = "LABEL")]
    select: Vec<String>,

    /// Sync tabs with the same label across groups (overrides config).
    #[arg(long)]
    sync: bool,

    /// Do not add copy buttons to code blocks (overrides config).
    #[arg(long)]
    no_copy_button: bool,

    /// Write the page to stdout instead of a file (single file only).
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Path to configuration file (default: auto-discover jtabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a single page cannot be
    /// built, or any page of a site build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        if let Some(path) = &self.path
            && !path.exists()
        {
            return Err(CliError::Validation(format!(
                "{} does not exist",
                path.display()
            )));
        }

        let single_file = self.path.as_deref().filter(|p| p.is_file());

        let cli_settings = CliSettings {
            source_dir: single_file.is_none().then(|| self.path.clone()).flatten(),
            output_dir: single_file.is_none().then(|| self.output.clone()).flatten(),
            sync_tabs: self.sync.then_some(true),
            copy_button: self.no_copy_button.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        match single_file {
            Some(file) => self.build_file(file, &config.tabs),
            None if self.stdout => Err(CliError::Validation(
                "--stdout requires a single HTML file".to_owned(),
            )),
            None => self.build_dir(&config.site_resolved, &config.tabs),
        }
    }

    fn build_file(&self, file: &Path, options: &TabsOptions) -> Result<(), CliError> {
        let output = Output::new();

        let html = std::fs::read_to_string(file)?;
        let built = transform(&html, options, &self.select)?;
        output.page_warnings(file, &built.warnings);

        if self.stdout {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(built.html.as_bytes())?;
            stdout.flush()?;
            return Ok(());
        }

        let dest = self.output.as_deref().unwrap_or(file);
        std::fs::write(dest, &built.html)?;
        output.success(&format!(
            "Built {} tab group(s) into {}",
            built.groups,
            dest.display()
        ));
        Ok(())
    }

    fn build_dir(&self, site: &SiteConfig, options: &TabsOptions) -> Result<(), CliError> {
        let output = Output::new();
        output.info(&format!("Source: {}", site.source_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));

        let report = build_site(site, options, &self.select)?;

        for page in &report.built {
            output.page_warnings(&page.rel_path, &page.warnings);
        }
        for failure in &report.failed {
            output.page_failure(&failure.rel_path, &failure.error);
        }

        let total = report.built.len() + report.failed.len();
        if !report.failed.is_empty() {
            return Err(CliError::Build {
                failed: report.failed.len(),
                total,
            });
        }

        let groups: usize = report.built.iter().map(|p| p.groups).sum();
        output.success(&format!("Built {total} page(s), {groups} tab group(s)"));
        Ok(())
    }
}

/// A page after tab processing.
struct BuiltPage {
    html: String,
    groups: usize,
    warnings: Vec<String>,
}

/// Run page setup on `html` and apply label selections.
fn transform(html: &str, options: &TabsOptions, select: &[String]) -> Result<BuiltPage, TabsError> {
    let mut page = TabPage::load(html, options.clone())?;
    for label in select {
        if page.select_label(label)?.is_empty() {
            tracing::debug!(label = %label, "No inactive tab with label");
        }
    }

    Ok(BuiltPage {
        html: page.to_html(),
        groups: page.groups().len(),
        warnings: page.warnings().to_vec(),
    })
}

/// Outcome for one successfully processed page.
#[derive(Debug)]
struct PageReport {
    rel_path: PathBuf,
    groups: usize,
    warnings: Vec<String>,
}

/// A page that could not be processed.
#[derive(Debug)]
struct PageFailure {
    rel_path: PathBuf,
    error: CliError,
}

/// Site build results, including partial failures.
#[derive(Debug, Default)]
struct SiteReport {
    built: Vec<PageReport>,
    failed: Vec<PageFailure>,
}

/// Process every included page of the site in parallel.
///
/// A failing page does not stop the others.
fn build_site(
    site: &SiteConfig,
    options: &TabsOptions,
    select: &[String],
) -> Result<SiteReport, CliError> {
    let pages = collect_pages(site)?;
    tracing::info!(count = pages.len(), "Building pages");

    let results: Vec<Result<PageReport, PageFailure>> = pages
        .into_par_iter()
        .map(|rel_path| match build_page(site, &rel_path, options, select) {
            Ok((groups, warnings)) => Ok(PageReport {
                rel_path,
                groups,
                warnings,
            }),
            Err(error) => Err(PageFailure { rel_path, error }),
        })
        .collect();

    let mut report = SiteReport::default();
    for result in results {
        match result {
            Ok(page) => report.built.push(page),
            Err(failure) => report.failed.push(failure),
        }
    }
    Ok(report)
}

/// Build one page. Pages without tab groups are copied unchanged, or left
/// alone when building in place.
fn build_page(
    site: &SiteConfig,
    rel_path: &Path,
    options: &TabsOptions,
    select: &[String],
) -> Result<(usize, Vec<String>), CliError> {
    let html = std::fs::read_to_string(site.source_dir.join(rel_path))?;
    let built = transform(&html, options, select)?;

    let contents = if built.groups == 0 {
        if site.in_place() {
            return Ok((0, built.warnings));
        }
        html
    } else {
        built.html
    };

    let dest = site.output_dir.join(rel_path);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&dest, contents)?;

    tracing::debug!(page = %rel_path.display(), groups = built.groups, "Built page");
    Ok((built.groups, built.warnings))
}

/// Included pages under the source directory, relative and sorted.
///
/// The output directory is skipped when it lies inside the source directory.
fn collect_pages(site: &SiteConfig) -> Result<Vec<PathBuf>, CliError> {
    let mut pages = Vec::new();
    let mut pending = vec![site.source_dir.clone()];

    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                if site.in_place() || path != site.output_dir {
                    pending.push(path);
                }
                continue;
            }
            let Ok(rel_path) = path.strip_prefix(&site.source_dir) else {
                continue;
            };
            if site.is_included(rel_path) {
                pages.push(rel_path.to_path_buf());
            }
        }
    }

    pages.sort();
    Ok(pages)
}
