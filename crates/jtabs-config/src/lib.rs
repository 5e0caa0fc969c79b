//! Configuration management for jtabs.
//!
//! Parses `jtabs.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Site directory expansion
//!
//! `site.source_dir` and `site.output_dir` are expanded like shell words
//! before they are resolved against the config file's directory: a leading
//! `~` is the home directory, and `$VAR`, `${VAR}` and `${VAR:-default}`
//! come from the environment. An unset variable without a default is an
//! error.

mod paths;

use std::path::{Path, PathBuf};

use glob::Pattern;
use jtabs_core::TabsOptions;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override cross-group label sync.
    pub sync_tabs: Option<bool>,
    /// Override copy button injection.
    pub copy_button: Option<bool>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "jtabs.toml";

/// Default site directory, relative to the config file.
const DEFAULT_SOURCE_DIR: &str = "_site";

/// Default include pattern.
const DEFAULT_INCLUDE: &str = "**/*.html";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab behavior.
    pub tabs: TabsOptions,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    include: Option<Vec<String>>,
}

/// Resolved site configuration with absolute paths and compiled patterns.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Directory holding the generated HTML.
    pub source_dir: PathBuf,
    /// Directory receiving transformed pages. Equal to `source_dir` for
    /// in-place processing.
    pub output_dir: PathBuf,
    /// Patterns selecting pages, relative to `source_dir`.
    pub include: Vec<Pattern>,
}

impl SiteConfig {
    /// Whether a path relative to `source_dir` is a page to process.
    pub fn is_included(&self, rel_path: &Path) -> bool {
        self.include.iter().any(|p| p.matches_path(rel_path))
    }

    /// Whether output overwrites the source files.
    pub fn in_place(&self) -> bool {
        self.source_dir == self.output_dir
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// A site directory references an unset environment variable.
    #[error("{field}: environment variable ${var} is not set")]
    EnvVar {
        /// Config field path, e.g. `site.source_dir`.
        field: String,
        /// Name of the unset variable.
        var: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `jtabs.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            // An in-place site stays in place when only the source moves.
            if self.site_resolved.in_place() && settings.output_dir.is_none() {
                self.site_resolved.output_dir.clone_from(source_dir);
            }
            self.site_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(sync) = settings.sync_tabs {
            self.tabs.sync_tabs_with_same_labels = sync;
        }
        if let Some(copy_button) = settings.copy_button {
            self.tabs.add_copy_to_clipboard_button = copy_button;
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let source_dir = base.join(DEFAULT_SOURCE_DIR);
        Self {
            tabs: TabsOptions::default(),
            site: SiteConfigRaw::default(),
            site_resolved: SiteConfig {
                output_dir: source_dir.clone(),
                source_dir,
                include: default_include(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI settings
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tabs.add_copy_to_clipboard_button
            && self.tabs.copy_to_clipboard_button_html.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "tabs.copy_to_clipboard_button_html cannot be empty when \
                 tabs.add_copy_to_clipboard_button is enabled"
                    .to_owned(),
            ));
        }

        if self.site_resolved.include.is_empty() {
            return Err(ConfigError::Validation(
                "site.include must contain at least one pattern".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand `~` and environment variables in the site directories.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.site.source_dir {
            self.site.source_dir = Some(paths::expand_dir(dir, "site.source_dir")?);
        }
        if let Some(ref dir) = self.site.output_dir {
            self.site.output_dir = Some(paths::expand_dir(dir, "site.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory and compile
    /// include patterns.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let source_dir = config_dir.join(
            self.site
                .source_dir
                .as_deref()
                .unwrap_or(DEFAULT_SOURCE_DIR),
        );
        let output_dir = self
            .site
            .output_dir
            .as_deref()
            .map_or_else(|| source_dir.clone(), |dir| config_dir.join(dir));

        let include = match &self.site.include {
            Some(patterns) => patterns
                .iter()
                .map(|p| {
                    Pattern::new(p).map_err(|e| {
                        ConfigError::Validation(format!(
                            "site.include pattern {p:?} is invalid: {e}"
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => default_include(),
        };

        self.site_resolved = SiteConfig {
            source_dir,
            output_dir,
            include,
        };

        Ok(())
    }
}

fn default_include() -> Vec<Pattern> {
    Pattern::new(DEFAULT_INCLUDE).into_iter().collect()
}

/// Search for a config file in `start` and its parents.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
