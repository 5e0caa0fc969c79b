//! CLI error types.

use jtabs_config::ConfigError;
use jtabs_core::TabsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Tabs(#[from] TabsError),

    #[error("{failed} of {total} pages failed to build")]
    Build { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
