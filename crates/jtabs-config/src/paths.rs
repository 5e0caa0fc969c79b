//! Shell-style expansion of `[site]` directory settings.

use std::env::VarError;
use std::ffi::OsString;

use crate::ConfigError;

/// Expand a site directory as a shell would.
///
/// A leading `~` becomes the home directory. `$VAR`, `${VAR}` and
/// `${VAR:-default}` are read from the environment; an unset variable
/// without a default is an error naming `field`.
pub(crate) fn expand_dir(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full_with_context(
        value,
        || home_dir().map(|h| h.to_string_lossy().into_owned()),
        |var| std::env::var(var).map(Some),
    )
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| match e.cause {
        VarError::NotPresent => ConfigError::EnvVar {
            field: field.to_owned(),
            var: e.var_name,
        },
        VarError::NotUnicode(_) => {
            ConfigError::Validation(format!("{field}: ${} is not valid UTF-8", e.var_name))
        }
    })
}

fn home_dir() -> Option<OsString> {
    std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))
}
