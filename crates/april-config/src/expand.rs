//! Environment references in `april.toml` values.
//!
//! `assets.prefix`, `assets.dest_dir` and `templates.dir` may name
//! environment variables, so one config file can serve a local preview and a
//! CDN deploy:
//!
//! ```toml
//! [assets]
//! prefix = "https://${APRIL_CDN_HOST:-localhost:8000}/static"
//! ```

use std::env::VarError;

use crate::ConfigError;

/// Substitute `${NAME}` and `${NAME:-fallback}` in `value`.
///
/// A reference without a fallback fails if the variable is unset or not
/// unicode; the error names the config `field`. Only the braced form is
/// recognized, so `$` in URLs passes through.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name| std::env::var(name).map(Some))
        .map_err(|e| {
            let problem = match e.cause {
                VarError::NotPresent => "is not set",
                VarError::NotUnicode(_) => "is not valid unicode",
            };
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} {problem}", e.var_name),
            }
        })?;
    Ok(expanded.into_owned())
}
