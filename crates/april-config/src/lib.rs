//! Configuration management for April.
//!
//! Parses `april.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Configuration is an explicit value threaded through the places that need
//! it (skeleton construction, asset copying). Every setting follows the same
//! override-then-fallback rule: a per-call override wins, then the loaded
//! config value, then a built-in default where one exists.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `assets.prefix`
//! - `assets.dest_dir`
//! - `templates.dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the asset URL prefix.
    pub asset_prefix: Option<String>,
    /// Override the asset destination directory.
    pub asset_dest_dir: Option<PathBuf>,
    /// Override the asset output directory name.
    pub asset_output_dir_name: Option<String>,
    /// Override the template directory.
    pub templates_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "april.toml";

/// Default name of the directory assets are copied into.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "assets";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Asset configuration (paths are relative strings from TOML).
    assets: AssetsConfigRaw,
    /// Template configuration (paths are relative strings from TOML).
    templates: TemplatesConfigRaw,

    /// Resolved asset configuration (set after loading).
    #[serde(skip)]
    pub assets_resolved: AssetsConfig,
    /// Resolved template configuration (set after loading).
    #[serde(skip)]
    pub templates_resolved: TemplatesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw asset configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AssetsConfigRaw {
    dest_dir: Option<String>,
    output_dir_name: Option<String>,
    prefix: Option<String>,
}

/// Resolved asset defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsConfig {
    /// Directory assets are copied into by default.
    pub dest_dir: Option<PathBuf>,
    /// Name of the subdirectory created under the destination.
    pub output_dir_name: String,
    /// URL prefix under which pages reference the copied assets.
    pub prefix: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dest_dir: None,
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_owned(),
            prefix: None,
        }
    }
}

impl AssetsConfig {
    /// Asset defaults with only a prefix set.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::default()
        }
    }

    /// Resolve the asset prefix: the override if given, else the configured default.
    ///
    /// Trailing slashes are stripped so templates can append `/path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when neither an override nor a
    /// default prefix exists.
    pub fn resolve_prefix(&self, override_prefix: Option<&str>) -> Result<String, ConfigError> {
        let prefix = override_prefix
            .or(self.prefix.as_deref())
            .ok_or_else(|| {
                ConfigError::Validation(
                    "asset prefix is required: pass one explicitly or set assets.prefix".to_owned(),
                )
            })?;
        Ok(prefix.trim_end_matches('/').to_owned())
    }

    /// Resolve the asset destination directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when neither an override nor a
    /// default destination exists.
    pub fn resolve_dest_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.dest_dir.clone())
            .ok_or_else(|| {
                ConfigError::Validation(
                    "asset destination is required: pass one explicitly or set assets.dest_dir"
                        .to_owned(),
                )
            })
    }

    /// Resolve the output directory name, falling back to the configured one.
    #[must_use]
    pub fn resolve_output_dir_name<'a>(&'a self, override_name: Option<&'a str>) -> &'a str {
        override_name.unwrap_or(&self.output_dir_name)
    }
}

/// Raw template configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    dir: Option<String>,
}

/// Resolved template configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TemplatesConfig {
    /// Directory of `*.html` templates overriding the built-in ones.
    pub dir: Option<PathBuf>,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`assets.prefix`").
        field: String,
        /// Error message (e.g., "${`CDN_HOST`} is not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `april.toml` in current directory and parents,
    /// and uses built-in defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(prefix) = &settings.asset_prefix {
            self.assets_resolved.prefix = Some(prefix.clone());
        }
        if let Some(dest_dir) = &settings.asset_dest_dir {
            self.assets_resolved.dest_dir = Some(dest_dir.clone());
        }
        if let Some(name) = &settings.asset_output_dir_name {
            self.assets_resolved.output_dir_name.clone_from(name);
        }
        if let Some(dir) = &settings.templates_dir {
            self.templates_resolved.dir = Some(dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let assets = &self.assets_resolved;
        if let Some(prefix) = &assets.prefix {
            require_non_empty(prefix, "assets.prefix")?;
        }
        require_non_empty(&assets.output_dir_name, "assets.output_dir_name")?;
        if assets.output_dir_name.contains(['/', '\\']) || assets.output_dir_name == ".." {
            return Err(ConfigError::Validation(
                "assets.output_dir_name must be a single directory name".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref prefix) = self.assets.prefix {
            self.assets.prefix = Some(expand::expand_env(prefix, "assets.prefix")?);
        }
        if let Some(ref dest_dir) = self.assets.dest_dir {
            self.assets.dest_dir = Some(expand::expand_env(dest_dir, "assets.dest_dir")?);
        }
        if let Some(ref dir) = self.templates.dir {
            self.templates.dir = Some(expand::expand_env(dir, "templates.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.assets_resolved = AssetsConfig {
            dest_dir: self.assets.dest_dir.as_deref().map(|d| config_dir.join(d)),
            output_dir_name: self
                .assets
                .output_dir_name
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR_NAME.to_owned()),
            prefix: self.assets.prefix.clone(),
        };
        self.templates_resolved = TemplatesConfig {
            dir: self.templates.dir.as_deref().map(|d| config_dir.join(d)),
        };
    }
}
