//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/apkdetails/apkdetails.toml`
//! 3. Local config: `./.apkdetails.toml` or an explicit `--config` file
//! 4. Environment variables: `APKDETAILS_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;

/// Largest accepted indent unit for the class tree.
pub const MAX_INDENT_WIDTH: usize = 16;

/// Unified configuration for apkdetails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory receiving `<apk stem>/` report folders
    pub output_dir: PathBuf,
    /// Spaces per depth level in the class tree
    pub indent_width: usize,
    /// Label of the synthetic root node in GraphML output
    pub graph_root_label: String,
    /// Archive entry copied into the manifest report
    pub manifest_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("apkdetails-out"),
            indent_width: crate::render::DEFAULT_INDENT,
            graph_root_label: "root".into(),
            manifest_name: "AndroidManifest.xml".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output_dir: Option<PathBuf>,
    pub indent_width: Option<usize>,
    pub graph_root_label: Option<String>,
    pub manifest_name: Option<String>,
}

/// Get the XDG config directory for apkdetails.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "apkdetails").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("apkdetails.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".apkdetails.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            indent_width: overlay.indent_width.unwrap_or(self.indent_width),
            graph_root_label: overlay
                .graph_root_label
                .clone()
                .unwrap_or_else(|| self.graph_root_label.clone()),
            manifest_name: overlay
                .manifest_name
                .clone()
                .unwrap_or_else(|| self.manifest_name.clone()),
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the output directory.
    ///
    /// An undefined variable is a config error rather than a literal path.
    fn expand_paths(&mut self) -> Result<(), ApplicationError> {
        let raw = self.output_dir.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw).map_err(|e| ApplicationError::Config {
            message: format!("output_dir {:?}: {}", raw, e),
        })?;
        self.output_dir = PathBuf::from(expanded.into_owned());
        Ok(())
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.indent_width == 0 || self.indent_width > MAX_INDENT_WIDTH {
            return Err(ApplicationError::Config {
                message: format!(
                    "indent_width must be between 1 and {}, got {}",
                    MAX_INDENT_WIDTH, self.indent_width
                ),
            });
        }
        if self.manifest_name.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "manifest_name must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Explicit local config file; `None` looks for
    ///   `./.apkdetails.toml` in the working directory
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        let local = match local {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .map(|dir| local_config_path(&dir))
                .filter(|p| p.exists()),
        };
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load from explicit global and local files, then apply env overrides.
    #[instrument(level = "debug")]
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            current = current.merge_with(&load_raw_settings(path)?);
            debug!(path = %path.display(), "applied global config");
        }

        // 3. Local config
        if let Some(path) = local {
            current = current.merge_with(&load_raw_settings(path)?);
            debug!(path = %path.display(), "applied local config");
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths()?;
        current.validate()?;
        Ok(current)
    }

    /// Apply APKDETAILS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("APKDETAILS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_int("indent_width") {
            settings.indent_width = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("APKDETAILS_INDENT_WIDTH out of range: {}", val),
            })?;
        }
        if let Ok(val) = config.get_string("graph_root_label") {
            settings.graph_root_label = val;
        }
        if let Ok(val) = config.get_string("manifest_name") {
            settings.manifest_name = val;
        }

        Ok(settings)
    }

    /// Serialize the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
