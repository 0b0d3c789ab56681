use std::fs;
use std::path::Path;

use kea_form_core::{AddressFamily, DiffOptions};
use serde::Deserialize;
use thiserror::Error;

/// Settings read from a `--config` TOML file.
///
/// Command-line flags win over anything set here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Family for subnets whose prefix does not reveal one.
    pub family: Option<AddressFamily>,
    pub pretty: bool,
    pub strict: bool,
    pub diff: DiffSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSettings {
    /// Extra object keys skipped by the subnet diff.
    pub ignore_keys: Vec<String>,
    /// Also list values that did not change.
    pub show_identical: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            family: None,
            pretty: true,
            strict: false,
            diff: DiffSettings::default(),
        }
    }
}

impl Settings {
    /// Diff options with the configured keys added to the built-in ones.
    pub fn diff_options(&self) -> DiffOptions {
        let mut opts = DiffOptions {
            include_identical: self.diff.show_identical,
            ..DiffOptions::default()
        };
        for key in &self.diff.ignore_keys {
            if !opts.ignore_keys.contains(key) {
                opts.ignore_keys.push(key.clone());
            }
        }
        opts
    }
}

/// Errors returned when loading a settings file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_settings(&raw, path.display().to_string())
}

/// Built-in settings used when no file is given.
pub fn default_settings() -> Settings {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/settings/default.toml"));
    parse_settings(embedded, "embedded settings".to_string()).unwrap_or_default()
}

fn parse_settings(raw: &str, path: String) -> Result<Settings, ConfigLoadError> {
    toml::from_str(raw).map_err(|source| ConfigLoadError::Parse { path, source })
}
