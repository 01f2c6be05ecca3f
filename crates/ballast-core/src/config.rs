//! Settings for hosts embedding the engine
//!
//! ## Configuration Resolution
//!
//! Settings are loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/ballast/config/settings.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! `BALLAST_AGE` overrides the age from either layer.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::insights::age::DEFAULT_RETIREMENT_AGE;

/// Embedded default settings (compiled into binary)
const DEFAULT_SETTINGS: &str = include_str!("../config/settings.toml");

/// Environment variable overriding the configured age
pub const AGE_ENV: &str = "BALLAST_AGE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub age: Option<u32>,
    pub retirement_age: u32,
    pub default_snapshot: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            age: None,
            retirement_age: DEFAULT_RETIREMENT_AGE,
            default_snapshot: None,
        }
    }
}

/// Raw settings as they appear in TOML (all optional)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSettings {
    age: Option<u32>,
    retirement_age: Option<u32>,
    default_snapshot: Option<PathBuf>,
}

/// Default settings override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("ballast").join("config").join("settings.toml"))
}

impl Settings {
    /// Load settings (override first, then embedded default), then apply `BALLAST_AGE`
    pub fn load() -> Result<Self> {
        let settings = match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::from_toml_str(DEFAULT_SETTINGS)?,
        };
        settings.with_env_age(std::env::var(AGE_ENV).ok().as_deref())
    }

    /// Load settings from an explicit file (no env override)
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded settings override");
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawSettings = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid settings TOML: {}", e)))?;

        let defaults = Self::default();
        Ok(Self {
            age: raw.age,
            retirement_age: raw.retirement_age.unwrap_or(defaults.retirement_age),
            default_snapshot: raw.default_snapshot,
        })
    }

    /// Embedded default settings
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_SETTINGS)
    }

    /// The embedded default file, for `config show` style output
    pub fn embedded_toml() -> &'static str {
        DEFAULT_SETTINGS
    }

    /// Apply an age from the environment, if set
    pub fn with_env_age(mut self, value: Option<&str>) -> Result<Self> {
        if let Some(value) = value {
            let age = value.trim().parse::<u32>().map_err(|_| {
                Error::Config(format!("{} must be a whole number, got {:?}", AGE_ENV, value))
            })?;
            self.age = Some(age);
        }
        Ok(self)
    }
}
