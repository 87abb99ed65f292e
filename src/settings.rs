//! Settings for the date utilities
//!
//! Defaults are embedded from `settings/defaults.toml` and parsed once into
//! a process-wide value. Callers can build their own from TOML.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{DATE_SERIAL_NUMBER_CUTOFF, DateFormat};

/// First day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO-8601 weeks
    #[default]
    Monday,
    /// Week 1 is the week containing January 1st
    Sunday,
}

/// Tunables shared by the lite and calendar layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Serial day counts below this are plain numbers.
    pub number_cutoff: i64,
    pub week_start: WeekStart,
    pub default_format: DateFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            number_cutoff: DATE_SERIAL_NUMBER_CUTOFF,
            week_start: WeekStart::Monday,
            default_format: DateFormat::YyyyMmDd,
        }
    }
}

static GLOBAL_SETTINGS: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Parse settings from a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a TOML settings file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Process-wide settings, parsed from the embedded defaults on first use.
    pub fn global() -> &'static Settings {
        GLOBAL_SETTINGS.get_or_init(|| {
            Self::from_toml_str(include_str!("settings/defaults.toml")).unwrap_or_else(|e| {
                log::error!("failed to load embedded default settings: {e}");
                Settings::default()
            })
        })
    }
}
