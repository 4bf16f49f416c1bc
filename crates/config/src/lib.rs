#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for sweeper
//!
//! This crate loads the sweep configuration from a JSON document:
//! - Configuration file (`config.json` unless overridden)
//! - Environment variables (`SWEEPER_LOG_FILE`)
//!
//! The document is decoded into raw records first and then validated into
//! typed [`Location`] values, so an unknown action or a move without a target
//! is rejected before any file is touched.

pub mod constants;
pub mod location;

pub use constants::{CONFIG_ENV, DEFAULT_CONFIG_FILE, LOG_FILE_ENV};
pub use location::{Action, Location, RawLocation};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use sweeper_errors::{ConfigError, Error};
use tokio::fs;

/// Configuration document as written on disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawConfig {
    #[serde(default)]
    pub locations: Vec<RawLocation>,
    #[serde(default)]
    pub log_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Locations in the order they are swept
    pub locations: Vec<Location>,
    /// Destination of the sweep log
    pub log_file: PathBuf,
    /// Non-fatal findings from validation, reported once logging is up
    pub warnings: Vec<String>,
}

impl Config {
    /// Parse and validate a configuration document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON of the expected
    /// shape or if any location fails validation.
    pub fn from_json_str(contents: &str) -> Result<Self, Error> {
        let raw: RawConfig = serde_json::from_str(contents)?;
        Self::try_from(raw).map_err(Into::into)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if its contents do not
    /// parse and validate.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::ReadFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Self::from_json_str(&contents)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        // SWEEPER_LOG_FILE
        if let Ok(log_file) = std::env::var(LOG_FILE_ENV) {
            if !log_file.trim().is_empty() {
                self.log_file = PathBuf::from(log_file);
            }
        }
    }

    /// Check settings that may still be filled in after loading
    ///
    /// # Errors
    ///
    /// Returns an error if no log destination is configured.
    pub fn validate(&self) -> Result<(), Error> {
        if self.log_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "log_file".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let mut warnings = Vec::new();
        let locations = raw
            .locations
            .into_iter()
            .enumerate()
            .map(|(index, location)| location.into_location(index, &mut warnings))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            locations,
            log_file: PathBuf::from(raw.log_file),
            warnings,
        })
    }
}

impl From<&Config> for RawConfig {
    fn from(config: &Config) -> Self {
        Self {
            locations: config.locations.iter().map(RawLocation::from).collect(),
            log_file: config.log_file.display().to_string(),
        }
    }
}
