//! Configuration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: String },

    #[error("failed to read config {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("invalid config: {message}")]
    Invalid { message: String },

    #[error("parse error: {message}")]
    ParseError { message: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("failed to open log file {path}: {message}")]
    LogFileUnavailable { path: String, message: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => {
                Some("Pass the configuration path with `--config` or create config.json.")
            }
            Self::ReadFailed { .. } => Some("Ensure the configuration file is readable."),
            Self::MissingField { field } if field.ends_with("target") => {
                Some("Locations with action \"move\" need a \"target\" directory.")
            }
            Self::MissingField { field } if field == "log_file" => {
                Some("Set \"log_file\" in the configuration or SWEEPER_LOG_FILE.")
            }
            Self::MissingField { .. } => {
                Some("Add the missing configuration field noted in the error message.")
            }
            Self::InvalidValue { field, .. } if field.ends_with("action") => {
                Some("Supported actions are \"delete\" and \"move\".")
            }
            Self::InvalidValue { .. } | Self::Invalid { .. } | Self::ParseError { .. } => {
                Some("Fix the configuration value and run the sweep again.")
            }
            Self::LogFileUnavailable { .. } => {
                Some("Ensure the log file's directory exists and is writable.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        false
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NotFound { .. } => "config.not_found",
            Self::ReadFailed { .. } => "config.read_failed",
            Self::Invalid { .. } => "config.invalid",
            Self::ParseError { .. } => "config.parse_error",
            Self::MissingField { .. } => "config.missing_field",
            Self::InvalidValue { .. } => "config.invalid_value",
            Self::LogFileUnavailable { .. } => "config.log_file_unavailable",
        })
    }
}
