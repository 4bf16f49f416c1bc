//! CLI error handling

use std::fmt;

use sweeper_errors::UserFacingError;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or the log file could not be opened
    Config(sweeper_errors::ConfigError),
    /// Sweep error
    Ops(sweeper_errors::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => {
                write!(f, "Configuration error: {e}")?;
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if e.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Ops(e) => Some(e),
        }
    }
}

impl From<sweeper_errors::ConfigError> for CliError {
    fn from(e: sweeper_errors::ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<sweeper_errors::Error> for CliError {
    fn from(e: sweeper_errors::Error) -> Self {
        match e {
            sweeper_errors::Error::Config(e) => CliError::Config(e),
            other => CliError::Ops(other),
        }
    }
}
