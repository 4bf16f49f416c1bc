//! Fixed names used when locating and overriding configuration

/// Configuration document read when no `--config` flag is given
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Environment variable that selects the configuration document
pub const CONFIG_ENV: &str = "SWEEPER_CONFIG";

/// Environment variable that overrides `log_file` from the document
pub const LOG_FILE_ENV: &str = "SWEEPER_LOG_FILE";

/// Action tag for removing qualifying files
pub const ACTION_DELETE: &str = "delete";

/// Action tag for relocating qualifying files under a target root
pub const ACTION_MOVE: &str = "move";
