//! Command line interface definition

use clap::Parser;
use std::path::PathBuf;
use sweeper_config::{CONFIG_ENV, DEFAULT_CONFIG_FILE};

/// sweeper - Age-based file retention sweeper
#[derive(Parser, Debug)]
#[command(name = "sweeper")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Age-based file retention sweeper")]
#[command(
    long_about = "Walks every configured location once, deleting or relocating files \
                  whose modification time is older than the location's threshold."
)]
pub struct Cli {
    /// Configuration document to load
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = CONFIG_ENV,
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["sweeper", "-c", "/etc/sweeper.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/sweeper.json"));

        let cli = Cli::try_parse_from(["sweeper", "--config", "other.json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("other.json"));
    }
}
