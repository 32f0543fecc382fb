//! CLI argument parsing using clap

use crate::config::{Action, Config};
use crate::error::{CacheError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and maintain the parsed-commit cache
#[derive(Parser, Debug)]
#[command(name = "git-who-cache")]
#[command(version)]
#[command(about = "Manage the cache of parsed git commits", long_about = None)]
pub struct Cli {
    /// Path inside the git repository to operate on
    #[arg(short = 'C', long = "repo", value_name = "PATH", default_value = ".")]
    pub repo: PathBuf,

    /// Directory for cache files (default: $XDG_CACHE_HOME/git-who)
    #[arg(long = "cache-dir", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Parse commits reachable from REVS and add them to the cache
    Add {
        /// Revisions to walk (default: HEAD)
        #[arg(value_name = "REVS")]
        revs: Vec<String>,
    },
    /// Print the cached commits reachable from REVS as JSON
    Get {
        /// Revisions to walk (default: HEAD)
        #[arg(value_name = "REVS")]
        revs: Vec<String>,
    },
    /// Remove all cached commits for the repository
    Clear,
    /// Show the cache backend, file and whether caching is enabled
    Info,
}

fn default_revs(revs: Vec<String>) -> Result<Vec<String>> {
    if revs.iter().any(|r| r.trim().is_empty()) {
        return Err(CacheError::InvalidConfig(
            "revisions must not be empty".to_string(),
        ));
    }

    if revs.is_empty() {
        Ok(vec!["HEAD".to_string()])
    } else {
        Ok(revs)
    }
}

impl Cli {
    /// Parse command line arguments into a Config
    pub fn into_config(self) -> Result<Config> {
        let action = match self.command {
            CliCommand::Add { revs } => Action::Add {
                revs: default_revs(revs)?,
            },
            CliCommand::Get { revs } => Action::Get {
                revs: default_revs(revs)?,
            },
            CliCommand::Clear => Action::Clear,
            CliCommand::Info => Action::Info,
        };

        Ok(Config {
            repo: self.repo,
            cache_dir: self.cache_dir,
            verbose: self.verbose,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["git-who-cache", "info"]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.repo, PathBuf::from("."));
        assert_eq!(config.cache_dir, None);
        assert!(!config.verbose);
        assert_eq!(config.action, Action::Info);
    }

    #[test]
    fn test_cli_revs_default_to_head() {
        let cli = Cli::parse_from(["git-who-cache", "add"]);
        let config = cli.into_config().unwrap();

        assert_eq!(
            config.action,
            Action::Add {
                revs: vec!["HEAD".to_string()]
            }
        );
    }

    #[test]
    fn test_cli_all_options() {
        let cli = Cli::parse_from([
            "git-who-cache",
            "-C",
            "/src/repo",
            "--cache-dir",
            "/tmp/cache",
            "-v",
            "get",
            "main",
            "feature~2",
        ]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.repo, PathBuf::from("/src/repo"));
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/cache")));
        assert!(config.verbose);
        assert_eq!(
            config.action,
            Action::Get {
                revs: vec!["main".to_string(), "feature~2".to_string()]
            }
        );
    }

    #[test]
    fn test_cli_clear() {
        let cli = Cli::parse_from(["git-who-cache", "clear"]);
        assert_eq!(cli.into_config().unwrap().action, Action::Clear);
    }

    #[test]
    fn test_cli_empty_revision() {
        let cli = Cli::parse_from(["git-who-cache", "get", "HEAD", ""]);
        let result = cli.into_config();

        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["git-who-cache"]).is_err());
    }
}
