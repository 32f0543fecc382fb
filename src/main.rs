//! git-who-cache - manage the cache of parsed git commits
//!
//! Adds commits to the per-repository cache, reports which commits are
//! cached, and clears or describes the cache.

use clap::Parser;
use git_who_cache::cache::{
    is_caching_enabled, Cache, CacheResult, JsonlBackend, DISABLE_CACHE_ENV,
};
use git_who_cache::cli::Cli;
use git_who_cache::config::{Action, Config};
use git_who_cache::error::Result;
use git_who_cache::git::{self, Commit};
use git_who_cache::logging;
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use std::process::ExitCode;
use tracing::info;

/// JSON report printed by `get`
#[derive(Debug, Serialize)]
struct GetReport<'a> {
    backend: &'a str,
    revs: Vec<String>,
    commits: Vec<Commit>,
    misses: Vec<String>,
}

fn main() -> ExitCode {
    // Parse command line arguments
    let cli = Cli::parse();

    // Convert to config
    let config = match cli.into_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    logging::init(config.verbose);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let repo_root = git::repo_root(&config.repo)?;
    let cache_file = config.cache_file(&repo_root);
    let mut cache = Cache::new(JsonlBackend::new(&cache_file));

    match &config.action {
        Action::Info => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "backend: {}", cache.name())?;
            writeln!(stdout, "repository: {}", repo_root.display())?;
            writeln!(stdout, "cache file: {}", cache_file.display())?;
            writeln!(stdout, "enabled: {}", is_caching_enabled())?;
        }
        Action::Clear => {
            cache.clear()?;
            info!("Cleared cache at {}", cache_file.display());
        }
        Action::Add { revs } => {
            if !is_caching_enabled() {
                info!("Caching disabled by {}; nothing added", DISABLE_CACHE_ENV);
                return Ok(());
            }

            let commits = git::log_commits(&repo_root, revs)?;
            cache.add(&commits)?;
            let added: u64 = commits.iter().map(Commit::lines_added).sum();
            let removed: u64 = commits.iter().map(Commit::lines_removed).sum();
            info!(
                "Added {} commits (+{} -{}) to {}",
                commits.len(),
                added,
                removed,
                cache_file.display()
            );
        }
        Action::Get { revs } => {
            let wanted = git::rev_list(&repo_root, revs)?;

            let result = if is_caching_enabled() {
                cache.get(&wanted)?
            } else {
                info!("Caching disabled by {}", DISABLE_CACHE_ENV);
                CacheResult::empty()
            };

            let found: HashSet<&str> = result.revs.iter().map(String::as_str).collect();
            let misses = wanted
                .iter()
                .filter(|r| !found.contains(r.as_str()))
                .cloned()
                .collect();
            let report = GetReport {
                backend: cache.name(),
                revs: result.revs,
                commits: result.commits.collect::<Result<Vec<_>>>()?,
                misses,
            };

            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
