//! git-who-cache - memoization of parsed git commits
//!
//! Stores the diff stats of commits that have already been parsed so that
//! later runs can skip `git log` for them. Storage is pluggable through the
//! [`cache::Backend`] trait; [`cache::Cache`] adds timing and logging on top.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;

pub use cache::{is_caching_enabled, Backend, Cache, CacheResult, Commits};
pub use error::{CacheError, Result};
pub use git::{Commit, FileDiff};
