//! Git integration module
//!
//! Provides the commit record type stored by the cache and the `git log`
//! runner that produces those records from a repository.

mod commit;
mod log;

pub use commit::{Commit, FileDiff};
pub use log::{is_git_repo, log_commits, parse_log, repo_root, rev_list};
