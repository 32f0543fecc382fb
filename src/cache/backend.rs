//! The storage contract behind [`Cache`](super::Cache)

use super::result::CacheResult;
use crate::error::Result;
use crate::git::Commit;

/// Pluggable storage for parsed commits, keyed by revision hash
///
/// Implementations decide the physical format. They must report each
/// stored revision at most once per lookup, and re-adding a commit that is
/// already stored must leave the store unchanged.
pub trait Backend {
    /// Stable label used in diagnostics
    fn name(&self) -> &str;

    /// Look up `revs`, reporting which are present and their commits
    ///
    /// The order of hits is up to the backend and need not match `revs`.
    fn get(&self, revs: &[String]) -> Result<CacheResult>;

    /// Persist `commits` so later lookups report them as hits
    fn add(&mut self, commits: &[Commit]) -> Result<()>;

    /// Remove every stored commit
    fn clear(&mut self) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, revs: &[String]) -> Result<CacheResult> {
        (**self).get(revs)
    }

    fn add(&mut self, commits: &[Commit]) -> Result<()> {
        (**self).add(commits)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
