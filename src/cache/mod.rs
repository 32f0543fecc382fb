//! Cache for commits that have already been diffed and parsed
//!
//! [`Cache`] wraps a single [`Backend`] and adds timing, debug logging and
//! error context around every lookup.

mod backend;
mod jsonl;
mod memory;
mod result;

pub use backend::Backend;
pub use jsonl::JsonlBackend;
pub use memory::MemoryBackend;
pub use result::{CacheResult, Commits};

use crate::error::{CacheError, Result};
use crate::git::Commit;
use std::time::Instant;
use tracing::debug;

/// Setting this to any non-empty value disables caching
pub const DISABLE_CACHE_ENV: &str = "GIT_WHO_DISABLE_CACHE";

/// Whether callers should use the cache at all
///
/// Re-reads the environment on every call.
pub fn is_caching_enabled() -> bool {
    std::env::var_os(DISABLE_CACHE_ENV).map_or(true, |v| v.is_empty())
}

/// Instrumented front end to a cache backend
pub struct Cache<B: Backend> {
    backend: B,
}

impl<B: Backend> Cache<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn name(&self) -> &str {
        self.backend.name()
    }

    /// Look up `revs` in the backend
    ///
    /// Backend failures are wrapped in [`CacheError::Retrieve`].
    pub fn get(&self, revs: &[String]) -> Result<CacheResult> {
        let start = Instant::now();

        let result = self.backend.get(revs).map_err(CacheError::retrieve)?;

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            hit = result.any_hits(),
            "cache get"
        );

        Ok(result)
    }

    /// Store `commits` in the backend
    pub fn add(&mut self, commits: &[Commit]) -> Result<()> {
        let start = Instant::now();

        self.backend.add(commits)?;

        debug!(duration_ms = start.elapsed().as_millis() as u64, "cache add");
        Ok(())
    }

    /// Drop everything the backend has stored
    pub fn clear(&mut self) -> Result<()> {
        self.backend.clear()?;

        debug!("cache clear");
        Ok(())
    }
}
