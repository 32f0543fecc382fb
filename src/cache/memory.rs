//! In-process cache backend

use super::backend::Backend;
use super::result::{CacheResult, Commits};
use crate::error::Result;
use crate::git::Commit;
use std::collections::HashSet;
use std::sync::Arc;

/// Keeps commits in insertion order for the lifetime of the process
///
/// Lookups share the stored commits and copy each one only when the
/// caller pulls it from the sequence.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    commits: Vec<Arc<Commit>>,
    hashes: HashSet<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, revs: &[String]) -> Result<CacheResult> {
        let wanted: HashSet<&str> = revs.iter().map(String::as_str).collect();

        let hits: Vec<Arc<Commit>> = self
            .commits
            .iter()
            .filter(|c| wanted.contains(c.hash.as_str()))
            .map(Arc::clone)
            .collect();

        if hits.is_empty() {
            return Ok(CacheResult::empty());
        }

        let found = hits.iter().map(|c| c.hash.clone()).collect();
        let commits = hits.into_iter().map(|c| Commit::clone(&c));
        Ok(CacheResult::new(found, Commits::without_errors(commits)))
    }

    fn add(&mut self, commits: &[Commit]) -> Result<()> {
        for commit in commits {
            if self.hashes.insert(commit.hash.clone()) {
                self.commits.push(Arc::new(commit.clone()));
            }
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.commits.clear();
        self.hashes.clear();
        Ok(())
    }
}
