//! Lookup results returned by cache backends

use crate::error::Result;
use crate::git::Commit;
use std::fmt;

/// A lazily produced sequence of decoded commits
///
/// Each element pairs a commit with the error encountered while decoding it.
/// The sequence is single-pass. It always exists: a lookup with no hits
/// carries an empty sequence rather than no sequence at all.
pub struct Commits {
    inner: Box<dyn Iterator<Item = Result<Commit>> + Send>,
}

impl Commits {
    /// Wrap any iterator of decode results
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Result<Commit>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: Box::new(iter.into_iter()),
        }
    }

    /// Wrap commits that are already decoded and cannot fail
    pub fn without_errors<I>(commits: I) -> Self
    where
        I: IntoIterator<Item = Commit>,
        I::IntoIter: Send + 'static,
    {
        Self::new(commits.into_iter().map(Ok))
    }

    /// An immediately exhausted sequence
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl Default for Commits {
    fn default() -> Self {
        Self::empty()
    }
}

impl Iterator for Commits {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl fmt::Debug for Commits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commits").finish_non_exhaustive()
    }
}

/// Outcome of a cache lookup
#[derive(Debug, Default)]
pub struct CacheResult {
    /// Hashes of the requested commits that were found, in backend order
    pub revs: Vec<String>,
    /// Decoded commits, aligned with `revs`
    pub commits: Commits,
}

impl CacheResult {
    pub fn new(revs: Vec<String>, commits: Commits) -> Self {
        Self { revs, commits }
    }

    /// The zero-hit result
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if any requested revision was found
    pub fn any_hits(&self) -> bool {
        !self.revs.is_empty()
    }
}
