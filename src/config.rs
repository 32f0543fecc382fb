//! Configuration types for git-who-cache

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Directory name used under the user's cache directory
const CACHE_DIR_NAME: &str = "git-who";

/// Fallback when neither XDG_CACHE_HOME nor HOME is set
const LOCAL_CACHE_DIR: &str = ".git-who-cache";

/// FNV-1a 64-bit offset basis
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// What the binary should do with the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Parse commits reachable from the revisions and store them
    Add { revs: Vec<String> },
    /// Report which commits reachable from the revisions are cached
    Get { revs: Vec<String> },
    /// Remove every cached commit for the repository
    Clear,
    /// Print where the cache lives and whether it is enabled
    Info,
}

/// Configuration options for git-who-cache
#[derive(Debug, Clone)]
pub struct Config {
    /// Path inside the git repository to operate on
    pub repo: PathBuf,

    /// Cache directory override (default: per-user cache directory)
    pub cache_dir: Option<PathBuf>,

    /// Emit debug-level logs
    pub verbose: bool,

    pub action: Action,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            cache_dir: None,
            verbose: false,
            action: Action::Info,
        }
    }
}

impl Config {
    /// Directory holding cache files, honoring the override if present
    pub fn effective_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            default_cache_dir(
                std::env::var_os("XDG_CACHE_HOME"),
                std::env::var_os("HOME"),
            )
        })
    }

    /// Cache file for the repository rooted at `repo_root`
    ///
    /// Each repository gets its own file, named after a stable hash of its
    /// root path so that the name stays valid on every platform.
    pub fn cache_file(&self, repo_root: &Path) -> PathBuf {
        let key = fnv1a_hash(repo_root.to_string_lossy().as_bytes());
        self.effective_cache_dir()
            .join(format!("{:016x}.jsonl", key))
    }
}

/// Resolve the per-user cache directory from XDG_CACHE_HOME and HOME
pub fn default_cache_dir(xdg_cache_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    if let Some(xdg) = xdg_cache_home.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(CACHE_DIR_NAME);
    }

    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".cache").join(CACHE_DIR_NAME);
    }

    PathBuf::from(LOCAL_CACHE_DIR)
}

/// FNV-1a 64-bit hash, stable across runs and toolchains
fn fnv1a_hash(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
