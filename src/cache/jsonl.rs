//! JSON Lines cache backend
//!
//! The cache file starts with a header line carrying the format version.
//! Every following line is one serialized [`Commit`]. Lookups only read each
//! line's hash up front; full commits are decoded as the caller consumes them.

use super::backend::Backend;
use super::result::{CacheResult, Commits};
use crate::error::{CacheError, Result};
use crate::git::Commit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Current cache format version
const CACHE_VERSION: u32 = 1;

/// First line of every cache file
#[derive(Debug, Serialize, Deserialize)]
struct Header {
    version: u32,
}

/// Just enough of a stored commit to index it
#[derive(Debug, Deserialize)]
struct EntryKey {
    hash: String,
}

/// A stored line that has been indexed but not decoded
struct RawEntry {
    hash: String,
    json: String,
}

/// Cache backend storing one commit per line in a single file
#[derive(Debug, Clone)]
pub struct JsonlBackend {
    path: PathBuf,
}

impl JsonlBackend {
    /// Create a backend over `path`; the file is created on first add
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and index every entry, skipping repeated hashes
    ///
    /// Returns an empty list when the cache file does not exist.
    fn read_entries(&self) -> Result<Vec<RawEntry>> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut lines = BufReader::new(file).lines();

        match lines.next() {
            Some(line) => check_header(&line?)?,
            None => return Ok(Vec::new()),
        }

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (idx, line) in lines.enumerate() {
            let json = line?;
            if json.trim().is_empty() {
                continue;
            }

            let key: EntryKey = serde_json::from_str(&json).map_err(|e| CacheError::Corrupt {
                line: idx + 2,
                reason: e.to_string(),
            })?;

            if seen.insert(key.hash.clone()) {
                entries.push(RawEntry {
                    hash: key.hash,
                    json,
                });
            }
        }

        Ok(entries)
    }

    /// Open the cache file for appending, writing a header if it is new
    fn open_for_append(&self) -> Result<BufWriter<File>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let is_new = fs::metadata(&self.path).map_or(true, |m| m.len() == 0);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);

        if is_new {
            serde_json::to_writer(
                &mut writer,
                &Header {
                    version: CACHE_VERSION,
                },
            )?;
            writer.write_all(b"\n")?;
        }

        Ok(writer)
    }
}

fn check_header(line: &str) -> Result<()> {
    let header: Header = serde_json::from_str(line).map_err(|e| CacheError::Corrupt {
        line: 1,
        reason: format!("invalid header: {}", e),
    })?;

    if header.version != CACHE_VERSION {
        return Err(CacheError::VersionMismatch {
            found: header.version,
            expected: CACHE_VERSION,
        });
    }

    Ok(())
}

impl Backend for JsonlBackend {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn get(&self, revs: &[String]) -> Result<CacheResult> {
        let wanted: HashSet<&str> = revs.iter().map(String::as_str).collect();

        let hits: Vec<RawEntry> = self
            .read_entries()?
            .into_iter()
            .filter(|e| wanted.contains(e.hash.as_str()))
            .collect();

        if hits.is_empty() {
            return Ok(CacheResult::empty());
        }

        let found = hits.iter().map(|e| e.hash.clone()).collect();
        let commits = Commits::new(
            hits.into_iter()
                .map(|e| serde_json::from_str::<Commit>(&e.json).map_err(CacheError::from)),
        );

        Ok(CacheResult::new(found, commits))
    }

    fn add(&mut self, commits: &[Commit]) -> Result<()> {
        let mut stored: HashSet<String> =
            self.read_entries()?.into_iter().map(|e| e.hash).collect();

        let fresh: Vec<&Commit> = commits
            .iter()
            .filter(|c| stored.insert(c.hash.clone()))
            .collect();

        if fresh.is_empty() {
            return Ok(());
        }

        let mut writer = self.open_for_append()?;
        for commit in fresh {
            serde_json::to_writer(&mut writer, commit)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
