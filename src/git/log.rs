//! Commit discovery through the git command line
//!
//! Runs `git log -z --numstat` and `git rev-list` against a repository and
//! parses their output into [`Commit`] records.

use super::commit::{Commit, FileDiff};
use crate::error::{CacheError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Separates commits in `git log` output
const RECORD_SEP: char = '\x1e';

/// Separates header fields; NUL is taken by `-z` numstat output
const FIELD_SEP: char = '\x1f';

/// Header fields: hash, short hash, parents, author name, author email, date
const LOG_FORMAT: &str = "--pretty=format:%x1e%H%x1f%h%x1f%P%x1f%an%x1f%ae%x1f%aI";

fn git(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.arg("-C").arg(repo);
    cmd
}

fn run(mut cmd: Command, what: &str) -> Result<Output> {
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| CacheError::Git(format!("Failed to run git {}: {}", what, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CacheError::Git(format!(
            "git {} failed: {}",
            what,
            stderr.trim()
        )));
    }

    Ok(output)
}

/// Check if the path is inside a git repository
pub fn is_git_repo(repo: &Path) -> bool {
    git(repo)
        .args(["rev-parse", "--git-dir"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Get the root directory of the git repository containing `repo`
pub fn repo_root(repo: &Path) -> Result<PathBuf> {
    if !is_git_repo(repo) {
        return Err(CacheError::NotGitRepo(repo.display().to_string()));
    }

    let mut cmd = git(repo);
    cmd.args(["rev-parse", "--show-toplevel"]);
    let output = run(cmd, "rev-parse")?;

    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(root))
}

/// List the full hashes reachable from `revs`, newest first
pub fn rev_list(repo: &Path, revs: &[String]) -> Result<Vec<String>> {
    let mut cmd = git(repo);
    cmd.arg("rev-list").args(revs).arg("--");
    let output = run(cmd, "rev-list")?;

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect())
}

/// Parse every commit reachable from `revs` along with its diff stats
pub fn log_commits(repo: &Path, revs: &[String]) -> Result<Vec<Commit>> {
    let mut cmd = git(repo);
    cmd.args(["log", "-z", "--numstat", "--no-color", LOG_FORMAT])
        .args(revs)
        .arg("--");
    let output = run(cmd, "log")?;

    parse_log(&String::from_utf8_lossy(&output.stdout))
}

/// Parse `git log -z --numstat` output produced with [`LOG_FORMAT`]
pub fn parse_log(text: &str) -> Result<Vec<Commit>> {
    text.split(RECORD_SEP)
        .filter(|record| !record.trim_matches(is_padding).is_empty())
        .map(parse_record)
        .collect()
}

/// Newlines and NULs that git places between header and stats
fn is_padding(c: char) -> bool {
    c == '\n' || c == '\0'
}

fn parse_record(record: &str) -> Result<Commit> {
    let record = record.trim_start_matches(is_padding);
    let (header, stats) = match record.find(is_padding) {
        Some(idx) => (&record[..idx], &record[idx + 1..]),
        None => (record, ""),
    };

    let fields: Vec<&str> = header.split(FIELD_SEP).collect();
    let &[hash, short_hash, parents, author_name, author_email, date] = fields.as_slice() else {
        return Err(CacheError::Git(format!(
            "Malformed commit header: {:?}",
            header
        )));
    };

    Ok(Commit {
        hash: hash.to_string(),
        short_hash: short_hash.to_string(),
        is_merge: parents.split_whitespace().count() > 1,
        author_name: author_name.to_string(),
        author_email: author_email.to_string(),
        date: date.to_string(),
        file_diffs: parse_numstat(stats)?,
    })
}

/// Parse NUL-terminated numstat entries
///
/// A plain entry is `added<TAB>removed<TAB>path`. A rename leaves the path
/// empty and is followed by the old and new paths as separate fields. Paths
/// are verbatim; `-z` disables git's C-style quoting.
fn parse_numstat(stats: &str) -> Result<Vec<FileDiff>> {
    let mut fields = stats.split('\0');
    let mut diffs = Vec::new();

    while let Some(field) = fields.next() {
        let entry = field.trim_start_matches('\n');
        if entry.is_empty() {
            continue;
        }

        let mut parts = entry.splitn(3, '\t');
        let (Some(added), Some(removed), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(CacheError::Git(format!("Malformed numstat entry: {:?}", entry)));
        };

        let (path, move_dest) = if path.is_empty() {
            match (fields.next(), fields.next()) {
                (Some(from), Some(to)) => (from.to_string(), Some(to.to_string())),
                _ => {
                    return Err(CacheError::Git(format!(
                        "Truncated rename entry: {:?}",
                        entry
                    )))
                }
            }
        } else {
            (path.to_string(), None)
        };

        diffs.push(FileDiff {
            path,
            move_dest,
            lines_added: parse_count(added, entry)?,
            lines_removed: parse_count(removed, entry)?,
        });
    }

    Ok(diffs)
}

/// Binary files report `-` instead of a count
fn parse_count(field: &str, entry: &str) -> Result<u64> {
    if field == "-" {
        return Ok(0);
    }
    field
        .parse()
        .map_err(|_| CacheError::Git(format!("Malformed numstat entry: {:?}", entry)))
}
