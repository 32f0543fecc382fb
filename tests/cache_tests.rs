//! Integration tests for the cache wrapper and its backends

use git_who_cache::cache::{Backend, Cache, CacheResult, Commits, JsonlBackend, MemoryBackend};
use git_who_cache::{CacheError, Commit, FileDiff, Result};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn commit(hash: &str) -> Commit {
    Commit {
        hash: hash.to_string(),
        short_hash: hash.chars().take(7).collect(),
        is_merge: false,
        author_name: "Test User".to_string(),
        author_email: "test@example.com".to_string(),
        date: "2024-05-01T09:30:00+02:00".to_string(),
        file_diffs: vec![FileDiff {
            path: "README.md".to_string(),
            move_dest: None,
            lines_added: 12,
            lines_removed: 3,
        }],
    }
}

fn revs(hashes: &[&str]) -> Vec<String> {
    hashes.iter().map(|h| h.to_string()).collect()
}

/// Backend with a canned lookup outcome
struct Scripted {
    outcome: fn() -> Result<CacheResult>,
}

impl Backend for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn get(&self, _revs: &[String]) -> Result<CacheResult> {
        (self.outcome)()
    }

    fn add(&mut self, _commits: &[Commit]) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Run the add / get / clear / get sequence against any backend
fn exercise_lifecycle<B: Backend>(backend: B) {
    let mut cache = Cache::new(backend);

    let empty = cache.get(&revs(&["A"])).unwrap();
    assert!(!empty.any_hits());
    assert_eq!(empty.commits.count(), 0);

    cache.add(&[commit("A")]).unwrap();

    let result = cache.get(&revs(&["A"])).unwrap();
    assert_eq!(result.revs, revs(&["A"]));
    let commits: Vec<Result<Commit>> = result.commits.collect();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].as_ref().unwrap(), &commit("A"));

    cache.clear().unwrap();

    let result = cache.get(&revs(&["A"])).unwrap();
    assert!(result.revs.is_empty());
    assert!(!result.any_hits());
}

mod lifecycle {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_backend_lifecycle() {
        exercise_lifecycle(MemoryBackend::new());
    }

    #[test]
    fn test_jsonl_backend_lifecycle() {
        let temp = TempDir::new().unwrap();
        exercise_lifecycle(JsonlBackend::new(temp.path().join("cache.jsonl")));
    }

    #[test]
    fn test_boxed_backend_lifecycle() {
        let backend: Box<dyn Backend> = Box::new(MemoryBackend::new());
        exercise_lifecycle(backend);
    }

    #[test]
    fn test_jsonl_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cache.jsonl");

        let mut first = Cache::new(JsonlBackend::new(&path));
        first.add(&[commit("A"), commit("B")]).unwrap();
        drop(first);

        let second = Cache::new(JsonlBackend::new(&path));
        let result = second.get(&revs(&["B", "A", "C"])).unwrap();
        assert_eq!(result.revs, revs(&["A", "B"]));

        let hashes: Vec<String> = result.commits.map(|c| c.unwrap().hash).collect();
        assert_eq!(hashes, revs(&["A", "B"]));
    }

    #[test]
    fn test_readding_does_not_duplicate_hits() {
        let temp = TempDir::new().unwrap();
        let mut cache = Cache::new(JsonlBackend::new(temp.path().join("cache.jsonl")));

        cache.add(&[commit("A")]).unwrap();
        cache.add(&[commit("A")]).unwrap();

        let result = cache.get(&revs(&["A"])).unwrap();
        assert_eq!(result.revs, revs(&["A"]));
        assert_eq!(result.commits.count(), 1);
    }
}

mod wrapper {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_wraps_backend_errors() {
        let cache = Cache::new(Scripted {
            outcome: || Err(CacheError::Git("disk on fire".to_string())),
        });

        let err = cache.get(&revs(&["A"])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("failed to retrieve from cache"), "{}", message);
        assert!(message.contains("disk on fire"), "{}", message);
    }

    #[test]
    fn test_get_returns_backend_result_unchanged() {
        let cache = Cache::new(Scripted {
            outcome: || {
                Ok(CacheResult::new(
                    revs(&["B", "A"]),
                    Commits::new(vec![
                        Ok(commit("B")),
                        Err(CacheError::Corrupt {
                            line: 4,
                            reason: "bad".to_string(),
                        }),
                    ]),
                ))
            },
        });

        let result = cache.get(&revs(&["A", "B"])).unwrap();
        assert_eq!(result.revs, revs(&["B", "A"]));

        let items: Vec<Result<Commit>> = result.commits.collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().hash, "B");
        assert!(matches!(items[1], Err(CacheError::Corrupt { line: 4, .. })));
    }

    #[test]
    fn test_get_accepts_empty_result() {
        let cache = Cache::new(Scripted {
            outcome: || Ok(CacheResult::empty()),
        });

        let result = cache.get(&revs(&["A"])).unwrap();
        assert!(!result.any_hits());
        assert_eq!(result.commits.count(), 0);
    }

    #[test]
    fn test_name_is_backend_name() {
        let cache = Cache::new(Scripted {
            outcome: || Ok(CacheResult::empty()),
        });
        assert_eq!(cache.name(), "scripted");

        let temp = TempDir::new().unwrap();
        let cache = Cache::new(JsonlBackend::new(temp.path().join("c.jsonl")));
        assert_eq!(cache.name(), "jsonl");
    }
}
