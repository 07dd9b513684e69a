use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::core::ports::cache::DetailCache;
use crate::error::Error;

/// Process-local detail cache. Keys are `:`-separated segments
/// (`module:id:status:version`); a `*` in a pattern matches exactly one
/// segment.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>, Error> {
        self.entries.read().map_err(|_| Error::Cache("memory cache lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>, Error> {
        self.entries.write().map_err(|_| Error::Cache("memory cache lock poisoned".into()))
    }
}

fn key_matches(pattern: &str, key: &str) -> bool {
    let pattern: Vec<&str> = pattern.split(':').collect();
    let key: Vec<&str> = key.split(':').collect();
    pattern.len() == key.len() && pattern.iter().zip(&key).all(|(p, k)| *p == "*" || p == k)
}

/// Version segment, for picking the freshest of several matches.
fn key_version(key: &str) -> i64 {
    key.rsplit(':').next().and_then(|v| v.parse().ok()).unwrap_or(0)
}

#[async_trait]
impl DetailCache for MemoryCache {
    async fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        self.write()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn get_matching(&self, pattern: &str) -> Result<Option<String>, Error> {
        let entries = self.read()?;
        Ok(entries
            .iter()
            .filter(|(k, _)| key_matches(pattern, k))
            .max_by_key(|(k, _)| key_version(k))
            .map(|(_, v)| v.clone()))
    }

    async fn exists(&self, pattern: &str) -> Result<bool, Error> {
        Ok(self.read()?.keys().any(|k| key_matches(pattern, k)))
    }

    async fn delete_matching(&self, pattern: &str) -> Result<u64, Error> {
        let mut entries = self.write()?;
        let before = entries.len();
        entries.retain(|k, _| !key_matches(pattern, k));
        Ok((before - entries.len()) as u64)
    }

    async fn count(&self) -> Result<u64, Error> {
        Ok(self.read()?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_match_whole_segments() {
        assert!(key_matches("reading:x:*:*", "reading:x:complete:3"));
        assert!(key_matches("reading:x:*:3", "reading:x:uncomplete:3"));
        assert!(!key_matches("reading:x:*:3", "reading:x:uncomplete:31"));
        assert!(!key_matches("reading:*:*:*", "grammar:x:complete:1"));
        assert!(!key_matches("reading:x:*", "reading:x:complete:1"));
    }

    #[tokio::test]
    async fn get_matching_prefers_the_highest_version() {
        let cache = MemoryCache::new();
        cache.put("reading:x:uncomplete:1", "old").await.unwrap();
        cache.put("reading:x:complete:2", "new").await.unwrap();
        let got = cache.get_matching("reading:x:*:*").await.unwrap();
        assert_eq!(got.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn delete_matching_reports_the_count() {
        let cache = MemoryCache::new();
        cache.put("reading:x:uncomplete:1", "a").await.unwrap();
        cache.put("reading:y:uncomplete:1", "b").await.unwrap();
        cache.put("grammar:z:uncomplete:1", "c").await.unwrap();
        assert_eq!(cache.delete_matching("reading:*:*:*").await.unwrap(), 2);
        assert_eq!(cache.count().await.unwrap(), 1);
    }
}
