use async_trait::async_trait;

use crate::error::Error;

/// Key-value store of serialized aggregate details.
///
/// Keys follow `module:{id}:{status}:{version}`; patterns are the same shape
/// with `*` standing for one whole segment. Entries are derived, disposable
/// projections — a lost entry is repaired on the next read.
#[async_trait]
pub trait DetailCache: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<(), Error>;
    /// Returns the payload of the highest-versioned key matching `pattern`.
    async fn get_matching(&self, pattern: &str) -> Result<Option<String>, Error>;
    async fn exists(&self, pattern: &str) -> Result<bool, Error>;
    /// Deletes every key matching `pattern`, returning how many went away.
    async fn delete_matching(&self, pattern: &str) -> Result<u64, Error>;
    async fn count(&self) -> Result<u64, Error>;
}
