use async_trait::async_trait;
use uuid::Uuid;

use crate::core::models::question::Module;
use crate::core::models::search::{SearchDocument, SearchQuery};
use crate::error::Error;

/// Denormalized document index, one document per root question, queryable by
/// filters and free text with pagination.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn upsert(&self, doc: SearchDocument) -> Result<(), Error>;
    async fn delete(&self, id: Uuid) -> Result<u64, Error>;
    async fn search(&self, module: Module, query: &SearchQuery) -> Result<(Vec<SearchDocument>, i64), Error>;
    async fn clear_module(&self, module: Module) -> Result<u64, Error>;
    async fn count(&self) -> Result<u64, Error>;
}
