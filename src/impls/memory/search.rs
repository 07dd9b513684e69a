use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use itertools::Itertools;
use uuid::Uuid;

use crate::core::models::question::Module;
use crate::core::models::search::{SearchDocument, SearchQuery};
use crate::core::ports::search::SearchIndex;
use crate::error::Error;

/// Process-local search index: linear filters over the document set, good
/// enough for the catalog sizes this backend serves.
#[derive(Debug, Default)]
pub struct MemorySearch {
    docs: RwLock<HashMap<Uuid, SearchDocument>>,
}

impl MemorySearch {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, SearchDocument>>, Error> {
        self.docs.read().map_err(|_| Error::Search("memory index lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, SearchDocument>>, Error> {
        self.docs.write().map_err(|_| Error::Search("memory index lock poisoned".into()))
    }
}

fn matches(doc: &SearchDocument, module: Module, query: &SearchQuery) -> bool {
    if doc.module != module {
        return false;
    }
    if let Some(type_) = query.type_ {
        if doc.type_ != type_ {
            return false;
        }
    }
    if let Some(topic) = &query.topic {
        if !doc.topics.iter().any(|t| t.eq_ignore_ascii_case(topic)) {
            return false;
        }
    }
    if let Some(instruction) = &query.instruction {
        if !contains_ci(&doc.instruction, instruction) {
            return false;
        }
    }
    if let Some(title) = &query.title {
        if !contains_ci(&doc.title, title) {
            return false;
        }
    }
    if let Some(text) = &query.text {
        let hit = contains_ci(&doc.title, text)
            || contains_ci(&doc.instruction, text)
            || contains_ci(&doc.text, text)
            || doc.topics.iter().any(|t| contains_ci(t, text));
        if !hit {
            return false;
        }
    }
    true
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl SearchIndex for MemorySearch {
    async fn upsert(&self, doc: SearchDocument) -> Result<(), Error> {
        self.write()?.insert(doc.id, doc);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, Error> {
        Ok(self.write()?.remove(&id).map(|_| 1).unwrap_or(0))
    }

    async fn search(&self, module: Module, query: &SearchQuery) -> Result<(Vec<SearchDocument>, i64), Error> {
        let docs = self.read()?;
        let hits: Vec<SearchDocument> = docs
            .values()
            .filter(|d| matches(d, module, query))
            .cloned()
            .sorted_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)))
            .collect();
        let total = hits.len() as i64;
        let page = hits
            .into_iter()
            .skip(((query.page - 1) * query.limit) as usize)
            .take(query.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn clear_module(&self, module: Module) -> Result<u64, Error> {
        let mut docs = self.write()?;
        let before = docs.len();
        docs.retain(|_, d| d.module != module);
        Ok((before - docs.len()) as u64)
    }

    async fn count(&self) -> Result<u64, Error> {
        Ok(self.read()?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::detail::CompletionStatus;
    use crate::core::models::question::QuestionType;

    fn doc(module: Module, title: &str, topics: &[&str]) -> SearchDocument {
        SearchDocument {
            id: Uuid::new_v4(),
            module,
            type_: QuestionType::Matching,
            topics: topics.iter().map(|s| s.to_string()).collect(),
            instruction: "match the words".into(),
            title: title.into(),
            status: CompletionStatus::Uncomplete,
            version: 1,
            text: String::new(),
        }
    }

    #[tokio::test]
    async fn filters_are_conjunctive_and_scoped_to_the_module() {
        let index = MemorySearch::new();
        index.upsert(doc(Module::Reading, "tides", &["sea"])).await.unwrap();
        index.upsert(doc(Module::Reading, "volcanoes", &["fire"])).await.unwrap();
        index.upsert(doc(Module::Grammar, "tides again", &["sea"])).await.unwrap();

        let query = SearchQuery {
            topic: Some("sea".into()),
            title: Some("tide".into()),
            ..SearchQuery::default()
        };
        let (hits, total) = index.search(Module::Reading, &query).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(hits[0].title, "tides");
    }

    #[tokio::test]
    async fn pagination_slices_after_filtering() {
        let index = MemorySearch::new();
        for title in ["a", "b", "c", "d", "e"] {
            index.upsert(doc(Module::Writing, title, &[])).await.unwrap();
        }
        let query = SearchQuery {
            page: 2,
            limit: 2,
            ..SearchQuery::default()
        };
        let (hits, total) = index.search(Module::Writing, &query).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(hits.iter().map(|d| d.title.as_str()).collect::<Vec<_>>(), vec!["c", "d"]);
    }

    #[tokio::test]
    async fn upsert_replaces_the_existing_document() {
        let index = MemorySearch::new();
        let mut d = doc(Module::Speaking, "old", &[]);
        index.upsert(d.clone()).await.unwrap();
        d.title = "new".into();
        d.version = 2;
        index.upsert(d).await.unwrap();
        assert_eq!(index.count().await.unwrap(), 1);
        let (hits, _) = index.search(Module::Speaking, &SearchQuery::default()).await.unwrap();
        assert_eq!(hits[0].title, "new");
        assert_eq!(hits[0].version, 2);
    }
}
