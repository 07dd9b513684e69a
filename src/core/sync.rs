use uuid::Uuid;

use crate::core::aggregate::load_detail;
use crate::core::completion::status_of;
use crate::core::models::detail::{CompletionStatus, QuestionDetail};
use crate::core::models::question::{Module, Question};
use crate::core::models::search::SearchDocument;
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::Store;
use crate::core::ports::search::SearchIndex;
use crate::error::Error;

/// Which of the two projection writes succeeded. The relational write is
/// already committed by the time this is produced; callers decide whether a
/// partial failure is hard or logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub cache_ok: bool,
    pub search_ok: bool,
}

impl SyncReport {
    pub fn fully_synced(&self) -> bool {
        self.cache_ok && self.search_ok
    }
}

pub fn detail_cache_key(module: Module, id: Uuid, status: CompletionStatus, version: i64) -> String {
    format!("{}:{}:{}:{}", module, id, status, version)
}

/// Matches every key of one question, any status, any version.
pub fn question_key_pattern(module: Module, id: Uuid) -> String {
    format!("{}:{}:*:*", module, id)
}

/// Matches keys of one question at one exact version, any status.
pub fn version_key_pattern(module: Module, id: Uuid, version: i64) -> String {
    format!("{}:{}:*:{}", module, id, version)
}

/// Matches every key of a module.
pub fn module_key_pattern(module: Module) -> String {
    format!("{}:*:*:*", module)
}

/// Rebuilds the aggregate for `question` and republishes it to the cache and
/// the search index. Must run after every successful mutation of the root or
/// any of its sub-entities, always with the root. A load failure is a hard
/// error; projection write failures are reported, not propagated.
pub async fn sync_projections<S, C, X>(store: &mut S, cache: &C, index: &X, question: &Question) -> Result<SyncReport, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let mut detail = load_detail(store, question.clone()).await?;
    let status = status_of(&detail);
    detail.complete = status == CompletionStatus::Complete;
    let (cache_ok, search_ok) = futures::join!(repopulate_cache(cache, &detail, status), upsert_search(index, &detail, status));
    Ok(SyncReport { cache_ok, search_ok })
}

/// Replaces whatever the cache holds for this question with the given detail.
/// Old keys are removed first so exactly one `module:{id}:{status}:{version}`
/// key survives per question.
pub async fn repopulate_cache<C>(cache: &C, detail: &QuestionDetail, status: CompletionStatus) -> bool
where
    C: DetailCache + ?Sized,
{
    let q = &detail.question;
    let payload = match serde_json::to_string(detail) {
        Ok(p) => p,
        Err(e) => {
            log::error!("failed to serialize detail for question {}: {}", q.id, e);
            return false;
        }
    };
    if let Err(e) = cache.delete_matching(&question_key_pattern(q.module, q.id)).await {
        log::warn!("failed to drop stale cache keys for question {}: {}", q.id, e);
    }
    let key = detail_cache_key(q.module, q.id, status, q.version);
    match cache.put(&key, &payload).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("failed to cache detail under {}: {}", key, e);
            false
        }
    }
}

async fn upsert_search<X>(index: &X, detail: &QuestionDetail, status: CompletionStatus) -> bool
where
    X: SearchIndex + ?Sized,
{
    let doc = SearchDocument::from_detail(detail, status);
    match index.upsert(doc).await {
        Ok(()) => true,
        Err(e) => {
            log::error!("failed to index question {}: {}", detail.question.id, e);
            false
        }
    }
}
