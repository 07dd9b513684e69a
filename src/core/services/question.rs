use uuid::Uuid;

use crate::core::aggregate::load_detail;
use crate::core::completion::status_of;
use crate::core::models::detail::{CompletionStatus, QuestionDetail};
use crate::core::models::question::{Create as QuestionCreate, FieldUpdate, Insert as QuestionInsert, Module, Question, VersionCheck};
use crate::core::models::search::{SearchDocument, SearchQuery};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::{QuestionStore, Store};
use crate::core::ports::search::SearchIndex;
use crate::core::sync::{module_key_pattern, question_key_pattern, repopulate_cache, sync_projections, version_key_pattern};
use crate::error::Error;

pub async fn create_question<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, data: QuestionCreate) -> Result<Question, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if data.title.trim().is_empty() {
        return Err(Error::InvalidInput("title must not be empty".into()));
    }
    if data.max_time < 0 {
        return Err(Error::InvalidInput("max_time must not be negative".into()));
    }
    let question = QuestionStore::insert(
        store,
        QuestionInsert {
            module,
            type_: data.type_,
            topics: data.topics,
            instruction: data.instruction,
            title: data.title,
            passages: data.passages,
            image_urls: data.image_urls,
            max_time: data.max_time,
        },
    )
    .await?;
    // create is all-or-nothing: a projection failure fails the whole call
    let report = sync_projections(store, cache, index, &question).await?;
    if !report.fully_synced() {
        return Err(Error::Internal(format!(
            "failed to publish projections for new question {} (cache_ok={}, search_ok={})",
            question.id, report.cache_ok, report.search_ok
        )));
    }
    Ok(question)
}

/// Cache-first detail read. A miss loads from the relational store,
/// reassembles the aggregate and repopulates the cache best-effort.
pub async fn question_detail<S, C>(store: &mut S, cache: &C, module: Module, id: Uuid) -> Result<QuestionDetail, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
{
    match cache.get_matching(&question_key_pattern(module, id)).await {
        Ok(Some(payload)) => match serde_json::from_str(&payload) {
            Ok(detail) => return Ok(detail),
            Err(e) => log::warn!("discarding undecodable cache entry for question {}: {}", id, e),
        },
        Ok(None) => {}
        Err(e) => log::warn!("cache read failed for question {}, falling back to store: {}", id, e),
    }
    let question = get_scoped(store, module, id).await?;
    let mut detail = load_detail(store, question).await?;
    let status = status_of(&detail);
    detail.complete = status == CompletionStatus::Complete;
    repopulate_cache(cache, &detail, status).await;
    Ok(detail)
}

pub async fn update_question_field<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid, update: FieldUpdate) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if !module.allows(&update) {
        return Err(Error::InvalidInput(format!("field {} is not updatable for {} questions", update.name(), module)));
    }
    let mut question = get_scoped(store, module, id).await?;
    question.apply(update);
    question.version += 1;
    question.updated_at = chrono::Utc::now();
    QuestionStore::update(store, &question).await?;
    super::resync(store, cache, index, &question).await
}

/// Hard delete; relational rows cascade. Cache and search cleanup is
/// best-effort and never fails the call.
pub async fn delete_question<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let question = get_scoped(store, module, id).await?;
    QuestionStore::delete(store, question.id).await?;
    if let Err(e) = cache.delete_matching(&question_key_pattern(module, id)).await {
        log::warn!("failed to drop cache keys for deleted question {}: {}", id, e);
    }
    if let Err(e) = index.delete(id).await {
        log::warn!("failed to drop search document for deleted question {}: {}", id, e);
    }
    Ok(())
}

/// Returns the details of every checked question whose cache holds no entry
/// at the requested version — the coarse "presumed changed" staleness check.
/// Ids that no longer exist are skipped.
pub async fn new_updates<S, C>(store: &mut S, cache: &C, module: Module, checks: Vec<VersionCheck>) -> Result<Vec<QuestionDetail>, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
{
    let mut changed = Vec::new();
    for check in checks {
        let current = cache.exists(&version_key_pattern(module, check.id, check.version)).await.unwrap_or_else(|e| {
            log::warn!("cache check failed for question {}: {}", check.id, e);
            false
        });
        if current {
            continue;
        }
        match question_detail(store, cache, module, check.id).await {
            Ok(detail) => changed.push(detail),
            Err(Error::NotFound(_)) => log::debug!("update check skipping question {}: gone", check.id),
            Err(e) => return Err(e),
        }
    }
    Ok(changed)
}

pub async fn questions_by_ids<S, C>(store: &mut S, cache: &C, module: Module, ids: Vec<Uuid>) -> Result<Vec<QuestionDetail>, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
{
    let mut details = Vec::with_capacity(ids.len());
    for id in ids {
        match question_detail(store, cache, module, id).await {
            Ok(detail) => details.push(detail),
            Err(Error::NotFound(_)) => log::debug!("batch fetch skipping question {}: gone", id),
            Err(e) => return Err(e),
        }
    }
    Ok(details)
}

pub async fn search_questions<X>(index: &X, module: Module, query: SearchQuery) -> Result<(Vec<SearchDocument>, i64), Error>
where
    X: SearchIndex + ?Sized,
{
    if query.page < 1 {
        return Err(Error::InvalidInput("page must be at least 1".into()));
    }
    if query.limit < 1 {
        return Err(Error::InvalidInput("limit must be at least 1".into()));
    }
    index.search(module, &query).await
}

/// Wipes every question of a module from all three stores. Projections are
/// best-effort, matching delete.
pub async fn purge_module<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module) -> Result<u64, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let deleted = QuestionStore::delete_by_module(store, module).await?;
    if let Err(e) = cache.delete_matching(&module_key_pattern(module)).await {
        log::warn!("failed to clear cache for module {}: {}", module, e);
    }
    if let Err(e) = index.clear_module(module).await {
        log::warn!("failed to clear search index for module {}: {}", module, e);
    }
    Ok(deleted)
}

/// Fetches a root and pins it to the module of the request path; a question
/// reached through the wrong module scope is simply not found.
pub(crate) async fn get_scoped<S>(store: &mut S, module: Module, id: Uuid) -> Result<Question, Error>
where
    S: Store,
{
    let question = QuestionStore::get(store, id).await?;
    if question.module != module {
        return Err(Error::not_found("question"));
    }
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::question::QuestionType;
    use crate::core::sync::detail_cache_key;
    use crate::impls::memory::cache::MemoryCache;
    use crate::impls::memory::search::MemorySearch;
    use crate::impls::memory::store::MemoryStore;
    use crate::test_util::create_request;

    fn world() -> (MemoryStore, MemoryCache, MemorySearch) {
        (MemoryStore::new(), MemoryCache::new(), MemorySearch::new())
    }

    #[tokio::test]
    async fn create_then_detail_is_empty_and_uncomplete() {
        let (mut store, cache, index) = world();
        let question = create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::ChoiceOne))
            .await
            .unwrap();
        assert_eq!(question.version, 1);

        let detail = question_detail(&mut store, &cache, Module::Reading, question.id).await.unwrap();
        assert!(detail.sub_question.is_none());
        assert!(detail.options.is_empty());
        assert!(!detail.complete);
    }

    #[tokio::test]
    async fn create_rejects_blank_title() {
        let (mut store, cache, index) = world();
        let mut data = create_request(QuestionType::Matching);
        data.title = "  ".into();
        let err = create_question(&mut store, &cache, &index, Module::Writing, data).await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn detail_is_served_from_cache_after_population() {
        let (mut store, cache, index) = world();
        let question = create_question(&mut store, &cache, &index, Module::Grammar, create_request(QuestionType::TrueFalse))
            .await
            .unwrap();
        // wipe the relational row behind the cache's back; the cached copy
        // must still answer
        QuestionStore::delete(&mut store, question.id).await.unwrap();
        let detail = question_detail(&mut store, &cache, Module::Grammar, question.id).await.unwrap();
        assert_eq!(detail.question.id, question.id);
    }

    #[tokio::test]
    async fn update_field_bumps_version_and_resyncs() {
        let (mut store, cache, index) = world();
        let question = create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::Matching))
            .await
            .unwrap();
        update_question_field(&mut store, &cache, &index, Module::Reading, question.id, FieldUpdate::Title("tides".into()))
            .await
            .unwrap();

        let stored = QuestionStore::get(&mut store, question.id).await.unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(stored.title, "tides");
        assert!(cache
            .exists(&detail_cache_key(Module::Reading, question.id, CompletionStatus::Uncomplete, 2))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn disallowed_field_leaves_question_untouched() {
        let (mut store, cache, index) = world();
        let question = create_question(&mut store, &cache, &index, Module::Grammar, create_request(QuestionType::ChoiceOne))
            .await
            .unwrap();
        let err = update_question_field(
            &mut store,
            &cache,
            &index,
            Module::Grammar,
            question.id,
            FieldUpdate::Passages(vec!["p".into()]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        let stored = QuestionStore::get(&mut store, question.id).await.unwrap();
        assert_eq!(stored.version, 1);
        assert!(stored.passages.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_row_and_cache_keys() {
        let (mut store, cache, index) = world();
        let question = create_question(&mut store, &cache, &index, Module::Speaking, create_request(QuestionType::TrueFalse))
            .await
            .unwrap();
        delete_question(&mut store, &cache, &index, Module::Speaking, question.id).await.unwrap();

        let err = question_detail(&mut store, &cache, Module::Speaking, question.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(cache.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn module_scope_hides_foreign_questions() {
        let (mut store, cache, index) = world();
        let question = create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::Matching))
            .await
            .unwrap();
        let err = question_detail(&mut store, &cache, Module::Grammar, question.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn new_updates_reports_only_stale_versions() {
        let (mut store, cache, index) = world();
        let question = create_question(&mut store, &cache, &index, Module::Listening, create_request(QuestionType::TrueFalse))
            .await
            .unwrap();
        // cached at v1, client at v1: nothing to report
        let checks = vec![VersionCheck { id: question.id, version: 1 }];
        let changed = new_updates(&mut store, &cache, Module::Listening, checks.clone()).await.unwrap();
        assert!(changed.is_empty());

        // bump to v2; the v1 cache key is replaced, so a v1 check reports
        update_question_field(&mut store, &cache, &index, Module::Listening, question.id, FieldUpdate::Title("waves".into()))
            .await
            .unwrap();
        let changed = new_updates(&mut store, &cache, Module::Listening, checks).await.unwrap();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].question.version, 2);
    }

    #[tokio::test]
    async fn purge_clears_all_three_stores_for_the_module() {
        let (mut store, cache, index) = world();
        create_question(&mut store, &cache, &index, Module::Writing, create_request(QuestionType::Matching))
            .await
            .unwrap();
        let kept = create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::Matching))
            .await
            .unwrap();

        let deleted = purge_module(&mut store, &cache, &index, Module::Writing).await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(cache.count().await.unwrap(), 1);
        assert_eq!(index.count().await.unwrap(), 1);
        assert!(question_detail(&mut store, &cache, Module::Reading, kept.id).await.is_ok());
    }

    #[tokio::test]
    async fn search_finds_by_title_filter() {
        let (mut store, cache, index) = world();
        let mut data = create_request(QuestionType::TrueFalse);
        data.title = "volcanoes and magma".into();
        create_question(&mut store, &cache, &index, Module::Reading, data).await.unwrap();
        create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::Matching))
            .await
            .unwrap();

        let query = SearchQuery {
            title: Some("volcano".into()),
            ..SearchQuery::default()
        };
        let (hits, total) = search_questions(&index, Module::Reading, query).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(hits[0].title, "volcanoes and magma");
    }
}
