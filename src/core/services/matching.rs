use uuid::Uuid;

use crate::core::models::matching::{Create as MatchingCreate, FieldUpdate, Insert as MatchingInsert, MatchingPair};
use crate::core::models::question::{Module, QuestionType};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::{MatchingStore, Store};
use crate::core::ports::search::SearchIndex;
use crate::error::Error;

use super::question::get_scoped;
use super::resync;

pub async fn create_pair<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, data: MatchingCreate) -> Result<MatchingPair, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if data.left.trim().is_empty() || data.right.trim().is_empty() {
        return Err(Error::InvalidInput("both sides of a pair must be given".into()));
    }
    let question = get_scoped(store, module, data.question_id).await?;
    if question.type_ != QuestionType::Matching {
        return Err(Error::InvalidInput(format!("matching pairs belong to matching questions, not {}", question.type_)));
    }
    let pair = MatchingStore::insert(
        store,
        MatchingInsert {
            question_id: question.id,
            left: data.left,
            right: data.right,
            explanation: data.explanation,
        },
    )
    .await?;
    resync(store, cache, index, &question).await?;
    Ok(pair)
}

pub async fn pair_detail<S>(store: &mut S, module: Module, id: Uuid) -> Result<MatchingPair, Error>
where
    S: Store,
{
    let pair = MatchingStore::get(store, id).await?;
    get_scoped(store, module, pair.question_id).await?;
    Ok(pair)
}

pub async fn update_pair<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid, update: FieldUpdate) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    match &update {
        FieldUpdate::Left(v) | FieldUpdate::Right(v) if v.trim().is_empty() => {
            return Err(Error::InvalidInput("both sides of a pair must be given".into()));
        }
        _ => {}
    }
    let mut pair = MatchingStore::get(store, id).await?;
    let question = get_scoped(store, module, pair.question_id).await?;
    pair.apply(update);
    MatchingStore::update(store, &pair).await?;
    resync(store, cache, index, &question).await
}

pub async fn delete_pair<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let pair = MatchingStore::get(store, id).await?;
    let question = get_scoped(store, module, pair.question_id).await?;
    MatchingStore::delete(store, id).await?;
    resync(store, cache, index, &question).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::question::{create_question, question_detail};
    use crate::impls::memory::cache::MemoryCache;
    use crate::impls::memory::search::MemorySearch;
    use crate::impls::memory::store::MemoryStore;
    use crate::test_util::{create_request, pair_create};

    #[tokio::test]
    async fn first_pair_completes_a_matching_question() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let question = create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::Matching))
            .await
            .unwrap();
        create_pair(&mut store, &cache, &index, Module::Reading, pair_create(question.id, "hot", "cold"))
            .await
            .unwrap();
        let detail = question_detail(&mut store, &cache, Module::Reading, question.id).await.unwrap();
        assert!(detail.complete);
        assert_eq!(detail.matching_pairs.len(), 1);
    }

    #[tokio::test]
    async fn deleting_the_last_pair_uncompletes() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let question = create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::Matching))
            .await
            .unwrap();
        let pair = create_pair(&mut store, &cache, &index, Module::Reading, pair_create(question.id, "hot", "cold"))
            .await
            .unwrap();
        delete_pair(&mut store, &cache, &index, Module::Reading, pair.id).await.unwrap();
        let detail = question_detail(&mut store, &cache, Module::Reading, question.id).await.unwrap();
        assert!(!detail.complete);
        assert!(detail.matching_pairs.is_empty());
    }
}
