use uuid::Uuid;

use crate::core::models::question::{Module, QuestionType};
use crate::core::models::true_false::{Create as TrueFalseCreate, FieldUpdate, Insert as TrueFalseInsert, TrueFalseItem};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::{Store, TrueFalseStore};
use crate::core::ports::search::SearchIndex;
use crate::error::Error;

use super::question::get_scoped;
use super::resync;

pub async fn create_item<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, data: TrueFalseCreate) -> Result<TrueFalseItem, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if data.statement.trim().is_empty() {
        return Err(Error::InvalidInput("statement must not be empty".into()));
    }
    let question = get_scoped(store, module, data.question_id).await?;
    if question.type_ != QuestionType::TrueFalse {
        return Err(Error::InvalidInput(format!("true/false items belong to true_false questions, not {}", question.type_)));
    }
    let item = TrueFalseStore::insert(
        store,
        TrueFalseInsert {
            question_id: question.id,
            statement: data.statement,
            answer: data.answer,
            explanation: data.explanation,
        },
    )
    .await?;
    resync(store, cache, index, &question).await?;
    Ok(item)
}

pub async fn item_detail<S>(store: &mut S, module: Module, id: Uuid) -> Result<TrueFalseItem, Error>
where
    S: Store,
{
    let item = TrueFalseStore::get(store, id).await?;
    get_scoped(store, module, item.question_id).await?;
    Ok(item)
}

pub async fn update_item<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid, update: FieldUpdate) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if let FieldUpdate::Statement(v) = &update {
        if v.trim().is_empty() {
            return Err(Error::InvalidInput("statement must not be empty".into()));
        }
    }
    let mut item = TrueFalseStore::get(store, id).await?;
    let question = get_scoped(store, module, item.question_id).await?;
    item.apply(update);
    TrueFalseStore::update(store, &item).await?;
    resync(store, cache, index, &question).await
}

pub async fn delete_item<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let item = TrueFalseStore::get(store, id).await?;
    let question = get_scoped(store, module, item.question_id).await?;
    TrueFalseStore::delete(store, id).await?;
    resync(store, cache, index, &question).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::detail::CompletionStatus;
    use crate::core::services::question::{create_question, question_detail};
    use crate::core::sync::detail_cache_key;
    use crate::impls::memory::cache::MemoryCache;
    use crate::impls::memory::search::MemorySearch;
    use crate::impls::memory::store::MemoryStore;
    use crate::test_util::{create_request, tf_create};

    #[tokio::test]
    async fn second_item_flips_the_cache_key_status() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let question = create_question(&mut store, &cache, &index, Module::Listening, create_request(QuestionType::TrueFalse))
            .await
            .unwrap();
        create_item(&mut store, &cache, &index, Module::Listening, tf_create(question.id, "a", true))
            .await
            .unwrap();
        assert!(cache
            .exists(&detail_cache_key(Module::Listening, question.id, CompletionStatus::Uncomplete, 1))
            .await
            .unwrap());

        create_item(&mut store, &cache, &index, Module::Listening, tf_create(question.id, "b", false))
            .await
            .unwrap();
        assert!(cache
            .exists(&detail_cache_key(Module::Listening, question.id, CompletionStatus::Complete, 1))
            .await
            .unwrap());
        let detail = question_detail(&mut store, &cache, Module::Listening, question.id).await.unwrap();
        assert!(detail.complete);
    }

    #[tokio::test]
    async fn items_reject_foreign_question_types() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let question = create_question(&mut store, &cache, &index, Module::Listening, create_request(QuestionType::Matching))
            .await
            .unwrap();
        let err = create_item(&mut store, &cache, &index, Module::Listening, tf_create(question.id, "a", true))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
