use uuid::Uuid;

use crate::core::models::question::Module;
use crate::core::models::sub_question::{Create as SubQuestionCreate, FieldUpdate, Insert as SubQuestionInsert, SubQuestion};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::{Store, SubQuestionStore};
use crate::core::ports::search::SearchIndex;
use crate::error::Error;

use super::question::get_scoped;
use super::resync;

pub async fn create_sub_question<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, data: SubQuestionCreate) -> Result<SubQuestion, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if data.content.trim().is_empty() {
        return Err(Error::InvalidInput("content must not be empty".into()));
    }
    let question = get_scoped(store, module, data.question_id).await?;
    if !question.type_.has_sub_question() {
        return Err(Error::InvalidInput(format!("{} questions do not take a sub-question", question.type_)));
    }
    if SubQuestionStore::get_by_question(store, question.id).await?.is_some() {
        return Err(Error::InvalidInput("question already has a sub-question".into()));
    }
    let sub = SubQuestionStore::insert(
        store,
        SubQuestionInsert {
            question_id: question.id,
            content: data.content,
            audio_url: data.audio_url,
        },
    )
    .await?;
    resync(store, cache, index, &question).await?;
    Ok(sub)
}

pub async fn sub_question_detail<S>(store: &mut S, module: Module, id: Uuid) -> Result<SubQuestion, Error>
where
    S: Store,
{
    let sub = SubQuestionStore::get(store, id).await?;
    get_scoped(store, module, sub.question_id).await?;
    Ok(sub)
}

pub async fn update_sub_question<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid, update: FieldUpdate) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if let FieldUpdate::Content(content) = &update {
        if content.trim().is_empty() {
            return Err(Error::InvalidInput("content must not be empty".into()));
        }
    }
    let mut sub = SubQuestionStore::get(store, id).await?;
    let question = get_scoped(store, module, sub.question_id).await?;
    sub.apply(update);
    SubQuestionStore::update(store, &sub).await?;
    resync(store, cache, index, &question).await
}

pub async fn delete_sub_question<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let sub = SubQuestionStore::get(store, id).await?;
    let question = get_scoped(store, module, sub.question_id).await?;
    SubQuestionStore::delete(store, id).await?;
    resync(store, cache, index, &question).await
}
