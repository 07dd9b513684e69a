use uuid::Uuid;

use crate::core::models::answer::{Answer, Create as AnswerCreate, FieldUpdate, Insert as AnswerInsert};
use crate::core::models::question::{Module, QuestionType};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::{AnswerStore, Store, SubQuestionStore};
use crate::core::ports::search::SearchIndex;
use crate::error::Error;

use super::question::get_scoped;
use super::resync;

pub async fn create_answer<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, data: AnswerCreate) -> Result<Answer, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if data.content.trim().is_empty() {
        return Err(Error::InvalidInput("content must not be empty".into()));
    }
    let question = get_scoped(store, module, data.question_id).await?;
    if question.type_ != QuestionType::FillInBlank {
        return Err(Error::InvalidInput(format!("answers belong to fill_in_blank questions, not {}", question.type_)));
    }
    let sub = SubQuestionStore::get_by_question(store, question.id)
        .await?
        .ok_or_else(|| Error::InvalidInput("create the sub-question before its answers".into()))?;
    let answer = AnswerStore::insert(
        store,
        AnswerInsert {
            question_id: question.id,
            sub_question_id: sub.id,
            content: data.content,
            explanation: data.explanation,
        },
    )
    .await?;
    resync(store, cache, index, &question).await?;
    Ok(answer)
}

pub async fn answer_detail<S>(store: &mut S, module: Module, id: Uuid) -> Result<Answer, Error>
where
    S: Store,
{
    let answer = AnswerStore::get(store, id).await?;
    get_scoped(store, module, answer.question_id).await?;
    Ok(answer)
}

pub async fn update_answer<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid, update: FieldUpdate) -> Result<(), Error>
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
    let mut answer = AnswerStore::get(store, id).await?;
    let question = get_scoped(store, module, answer.question_id).await?;
    answer.apply(update);
    AnswerStore::update(store, &answer).await?;
    resync(store, cache, index, &question).await
}

pub async fn delete_answer<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let answer = AnswerStore::get(store, id).await?;
    let question = get_scoped(store, module, answer.question_id).await?;
    AnswerStore::delete(store, id).await?;
    resync(store, cache, index, &question).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::question::question_detail;
    use crate::core::services::sub_question::create_sub_question;
    use crate::core::services::question::create_question;
    use crate::impls::memory::cache::MemoryCache;
    use crate::impls::memory::search::MemorySearch;
    use crate::impls::memory::store::MemoryStore;
    use crate::test_util::{answer_create, create_request, sub_create};

    #[tokio::test]
    async fn answers_require_the_sub_question_first() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let question = create_question(&mut store, &cache, &index, Module::Reading, create_request(QuestionType::FillInBlank))
            .await
            .unwrap();
        let err = create_answer(&mut store, &cache, &index, Module::Reading, answer_create(question.id, "cat"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn second_answer_completes_a_fill_in_blank() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let question = create_question(&mut store, &cache, &index, Module::Writing, create_request(QuestionType::FillInBlank))
            .await
            .unwrap();
        create_sub_question(&mut store, &cache, &index, Module::Writing, sub_create(question.id)).await.unwrap();
        create_answer(&mut store, &cache, &index, Module::Writing, answer_create(question.id, "cat")).await.unwrap();
        let detail = question_detail(&mut store, &cache, Module::Writing, question.id).await.unwrap();
        assert!(!detail.complete);

        create_answer(&mut store, &cache, &index, Module::Writing, answer_create(question.id, "cats")).await.unwrap();
        let detail = question_detail(&mut store, &cache, Module::Writing, question.id).await.unwrap();
        assert!(detail.complete);
        assert_eq!(detail.answers.len(), 2);
    }
}
