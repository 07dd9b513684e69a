use uuid::Uuid;

use crate::core::models::option::{ChoiceOption, Create as OptionCreate, FieldUpdate, Insert as OptionInsert};
use crate::core::models::question::{Module, QuestionType};
use crate::core::ports::cache::DetailCache;
use crate::core::ports::repository::{OptionStore, Store, SubQuestionStore};
use crate::core::ports::search::SearchIndex;
use crate::error::Error;

use super::question::get_scoped;
use super::resync;

pub async fn create_option<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, data: OptionCreate) -> Result<ChoiceOption, Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    if data.content.trim().is_empty() {
        return Err(Error::InvalidInput("content must not be empty".into()));
    }
    let question = get_scoped(store, module, data.question_id).await?;
    if !question.type_.is_choice() {
        return Err(Error::InvalidInput(format!("options belong to choice questions, not {}", question.type_)));
    }
    let sub = SubQuestionStore::get_by_question(store, question.id)
        .await?
        .ok_or_else(|| Error::InvalidInput("create the sub-question before its options".into()))?;
    let option = OptionStore::insert(
        store,
        OptionInsert {
            question_id: question.id,
            sub_question_id: sub.id,
            content: data.content,
            is_correct: data.is_correct,
            explanation: data.explanation,
        },
    )
    .await?;
    // choice_one keeps exactly one correct option: marking this one correct
    // unmarks every sibling in the same operation
    if question.type_ == QuestionType::ChoiceOne && option.is_correct {
        OptionStore::clear_correct_except(store, sub.id, option.id).await?;
    }
    resync(store, cache, index, &question).await?;
    Ok(option)
}

pub async fn option_detail<S>(store: &mut S, module: Module, id: Uuid) -> Result<ChoiceOption, Error>
where
    S: Store,
{
    let option = OptionStore::get(store, id).await?;
    get_scoped(store, module, option.question_id).await?;
    Ok(option)
}

pub async fn update_option<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid, update: FieldUpdate) -> Result<(), Error>
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
    let mut option = OptionStore::get(store, id).await?;
    let question = get_scoped(store, module, option.question_id).await?;
    option.apply(update);
    OptionStore::update(store, &option).await?;
    if question.type_ == QuestionType::ChoiceOne && option.is_correct {
        OptionStore::clear_correct_except(store, option.sub_question_id, option.id).await?;
    }
    resync(store, cache, index, &question).await
}

pub async fn delete_option<S, C, X>(store: &mut S, cache: &C, index: &X, module: Module, id: Uuid) -> Result<(), Error>
where
    S: Store,
    C: DetailCache + ?Sized,
    X: SearchIndex + ?Sized,
{
    let option = OptionStore::get(store, id).await?;
    let question = get_scoped(store, module, option.question_id).await?;
    OptionStore::delete(store, id).await?;
    resync(store, cache, index, &question).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::question::{create_question, question_detail};
    use crate::core::services::sub_question::create_sub_question;
    use crate::impls::memory::cache::MemoryCache;
    use crate::impls::memory::search::MemorySearch;
    use crate::impls::memory::store::MemoryStore;
    use crate::test_util::{create_request, option_create, sub_create};

    async fn choice_question(store: &mut MemoryStore, cache: &MemoryCache, index: &MemorySearch, type_: QuestionType) -> Uuid {
        let question = create_question(store, cache, index, Module::Grammar, create_request(type_)).await.unwrap();
        create_sub_question(store, cache, index, Module::Grammar, sub_create(question.id)).await.unwrap();
        question.id
    }

    #[tokio::test]
    async fn second_correct_option_flips_the_first() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let qid = choice_question(&mut store, &cache, &index, QuestionType::ChoiceOne).await;

        let first = create_option(&mut store, &cache, &index, Module::Grammar, option_create(qid, "a", true))
            .await
            .unwrap();
        let second = create_option(&mut store, &cache, &index, Module::Grammar, option_create(qid, "b", true))
            .await
            .unwrap();

        let detail = question_detail(&mut store, &cache, Module::Grammar, qid).await.unwrap();
        let correct: Vec<_> = detail.options.iter().filter(|o| o.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].id, second.id);
        assert!(detail.options.iter().any(|o| o.id == first.id && !o.is_correct));
    }

    #[tokio::test]
    async fn choice_multi_keeps_several_correct_options() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let qid = choice_question(&mut store, &cache, &index, QuestionType::ChoiceMulti).await;

        create_option(&mut store, &cache, &index, Module::Grammar, option_create(qid, "a", true)).await.unwrap();
        create_option(&mut store, &cache, &index, Module::Grammar, option_create(qid, "b", true)).await.unwrap();
        create_option(&mut store, &cache, &index, Module::Grammar, option_create(qid, "c", false)).await.unwrap();

        let detail = question_detail(&mut store, &cache, Module::Grammar, qid).await.unwrap();
        assert_eq!(detail.options.iter().filter(|o| o.is_correct).count(), 2);
        assert!(detail.complete);
    }

    #[tokio::test]
    async fn options_reject_non_choice_questions() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let question = create_question(&mut store, &cache, &index, Module::Grammar, create_request(QuestionType::TrueFalse))
            .await
            .unwrap();
        let err = create_option(&mut store, &cache, &index, Module::Grammar, option_create(question.id, "a", false))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn marking_correct_via_update_also_flips_siblings() {
        let mut store = MemoryStore::new();
        let (cache, index) = (MemoryCache::new(), MemorySearch::new());
        let qid = choice_question(&mut store, &cache, &index, QuestionType::ChoiceOne).await;
        let first = create_option(&mut store, &cache, &index, Module::Grammar, option_create(qid, "a", true))
            .await
            .unwrap();
        let second = create_option(&mut store, &cache, &index, Module::Grammar, option_create(qid, "b", false))
            .await
            .unwrap();

        update_option(&mut store, &cache, &index, Module::Grammar, second.id, FieldUpdate::IsCorrect(true))
            .await
            .unwrap();
        let detail = question_detail(&mut store, &cache, Module::Grammar, qid).await.unwrap();
        assert!(detail.options.iter().any(|o| o.id == second.id && o.is_correct));
        assert!(detail.options.iter().any(|o| o.id == first.id && !o.is_correct));
    }
}
