use crate::core::models::detail::QuestionDetail;
use crate::core::models::question::{Question, QuestionType};
use crate::core::ports::repository::{AnswerStore, MatchingStore, OptionStore, Store, SubQuestionStore, TrueFalseStore};
use crate::error::Error;

/// Assembles the full detail for a root question by fanning out to the
/// repositories of its type. Reads only; `complete` is left for the caller
/// to evaluate.
pub async fn load_detail<S>(store: &mut S, question: Question) -> Result<QuestionDetail, Error>
where
    S: Store,
{
    let type_ = question.type_;
    let mut detail = QuestionDetail::new(question);
    match type_ {
        QuestionType::FillInBlank => {
            if let Some(sub) = SubQuestionStore::get_by_question(store, detail.question.id).await.map_err(|e| load_error(type_, e))? {
                detail.answers = AnswerStore::list_by_sub_question(store, sub.id).await.map_err(|e| load_error(type_, e))?;
                detail.sub_question = Some(sub);
            }
        }
        QuestionType::ChoiceOne | QuestionType::ChoiceMulti => {
            if let Some(sub) = SubQuestionStore::get_by_question(store, detail.question.id).await.map_err(|e| load_error(type_, e))? {
                detail.options = OptionStore::list_by_sub_question(store, sub.id).await.map_err(|e| load_error(type_, e))?;
                detail.sub_question = Some(sub);
            }
        }
        QuestionType::Matching => {
            detail.matching_pairs = MatchingStore::list_by_question(store, detail.question.id).await.map_err(|e| load_error(type_, e))?;
        }
        QuestionType::TrueFalse => {
            detail.true_false_items = TrueFalseStore::list_by_question(store, detail.question.id).await.map_err(|e| load_error(type_, e))?;
        }
    }
    Ok(detail)
}

fn load_error(type_: QuestionType, err: Error) -> Error {
    Error::Internal(format!("failed to load {} data: {}", type_, err))
}
