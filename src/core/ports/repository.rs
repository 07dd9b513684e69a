use async_trait::async_trait;
use uuid::Uuid;

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert},
    matching::{Insert as MatchingInsert, MatchingPair},
    option::{ChoiceOption, Insert as OptionInsert},
    question::{Insert as QuestionInsert, Module, Question},
    sub_question::{Insert as SubQuestionInsert, SubQuestion},
    true_false::{Insert as TrueFalseInsert, TrueFalseItem},
};
use crate::error::Error;

#[async_trait]
pub trait QuestionStore {
    async fn insert(&mut self, data: QuestionInsert) -> Result<Question, Error>;
    async fn get(&mut self, id: Uuid) -> Result<Question, Error>;
    async fn query(&mut self, ids: &[Uuid]) -> Result<Vec<Question>, Error>;
    async fn update(&mut self, question: &Question) -> Result<(), Error>;
    async fn delete(&mut self, id: Uuid) -> Result<u64, Error>;
    async fn delete_by_module(&mut self, module: Module) -> Result<u64, Error>;
}

#[async_trait]
pub trait SubQuestionStore {
    async fn insert(&mut self, data: SubQuestionInsert) -> Result<SubQuestion, Error>;
    async fn get(&mut self, id: Uuid) -> Result<SubQuestion, Error>;
    async fn get_by_question(&mut self, question_id: Uuid) -> Result<Option<SubQuestion>, Error>;
    async fn update(&mut self, sub_question: &SubQuestion) -> Result<(), Error>;
    async fn delete(&mut self, id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
pub trait AnswerStore {
    async fn insert(&mut self, data: AnswerInsert) -> Result<Answer, Error>;
    async fn get(&mut self, id: Uuid) -> Result<Answer, Error>;
    async fn list_by_sub_question(&mut self, sub_question_id: Uuid) -> Result<Vec<Answer>, Error>;
    async fn update(&mut self, answer: &Answer) -> Result<(), Error>;
    async fn delete(&mut self, id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
pub trait OptionStore {
    async fn insert(&mut self, data: OptionInsert) -> Result<ChoiceOption, Error>;
    async fn get(&mut self, id: Uuid) -> Result<ChoiceOption, Error>;
    async fn list_by_sub_question(&mut self, sub_question_id: Uuid) -> Result<Vec<ChoiceOption>, Error>;
    async fn update(&mut self, option: &ChoiceOption) -> Result<(), Error>;
    async fn delete(&mut self, id: Uuid) -> Result<u64, Error>;
    /// Marks every sibling option except `keep` incorrect. Backs the
    /// choice_one at-most-one-correct rule.
    async fn clear_correct_except(&mut self, sub_question_id: Uuid, keep: Uuid) -> Result<u64, Error>;
}

#[async_trait]
pub trait MatchingStore {
    async fn insert(&mut self, data: MatchingInsert) -> Result<MatchingPair, Error>;
    async fn get(&mut self, id: Uuid) -> Result<MatchingPair, Error>;
    async fn list_by_question(&mut self, question_id: Uuid) -> Result<Vec<MatchingPair>, Error>;
    async fn update(&mut self, pair: &MatchingPair) -> Result<(), Error>;
    async fn delete(&mut self, id: Uuid) -> Result<u64, Error>;
}

#[async_trait]
pub trait TrueFalseStore {
    async fn insert(&mut self, data: TrueFalseInsert) -> Result<TrueFalseItem, Error>;
    async fn get(&mut self, id: Uuid) -> Result<TrueFalseItem, Error>;
    async fn list_by_question(&mut self, question_id: Uuid) -> Result<Vec<TrueFalseItem>, Error>;
    async fn update(&mut self, item: &TrueFalseItem) -> Result<(), Error>;
    async fn delete(&mut self, id: Uuid) -> Result<u64, Error>;
}

pub trait Store: QuestionStore + SubQuestionStore + AnswerStore + OptionStore + MatchingStore + TrueFalseStore + Send {}

impl<T> Store for T where T: QuestionStore + SubQuestionStore + AnswerStore + OptionStore + MatchingStore + TrueFalseStore + Send {}
