use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::models::{
    answer::{Answer, Insert as AnswerInsert},
    matching::{Insert as MatchingInsert, MatchingPair},
    option::{ChoiceOption, Insert as OptionInsert},
    question::{Insert as QuestionInsert, Module, Question},
    sub_question::{Insert as SubQuestionInsert, SubQuestion},
    true_false::{Insert as TrueFalseInsert, TrueFalseItem},
};
use crate::core::ports::repository::{AnswerStore, MatchingStore, OptionStore, QuestionStore, SubQuestionStore, TrueFalseStore};
use crate::error::Error;

#[derive(Debug, Default)]
struct Tables {
    questions: HashMap<Uuid, Question>,
    sub_questions: Vec<SubQuestion>,
    answers: Vec<Answer>,
    options: Vec<ChoiceOption>,
    matching_pairs: Vec<MatchingPair>,
    true_false_items: Vec<TrueFalseItem>,
}

/// Repository adapter backed by process memory. Drop-in replacement for the
/// Postgres adapter in tests and standalone runs; child rows keep insertion
/// order and deleting a question cascades like the relational schema does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, Error> {
        self.tables.read().map_err(|_| Error::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, Error> {
        self.tables.write().map_err(|_| Error::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn insert(&mut self, data: QuestionInsert) -> Result<Question, Error> {
        let now = Utc::now();
        let question = Question {
            id: Uuid::new_v4(),
            module: data.module,
            type_: data.type_,
            topics: data.topics,
            instruction: data.instruction,
            title: data.title,
            passages: data.passages,
            image_urls: data.image_urls,
            max_time: data.max_time,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        self.write()?.questions.insert(question.id, question.clone());
        Ok(question)
    }

    async fn get(&mut self, id: Uuid) -> Result<Question, Error> {
        self.read()?.questions.get(&id).cloned().ok_or_else(|| Error::not_found("question"))
    }

    async fn query(&mut self, ids: &[Uuid]) -> Result<Vec<Question>, Error> {
        let tables = self.read()?;
        Ok(ids.iter().filter_map(|id| tables.questions.get(id).cloned()).collect())
    }

    async fn update(&mut self, question: &Question) -> Result<(), Error> {
        let mut tables = self.write()?;
        match tables.questions.get_mut(&question.id) {
            Some(row) => {
                *row = question.clone();
                Ok(())
            }
            None => Err(Error::not_found("question")),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let mut tables = self.write()?;
        if tables.questions.remove(&id).is_none() {
            return Ok(0);
        }
        cascade(&mut tables, &[id]);
        Ok(1)
    }

    async fn delete_by_module(&mut self, module: Module) -> Result<u64, Error> {
        let mut tables = self.write()?;
        let ids: Vec<Uuid> = tables.questions.values().filter(|q| q.module == module).map(|q| q.id).collect();
        for id in &ids {
            tables.questions.remove(id);
        }
        cascade(&mut tables, &ids);
        Ok(ids.len() as u64)
    }
}

fn cascade(tables: &mut Tables, question_ids: &[Uuid]) {
    tables.sub_questions.retain(|s| !question_ids.contains(&s.question_id));
    tables.answers.retain(|a| !question_ids.contains(&a.question_id));
    tables.options.retain(|o| !question_ids.contains(&o.question_id));
    tables.matching_pairs.retain(|m| !question_ids.contains(&m.question_id));
    tables.true_false_items.retain(|t| !question_ids.contains(&t.question_id));
}

#[async_trait]
impl SubQuestionStore for MemoryStore {
    async fn insert(&mut self, data: SubQuestionInsert) -> Result<SubQuestion, Error> {
        let mut tables = self.write()?;
        // same uniqueness the relational schema enforces with a constraint
        if tables.sub_questions.iter().any(|s| s.question_id == data.question_id) {
            return Err(Error::InvalidInput("question already has a sub-question".into()));
        }
        let sub = SubQuestion {
            id: Uuid::new_v4(),
            question_id: data.question_id,
            content: data.content,
            audio_url: data.audio_url,
        };
        tables.sub_questions.push(sub.clone());
        Ok(sub)
    }

    async fn get(&mut self, id: Uuid) -> Result<SubQuestion, Error> {
        self.read()?
            .sub_questions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("sub-question"))
    }

    async fn get_by_question(&mut self, question_id: Uuid) -> Result<Option<SubQuestion>, Error> {
        Ok(self.read()?.sub_questions.iter().find(|s| s.question_id == question_id).cloned())
    }

    async fn update(&mut self, sub_question: &SubQuestion) -> Result<(), Error> {
        let mut tables = self.write()?;
        match tables.sub_questions.iter_mut().find(|s| s.id == sub_question.id) {
            Some(row) => {
                *row = sub_question.clone();
                Ok(())
            }
            None => Err(Error::not_found("sub-question")),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let mut tables = self.write()?;
        let before = tables.sub_questions.len();
        tables.sub_questions.retain(|s| s.id != id);
        tables.answers.retain(|a| a.sub_question_id != id);
        tables.options.retain(|o| o.sub_question_id != id);
        Ok((before - tables.sub_questions.len()) as u64)
    }
}

#[async_trait]
impl AnswerStore for MemoryStore {
    async fn insert(&mut self, data: AnswerInsert) -> Result<Answer, Error> {
        let answer = Answer {
            id: Uuid::new_v4(),
            question_id: data.question_id,
            sub_question_id: data.sub_question_id,
            content: data.content,
            explanation: data.explanation,
        };
        self.write()?.answers.push(answer.clone());
        Ok(answer)
    }

    async fn get(&mut self, id: Uuid) -> Result<Answer, Error> {
        self.read()?.answers.iter().find(|a| a.id == id).cloned().ok_or_else(|| Error::not_found("answer"))
    }

    async fn list_by_sub_question(&mut self, sub_question_id: Uuid) -> Result<Vec<Answer>, Error> {
        Ok(self.read()?.answers.iter().filter(|a| a.sub_question_id == sub_question_id).cloned().collect())
    }

    async fn update(&mut self, answer: &Answer) -> Result<(), Error> {
        let mut tables = self.write()?;
        match tables.answers.iter_mut().find(|a| a.id == answer.id) {
            Some(row) => {
                *row = answer.clone();
                Ok(())
            }
            None => Err(Error::not_found("answer")),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let mut tables = self.write()?;
        let before = tables.answers.len();
        tables.answers.retain(|a| a.id != id);
        Ok((before - tables.answers.len()) as u64)
    }
}

#[async_trait]
impl OptionStore for MemoryStore {
    async fn insert(&mut self, data: OptionInsert) -> Result<ChoiceOption, Error> {
        let option = ChoiceOption {
            id: Uuid::new_v4(),
            question_id: data.question_id,
            sub_question_id: data.sub_question_id,
            content: data.content,
            is_correct: data.is_correct,
            explanation: data.explanation,
        };
        self.write()?.options.push(option.clone());
        Ok(option)
    }

    async fn get(&mut self, id: Uuid) -> Result<ChoiceOption, Error> {
        self.read()?.options.iter().find(|o| o.id == id).cloned().ok_or_else(|| Error::not_found("option"))
    }

    async fn list_by_sub_question(&mut self, sub_question_id: Uuid) -> Result<Vec<ChoiceOption>, Error> {
        Ok(self.read()?.options.iter().filter(|o| o.sub_question_id == sub_question_id).cloned().collect())
    }

    async fn update(&mut self, option: &ChoiceOption) -> Result<(), Error> {
        let mut tables = self.write()?;
        match tables.options.iter_mut().find(|o| o.id == option.id) {
            Some(row) => {
                *row = option.clone();
                Ok(())
            }
            None => Err(Error::not_found("option")),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let mut tables = self.write()?;
        let before = tables.options.len();
        tables.options.retain(|o| o.id != id);
        Ok((before - tables.options.len()) as u64)
    }

    async fn clear_correct_except(&mut self, sub_question_id: Uuid, keep: Uuid) -> Result<u64, Error> {
        let mut tables = self.write()?;
        let mut flipped = 0;
        for option in tables.options.iter_mut() {
            if option.sub_question_id == sub_question_id && option.id != keep && option.is_correct {
                option.is_correct = false;
                flipped += 1;
            }
        }
        Ok(flipped)
    }
}

#[async_trait]
impl MatchingStore for MemoryStore {
    async fn insert(&mut self, data: MatchingInsert) -> Result<MatchingPair, Error> {
        let pair = MatchingPair {
            id: Uuid::new_v4(),
            question_id: data.question_id,
            left: data.left,
            right: data.right,
            explanation: data.explanation,
        };
        self.write()?.matching_pairs.push(pair.clone());
        Ok(pair)
    }

    async fn get(&mut self, id: Uuid) -> Result<MatchingPair, Error> {
        self.read()?
            .matching_pairs
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("matching pair"))
    }

    async fn list_by_question(&mut self, question_id: Uuid) -> Result<Vec<MatchingPair>, Error> {
        Ok(self.read()?.matching_pairs.iter().filter(|m| m.question_id == question_id).cloned().collect())
    }

    async fn update(&mut self, pair: &MatchingPair) -> Result<(), Error> {
        let mut tables = self.write()?;
        match tables.matching_pairs.iter_mut().find(|m| m.id == pair.id) {
            Some(row) => {
                *row = pair.clone();
                Ok(())
            }
            None => Err(Error::not_found("matching pair")),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let mut tables = self.write()?;
        let before = tables.matching_pairs.len();
        tables.matching_pairs.retain(|m| m.id != id);
        Ok((before - tables.matching_pairs.len()) as u64)
    }
}

#[async_trait]
impl TrueFalseStore for MemoryStore {
    async fn insert(&mut self, data: TrueFalseInsert) -> Result<TrueFalseItem, Error> {
        let item = TrueFalseItem {
            id: Uuid::new_v4(),
            question_id: data.question_id,
            statement: data.statement,
            answer: data.answer,
            explanation: data.explanation,
        };
        self.write()?.true_false_items.push(item.clone());
        Ok(item)
    }

    async fn get(&mut self, id: Uuid) -> Result<TrueFalseItem, Error> {
        self.read()?
            .true_false_items
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("true/false item"))
    }

    async fn list_by_question(&mut self, question_id: Uuid) -> Result<Vec<TrueFalseItem>, Error> {
        Ok(self.read()?.true_false_items.iter().filter(|t| t.question_id == question_id).cloned().collect())
    }

    async fn update(&mut self, item: &TrueFalseItem) -> Result<(), Error> {
        let mut tables = self.write()?;
        match tables.true_false_items.iter_mut().find(|t| t.id == item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(())
            }
            None => Err(Error::not_found("true/false item")),
        }
    }

    async fn delete(&mut self, id: Uuid) -> Result<u64, Error> {
        let mut tables = self.write()?;
        let before = tables.true_false_items.len();
        tables.true_false_items.retain(|t| t.id != id);
        Ok((before - tables.true_false_items.len()) as u64)
    }
}
