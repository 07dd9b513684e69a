use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One option of a choice_one / choice_multi sub-question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChoiceOption {
    pub id: Uuid,
    pub question_id: Uuid,
    pub sub_question_id: Uuid,
    pub content: String,
    pub is_correct: bool,
    pub explanation: String,
}

impl ChoiceOption {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Content(v) => self.content = v,
            FieldUpdate::IsCorrect(v) => self.is_correct = v,
            FieldUpdate::Explanation(v) => self.explanation = v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub question_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: Uuid,
    pub sub_question_id: Uuid,
    pub content: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Content(String),
    IsCorrect(bool),
    Explanation(String),
}
