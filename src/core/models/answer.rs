use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One accepted answer for a fill-in-blank sub-question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub sub_question_id: Uuid,
    pub content: String,
    pub explanation: String,
}

impl Answer {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Content(v) => self.content = v,
            FieldUpdate::Explanation(v) => self.explanation = v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub question_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: Uuid,
    pub sub_question_id: Uuid,
    pub content: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Content(String),
    Explanation(String),
}
