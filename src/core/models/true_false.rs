use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One statement of a true/false question. Flat list under the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrueFalseItem {
    pub id: Uuid,
    pub question_id: Uuid,
    pub statement: String,
    pub answer: bool,
    pub explanation: String,
}

impl TrueFalseItem {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Statement(v) => self.statement = v,
            FieldUpdate::Answer(v) => self.answer = v,
            FieldUpdate::Explanation(v) => self.explanation = v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub question_id: Uuid,
    pub statement: String,
    pub answer: bool,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: Uuid,
    pub statement: String,
    pub answer: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Statement(String),
    Answer(bool),
    Explanation(String),
}
