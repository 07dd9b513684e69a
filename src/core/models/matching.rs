use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One left/right pair of a matching question. Flat list under the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MatchingPair {
    pub id: Uuid,
    pub question_id: Uuid,
    #[sqlx(rename = "left_text")]
    pub left: String,
    #[sqlx(rename = "right_text")]
    pub right: String,
    pub explanation: String,
}

impl MatchingPair {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Left(v) => self.left = v,
            FieldUpdate::Right(v) => self.right = v,
            FieldUpdate::Explanation(v) => self.explanation = v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub question_id: Uuid,
    pub left: String,
    pub right: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: Uuid,
    pub left: String,
    pub right: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Left(String),
    Right(String),
    Explanation(String),
}
