use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single question row owned by fill-in-blank and choice roots. The
/// database enforces at most one per root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubQuestion {
    pub id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub audio_url: Option<String>,
}

impl SubQuestion {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Content(v) => self.content = v,
            FieldUpdate::AudioUrl(v) => self.audio_url = v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    pub question_id: Uuid,
    pub content: String,
    #[serde(default)]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: Uuid,
    pub content: String,
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Content(String),
    AudioUrl(Option<String>),
}
