use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

/// Content module a question belongs to. Carried on the root row and as the
/// first URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Reading,
    Listening,
    Speaking,
    Writing,
    Grammar,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Reading => "reading",
            Module::Listening => "listening",
            Module::Speaking => "speaking",
            Module::Writing => "writing",
            Module::Grammar => "grammar",
        }
    }

    /// Which root fields accept partial updates for this module. Reading
    /// carries the full set; the others drop the fields that make no sense
    /// for their content shape.
    pub fn allows(&self, update: &FieldUpdate) -> bool {
        use FieldUpdate::*;
        match self {
            Module::Reading => true,
            Module::Listening => matches!(update, Topics(_) | Instruction(_) | Title(_) | MaxTime(_)),
            Module::Speaking => matches!(update, Topics(_) | Instruction(_) | Title(_) | ImageUrls(_) | MaxTime(_)),
            Module::Writing => matches!(update, Topics(_) | Instruction(_) | Title(_) | Passages(_) | MaxTime(_)),
            Module::Grammar => matches!(update, Topics(_) | Instruction(_) | Title(_)),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reading" => Ok(Module::Reading),
            "listening" => Ok(Module::Listening),
            "speaking" => Ok(Module::Speaking),
            "writing" => Ok(Module::Writing),
            "grammar" => Ok(Module::Grammar),
            _ => Err(Error::NotFound(format!("module {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    FillInBlank,
    ChoiceOne,
    ChoiceMulti,
    Matching,
    TrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::FillInBlank => "fill_in_blank",
            QuestionType::ChoiceOne => "choice_one",
            QuestionType::ChoiceMulti => "choice_multi",
            QuestionType::Matching => "matching",
            QuestionType::TrueFalse => "true_false",
        }
    }

    /// The "single" kinds own exactly one sub-question row which in turn owns
    /// the answer/option children; the flat kinds attach rows to the root
    /// directly.
    pub fn has_sub_question(&self) -> bool {
        matches!(self, QuestionType::FillInBlank | QuestionType::ChoiceOne | QuestionType::ChoiceMulti)
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::ChoiceOne | QuestionType::ChoiceMulti)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill_in_blank" => Ok(QuestionType::FillInBlank),
            "choice_one" => Ok(QuestionType::ChoiceOne),
            "choice_multi" => Ok(QuestionType::ChoiceMulti),
            "matching" => Ok(QuestionType::Matching),
            "true_false" => Ok(QuestionType::TrueFalse),
            _ => Err(Error::InvalidInput(format!("unknown question type {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub module: Module,
    #[serde(rename = "type")]
    pub type_: QuestionType,
    pub topics: Vec<String>,
    pub instruction: String,
    pub title: String,
    pub passages: Vec<String>,
    pub image_urls: Vec<String>,
    pub max_time: i32,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Topics(v) => self.topics = v,
            FieldUpdate::Instruction(v) => self.instruction = v,
            FieldUpdate::Title(v) => self.title = v,
            FieldUpdate::Passages(v) => self.passages = v,
            FieldUpdate::ImageUrls(v) => self.image_urls = v,
            FieldUpdate::MaxTime(v) => self.max_time = v,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Create {
    #[serde(rename = "type")]
    pub type_: QuestionType,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub instruction: String,
    pub title: String,
    #[serde(default)]
    pub passages: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub max_time: i32,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub module: Module,
    pub type_: QuestionType,
    pub topics: Vec<String>,
    pub instruction: String,
    pub title: String,
    pub passages: Vec<String>,
    pub image_urls: Vec<String>,
    pub max_time: i32,
}

/// One updatable root field with its strongly typed payload. The wire shape
/// stays `{"field": ..., "value": ...}` but unknown field names and
/// mistyped values are rejected at decode time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Topics(Vec<String>),
    Instruction(String),
    Title(String),
    Passages(Vec<String>),
    ImageUrls(Vec<String>),
    MaxTime(i32),
}

impl FieldUpdate {
    pub fn name(&self) -> &'static str {
        match self {
            FieldUpdate::Topics(_) => "topics",
            FieldUpdate::Instruction(_) => "instruction",
            FieldUpdate::Title(_) => "title",
            FieldUpdate::Passages(_) => "passages",
            FieldUpdate::ImageUrls(_) => "image_urls",
            FieldUpdate::MaxTime(_) => "max_time",
        }
    }
}

/// One `(id, version)` pair from a client polling for changed questions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VersionCheck {
    pub id: Uuid,
    pub version: i64,
}
