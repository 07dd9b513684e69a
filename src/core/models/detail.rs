use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::models::answer::Answer;
use crate::core::models::matching::MatchingPair;
use crate::core::models::option::ChoiceOption;
use crate::core::models::question::Question;
use crate::core::models::sub_question::SubQuestion;
use crate::core::models::true_false::TrueFalseItem;

/// The fully assembled, denormalized view of a root question. Never persisted
/// relationally; this is the unit written to the cache and the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub sub_question: Option<SubQuestion>,
    pub answers: Vec<Answer>,
    pub options: Vec<ChoiceOption>,
    pub matching_pairs: Vec<MatchingPair>,
    pub true_false_items: Vec<TrueFalseItem>,
    pub complete: bool,
}

impl QuestionDetail {
    pub fn new(question: Question) -> Self {
        QuestionDetail {
            question,
            sub_question: None,
            answers: Vec::new(),
            options: Vec::new(),
            matching_pairs: Vec::new(),
            true_false_items: Vec::new(),
            complete: false,
        }
    }
}

/// Derived flag embedded in cache keys and search documents. "uncomplete" is
/// the historical spelling and is kept on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Complete,
    Uncomplete,
}

impl CompletionStatus {
    pub fn from_bool(complete: bool) -> Self {
        if complete {
            CompletionStatus::Complete
        } else {
            CompletionStatus::Uncomplete
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionStatus::Complete => "complete",
            CompletionStatus::Uncomplete => "uncomplete",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
