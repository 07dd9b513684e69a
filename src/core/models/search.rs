use itertools::Itertools;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::models::detail::{CompletionStatus, QuestionDetail};
use crate::core::models::question::{Module, QuestionType};

/// Denormalized document held by the search index, one per root question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: Uuid,
    pub module: Module,
    #[serde(rename = "type")]
    pub type_: QuestionType,
    pub topics: Vec<String>,
    pub instruction: String,
    pub title: String,
    pub status: CompletionStatus,
    pub version: i64,
    /// Concatenated passages and sub-entity texts, the free-text haystack.
    pub text: String,
}

impl SearchDocument {
    pub fn from_detail(detail: &QuestionDetail, status: CompletionStatus) -> Self {
        let q = &detail.question;
        let text = q
            .passages
            .iter()
            .map(String::as_str)
            .chain(detail.sub_question.iter().map(|s| s.content.as_str()))
            .chain(detail.answers.iter().map(|a| a.content.as_str()))
            .chain(detail.options.iter().map(|o| o.content.as_str()))
            .chain(detail.matching_pairs.iter().flat_map(|m| [m.left.as_str(), m.right.as_str()]))
            .chain(detail.true_false_items.iter().map(|t| t.statement.as_str()))
            .filter(|s| !s.is_empty())
            .join(" ");
        SearchDocument {
            id: q.id,
            module: q.module,
            type_: q.type_,
            topics: q.topics.clone(),
            instruction: q.instruction.clone(),
            title: q.title.clone(),
            status,
            version: q.version,
            text,
        }
    }
}

/// Filters for the paginated search endpoint. All filters are optional and
/// conjunctive.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(rename = "type")]
    #[serde(default)]
    pub type_: Option<QuestionType>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            page: default_page(),
            limit: default_limit(),
            type_: None,
            topic: None,
            instruction: None,
            title: None,
            text: None,
        }
    }
}
