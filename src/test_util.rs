use chrono::Utc;
use uuid::Uuid;

use crate::core::models::answer::{self, Answer};
use crate::core::models::detail::QuestionDetail;
use crate::core::models::matching::{self, MatchingPair};
use crate::core::models::option::{self, ChoiceOption};
use crate::core::models::question::{self, Module, Question, QuestionType};
use crate::core::models::sub_question::{self, SubQuestion};
use crate::core::models::true_false::{self, TrueFalseItem};

pub fn question(module: Module, type_: QuestionType) -> Question {
    let now = Utc::now();
    Question {
        id: Uuid::new_v4(),
        module,
        type_,
        topics: vec!["daily life".into()],
        instruction: "read carefully".into(),
        title: "a test question".into(),
        passages: Vec::new(),
        image_urls: Vec::new(),
        max_time: 60,
        version: 1,
        created_at: now,
        updated_at: now,
    }
}

pub fn detail_of(question: Question) -> QuestionDetail {
    QuestionDetail::new(question)
}

pub fn sub_question(question_id: Uuid) -> SubQuestion {
    SubQuestion {
        id: Uuid::new_v4(),
        question_id,
        content: "the ___ sat on the mat".into(),
        audio_url: None,
    }
}

pub fn answer(question_id: Uuid, sub_question_id: Uuid, content: &str) -> Answer {
    Answer {
        id: Uuid::new_v4(),
        question_id,
        sub_question_id,
        content: content.into(),
        explanation: String::new(),
    }
}

pub fn option(question_id: Uuid, sub_question_id: Uuid, content: &str, is_correct: bool) -> ChoiceOption {
    ChoiceOption {
        id: Uuid::new_v4(),
        question_id,
        sub_question_id,
        content: content.into(),
        is_correct,
        explanation: String::new(),
    }
}

pub fn pair(question_id: Uuid, left: &str, right: &str) -> MatchingPair {
    MatchingPair {
        id: Uuid::new_v4(),
        question_id,
        left: left.into(),
        right: right.into(),
        explanation: String::new(),
    }
}

pub fn tf_item(question_id: Uuid, statement: &str, answer: bool) -> TrueFalseItem {
    TrueFalseItem {
        id: Uuid::new_v4(),
        question_id,
        statement: statement.into(),
        answer,
        explanation: String::new(),
    }
}

pub fn question_insert(module: Module, type_: QuestionType) -> question::Insert {
    question::Insert {
        module,
        type_,
        topics: vec!["daily life".into()],
        instruction: "read carefully".into(),
        title: "a test question".into(),
        passages: Vec::new(),
        image_urls: Vec::new(),
        max_time: 60,
    }
}

pub fn create_request(type_: QuestionType) -> question::Create {
    question::Create {
        type_,
        topics: vec!["daily life".into()],
        instruction: "read carefully".into(),
        title: "a test question".into(),
        passages: Vec::new(),
        image_urls: Vec::new(),
        max_time: 60,
    }
}

pub fn sub_create(question_id: Uuid) -> sub_question::Create {
    sub_question::Create {
        question_id,
        content: "the ___ sat on the mat".into(),
        audio_url: None,
    }
}

pub fn answer_create(question_id: Uuid, content: &str) -> answer::Create {
    answer::Create {
        question_id,
        content: content.into(),
        explanation: String::new(),
    }
}

pub fn option_create(question_id: Uuid, content: &str, is_correct: bool) -> option::Create {
    option::Create {
        question_id,
        content: content.into(),
        is_correct,
        explanation: String::new(),
    }
}

pub fn pair_create(question_id: Uuid, left: &str, right: &str) -> matching::Create {
    matching::Create {
        question_id,
        left: left.into(),
        right: right.into(),
        explanation: String::new(),
    }
}

pub fn tf_create(question_id: Uuid, statement: &str, answer: bool) -> true_false::Create {
    true_false::Create {
        question_id,
        statement: statement.into(),
        answer,
        explanation: String::new(),
    }
}
