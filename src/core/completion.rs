use crate::core::models::detail::{CompletionStatus, QuestionDetail};
use crate::core::models::question::QuestionType;

/// Whether an assembled detail meets the minimum-content thresholds of its
/// question type. Pure; recomputed on every synchronization.
///
/// Thresholds:
/// - fill_in_blank: sub-question and at least 2 answers
/// - choice_one: sub-question, at least 2 options, at least one correct and
///   one incorrect
/// - choice_multi: sub-question, at least 3 options, at least 2 correct and
///   1 incorrect
/// - matching: at least 1 pair
/// - true_false: at least 2 items
pub fn is_complete(detail: &QuestionDetail) -> bool {
    match detail.question.type_ {
        QuestionType::FillInBlank => detail.sub_question.is_some() && detail.answers.len() >= 2,
        QuestionType::ChoiceOne => {
            let correct = detail.options.iter().filter(|o| o.is_correct).count();
            detail.sub_question.is_some() && detail.options.len() >= 2 && correct >= 1 && detail.options.len() - correct >= 1
        }
        QuestionType::ChoiceMulti => {
            let correct = detail.options.iter().filter(|o| o.is_correct).count();
            detail.sub_question.is_some() && detail.options.len() >= 3 && correct >= 2 && detail.options.len() - correct >= 1
        }
        QuestionType::Matching => !detail.matching_pairs.is_empty(),
        QuestionType::TrueFalse => detail.true_false_items.len() >= 2,
    }
}

pub fn status_of(detail: &QuestionDetail) -> CompletionStatus {
    CompletionStatus::from_bool(is_complete(detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::question::{Module, QuestionType};
    use crate::test_util::{answer, detail_of, option, pair, question, sub_question, tf_item};

    #[test]
    fn fill_in_blank_needs_sub_question_and_two_answers() {
        let mut detail = detail_of(question(Module::Reading, QuestionType::FillInBlank));
        assert!(!is_complete(&detail));
        let sub = sub_question(detail.question.id);
        detail.answers.push(answer(detail.question.id, sub.id, "cat"));
        detail.answers.push(answer(detail.question.id, sub.id, "cats"));
        assert!(!is_complete(&detail), "answers without a sub-question must not count");
        detail.sub_question = Some(sub);
        assert!(is_complete(&detail));
        detail.answers.pop();
        assert!(!is_complete(&detail));
    }

    #[test]
    fn choice_one_needs_one_correct_and_one_incorrect() {
        let mut detail = detail_of(question(Module::Grammar, QuestionType::ChoiceOne));
        let sub = sub_question(detail.question.id);
        detail.options.push(option(detail.question.id, sub.id, "a", true));
        detail.options.push(option(detail.question.id, sub.id, "b", false));
        detail.sub_question = Some(sub);
        assert!(is_complete(&detail));

        // 2 correct + 0 incorrect is incomplete even with enough options
        for o in &mut detail.options {
            o.is_correct = true;
        }
        assert!(!is_complete(&detail));

        for o in &mut detail.options {
            o.is_correct = false;
        }
        assert!(!is_complete(&detail));
    }

    #[test]
    fn choice_multi_needs_three_options_two_correct_one_incorrect() {
        let mut detail = detail_of(question(Module::Listening, QuestionType::ChoiceMulti));
        let sub = sub_question(detail.question.id);
        detail.options.push(option(detail.question.id, sub.id, "a", true));
        detail.options.push(option(detail.question.id, sub.id, "b", true));
        detail.sub_question = Some(sub.clone());
        assert!(!is_complete(&detail), "two options are not enough");
        detail.options.push(option(detail.question.id, sub.id, "c", false));
        assert!(is_complete(&detail));
        detail.options[1].is_correct = false;
        assert!(!is_complete(&detail), "one correct is not enough for choice_multi");
    }

    #[test]
    fn matching_needs_one_pair() {
        let mut detail = detail_of(question(Module::Writing, QuestionType::Matching));
        assert!(!is_complete(&detail));
        detail.matching_pairs.push(pair(detail.question.id, "hot", "cold"));
        assert!(is_complete(&detail));
    }

    #[test]
    fn true_false_needs_two_items() {
        let mut detail = detail_of(question(Module::Speaking, QuestionType::TrueFalse));
        detail.true_false_items.push(tf_item(detail.question.id, "water is wet", true));
        assert!(!is_complete(&detail));
        detail.true_false_items.push(tf_item(detail.question.id, "fire is cold", false));
        assert!(is_complete(&detail));
    }

    #[test]
    fn status_spelling_is_preserved() {
        let detail = detail_of(question(Module::Reading, QuestionType::Matching));
        assert_eq!(status_of(&detail).as_str(), "uncomplete");
    }
}
