pub mod answer;
pub mod detail;
pub mod matching;
pub mod option;
pub mod question;
pub mod search;
pub mod sub_question;
pub mod true_false;
