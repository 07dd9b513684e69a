pub mod answer;
pub mod matching;
pub mod option;
pub mod question;
pub mod sub_question;
pub mod true_false;
