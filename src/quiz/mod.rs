pub mod content;
pub mod question;
pub mod unit;

pub use question::{Question, QuestionKind, generate_question, generate_question_with};
pub use unit::{Lesson, generate_unit, generate_unit_with};
