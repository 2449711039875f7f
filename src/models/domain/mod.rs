pub mod catalog;
pub mod question;
pub mod quiz_session;

pub use catalog::{Catalog, ObjectiveSelection, Topic};
pub use question::{Difficulty, Question, QuestionType};
pub use quiz_session::QuizSession;
