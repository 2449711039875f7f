use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::question::{CorrectAnswer, Question, QuestionType};
use crate::models::domain::quiz_session::{AnswerOutcome, Explanation, QuestionFeedback};

/// A question as shown to the user: no answer key, no explanations.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub question_number: usize,
    pub num_questions: usize,
    pub question: String,
    pub options: Vec<String>,
    pub question_type: QuestionType,
    pub multi_response: bool,
    pub topic: String,
}

impl QuestionView {
    pub fn new(question: &Question, index: usize, num_questions: usize) -> Self {
        QuestionView {
            question_number: index + 1,
            num_questions,
            question: question.question.clone(),
            options: question.options.clone(),
            question_type: question.question_type(),
            multi_response: question.is_multi_response(),
            topic: question.topic.clone(),
        }
    }
}

/// What a user sees after submitting an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackPayload {
    pub is_correct: bool,
    pub partially_correct: bool,
    pub correct_answer: Option<CorrectAnswer>,
    pub explanation: Option<Explanation>,
    pub doc_link: Option<String>,
    pub doc_snippet: Option<String>,
}

impl FeedbackPayload {
    pub fn new(outcome: AnswerOutcome, feedback: Option<QuestionFeedback>) -> Self {
        let (correct_answer, explanation) = match feedback {
            Some(f) => (Some(f.correct_answer), Some(f.explanation)),
            None => (None, None),
        };
        FeedbackPayload {
            is_correct: outcome.is_correct,
            partially_correct: outcome.partially_correct,
            correct_answer,
            explanation,
            doc_link: None,
            doc_snippet: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StartQuizResponse {
    pub session_id: Uuid,
    pub question: Option<QuestionView>,
}

/// Either the next question (possibly not generated yet) or a pointer to
/// the results once the quiz is complete.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NextQuestionResponse {
    Question { question: Option<QuestionView> },
    Redirect { redirect: String },
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub feedback: FeedbackPayload,
    pub is_last_question: bool,
    pub result_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResultsResponse {
    pub score: f64,
    pub num_questions: usize,
    pub answered: usize,
    pub summary: Vec<String>,
    pub weak_areas: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicsResponse {
    pub exam_code: String,
    pub topics: Vec<String>,
}
