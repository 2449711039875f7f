use thiserror::Error;

use crate::models::domain::question::{
    is_true_false, AnswerKey, Question, QuestionSpec, QuestionType,
};
use crate::models::dto::generated_question::GeneratedQuestionDto;

#[derive(Error, Debug)]
pub enum QuestionParseError {
    #[error("No JSON object found in model output")]
    NoJsonObject,

    #[error("Model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Generated question is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Answer shape does not match {question_type} question: {reason}")]
    AnswerShapeMismatch {
        question_type: QuestionType,
        reason: &'static str,
    },

    #[error("Generated question is invalid: {0}")]
    InvalidQuestion(String),
}

/// Returns the substring from the first `{` to the last `}` inclusive.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Turns raw model output into a validated [`Question`] tagged with the
/// topic and objective it was generated for.
pub fn parse_question(raw: &str, spec: &QuestionSpec) -> Result<Question, QuestionParseError> {
    let json = extract_json_object(raw).ok_or(QuestionParseError::NoJsonObject)?;
    let dto: GeneratedQuestionDto = serde_json::from_str(json)?;

    let question = dto
        .question
        .ok_or(QuestionParseError::MissingField("question"))?;
    let options = dto
        .options
        .ok_or(QuestionParseError::MissingField("options"))?;
    let explanations = dto
        .explanations
        .ok_or(QuestionParseError::MissingField("explanations"))?;

    let answer = match (spec.question_type, dto.correct_answer, dto.correct_answers) {
        (_, Some(_), Some(_)) => {
            return Err(QuestionParseError::AnswerShapeMismatch {
                question_type: spec.question_type,
                reason: "both correct_answer and correct_answers are present",
            })
        }
        (QuestionType::MultiResponse, _, Some(indices)) => AnswerKey::Multiple(indices),
        (QuestionType::MultiResponse, Some(_), None) => {
            return Err(QuestionParseError::AnswerShapeMismatch {
                question_type: spec.question_type,
                reason: "expected correct_answers list",
            })
        }
        (_, Some(index), None) => AnswerKey::Single(index),
        (_, None, Some(_)) => {
            return Err(QuestionParseError::AnswerShapeMismatch {
                question_type: spec.question_type,
                reason: "expected a single correct_answer",
            })
        }
        (QuestionType::MultiResponse, None, None) => {
            return Err(QuestionParseError::MissingField("correct_answers"))
        }
        (_, None, None) => return Err(QuestionParseError::MissingField("correct_answer")),
    };

    let options = if spec.question_type == QuestionType::TrueFalse {
        if options.len() != 2 {
            return Err(QuestionParseError::InvalidQuestion(format!(
                "true/false question must have exactly 2 options, got {}",
                options.len()
            )));
        }
        if !is_true_false(&options) {
            return Err(QuestionParseError::InvalidQuestion(format!(
                "true/false options must be [\"True\", \"False\"], got {:?}",
                options
            )));
        }
        vec!["True".to_string(), "False".to_string()]
    } else {
        options
    };

    let parsed = Question {
        question,
        options,
        answer,
        explanations,
        topic: spec.topic.clone(),
        objective: spec.objective.clone(),
        sub_objective: spec.sub_objective.clone(),
    };
    parsed
        .validate()
        .map_err(QuestionParseError::InvalidQuestion)?;

    Ok(parsed)
}
