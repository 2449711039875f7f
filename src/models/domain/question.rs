use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::domain::catalog::ObjectiveSelection;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::ValidationError(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum QuestionType {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "true/false", alias = "true-false")]
    TrueFalse,
    #[serde(rename = "multi-response")]
    MultiResponse,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::MultiResponse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::TrueFalse => "true/false",
            QuestionType::MultiResponse => "multi-response",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "multiple-choice" => Ok(QuestionType::MultipleChoice),
            "true/false" | "true-false" => Ok(QuestionType::TrueFalse),
            "multi-response" => Ok(QuestionType::MultiResponse),
            other => Err(AppError::InvalidQuestionType(other.to_string())),
        }
    }
}

/// Everything a prompt is rendered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionSpec {
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub topic: String,
    pub objective: String,
    pub sub_objective: Option<String>,
}

impl QuestionSpec {
    pub fn new(
        difficulty: Difficulty,
        question_type: QuestionType,
        selection: ObjectiveSelection,
    ) -> Self {
        Self {
            difficulty,
            question_type,
            topic: selection.topic,
            objective: selection.objective,
            sub_objective: selection.sub_objective,
        }
    }
}

/// Which options are correct. Serialized as either `correct_answer` or
/// `correct_answers` inside the question object.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum AnswerKey {
    #[serde(rename = "correct_answer")]
    Single(u32),
    #[serde(rename = "correct_answers")]
    Multiple(Vec<u32>),
}

impl AnswerKey {
    pub fn indices(&self) -> Vec<u32> {
        match self {
            AnswerKey::Single(index) => vec![*index],
            AnswerKey::Multiple(indices) => indices.clone(),
        }
    }
}

/// Correct answer as it appears in answer records and feedback: a bare
/// index for single-answer questions, a list for multi-response ones.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    Single(u32),
    Multiple(Vec<u32>),
}

impl From<&AnswerKey> for CorrectAnswer {
    fn from(key: &AnswerKey) -> Self {
        match key {
            AnswerKey::Single(index) => CorrectAnswer::Single(*index),
            AnswerKey::Multiple(indices) => CorrectAnswer::Multiple(indices.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    #[serde(flatten)]
    pub answer: AnswerKey,
    /// Keyed by the 1-based option index as a string.
    pub explanations: BTreeMap<String, String>,
    pub topic: String,
    pub objective: String,
    pub sub_objective: Option<String>,
}

impl Question {
    pub fn is_multi_response(&self) -> bool {
        matches!(self.answer, AnswerKey::Multiple(_))
    }

    pub fn question_type(&self) -> QuestionType {
        match self.answer {
            AnswerKey::Multiple(_) => QuestionType::MultiResponse,
            AnswerKey::Single(_) if is_true_false(&self.options) => QuestionType::TrueFalse,
            AnswerKey::Single(_) => QuestionType::MultipleChoice,
        }
    }

    pub fn explanation_for(&self, index: u32) -> Option<&str> {
        self.explanations.get(&index.to_string()).map(String::as_str)
    }

    /// Checks the structural invariants every stored question must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        if self.options.len() < 2 {
            return Err(format!(
                "expected at least 2 options, got {}",
                self.options.len()
            ));
        }

        let option_count = self.options.len() as u32;
        let indices = self.answer.indices();
        if indices.is_empty() {
            return Err("correct_answers is empty".to_string());
        }
        if let Some(bad) = indices.iter().find(|i| **i == 0 || **i > option_count) {
            return Err(format!(
                "correct answer index {} is outside 1..={}",
                bad, option_count
            ));
        }
        let distinct: BTreeSet<u32> = indices.iter().copied().collect();
        if distinct.len() != indices.len() {
            return Err("correct_answers contains duplicates".to_string());
        }

        let missing: Vec<String> = (1..=option_count)
            .map(|i| i.to_string())
            .filter(|key| !self.explanations.contains_key(key))
            .collect();
        if !missing.is_empty() {
            return Err(format!("explanations missing for options {}", missing.join(", ")));
        }

        Ok(())
    }
}

pub fn is_true_false(options: &[String]) -> bool {
    options.len() == 2
        && options[0].trim().eq_ignore_ascii_case("true")
        && options[1].trim().eq_ignore_ascii_case("false")
}
