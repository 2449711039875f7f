use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Question object as decoded from model output. Every field is optional
/// so that missing fields surface as validation errors naming the field
/// instead of opaque decode errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneratedQuestionDto {
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<u32>,
    pub correct_answers: Option<Vec<u32>>,
    pub explanations: Option<BTreeMap<String, String>>,
}

/// Expected output for multiple-choice and true/false questions.
#[allow(dead_code)]
#[derive(Debug, Serialize, JsonSchema)]
pub struct SingleAnswerQuestionSchema {
    /// The question text.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// 1-based index of the correct option.
    pub correct_answer: u32,
    /// Explanation for every option, keyed by its 1-based index as a string.
    pub explanations: BTreeMap<String, String>,
}

/// Expected output for multi-response questions.
#[allow(dead_code)]
#[derive(Debug, Serialize, JsonSchema)]
pub struct MultiAnswerQuestionSchema {
    /// The question text, stating that more than one option may be correct.
    pub question: String,
    /// Four to six answer options in display order.
    pub options: Vec<String>,
    /// 1-based indices of every correct option.
    pub correct_answers: Vec<u32>,
    /// Explanation for every option, keyed by its 1-based index as a string.
    pub explanations: BTreeMap<String, String>,
}
