use once_cell::sync::Lazy;
use rand::Rng;

use crate::{
    config::ExamProfile,
    constants::prompts::{
        MULTIPLE_CHOICE_EXAMPLE, MULTIPLE_CHOICE_FORMAT, MULTI_RESPONSE_EXAMPLE,
        MULTI_RESPONSE_FORMAT, SYSTEM_INSTRUCTION_TEMPLATE, TRUE_FALSE_EXAMPLE, TRUE_FALSE_FORMAT,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{
            catalog::Catalog,
            question::{Difficulty, QuestionSpec, QuestionType},
        },
        dto::generated_question::{MultiAnswerQuestionSchema, SingleAnswerQuestionSchema},
    },
    services::topic_rotator::{select_objective, RotationState},
};

/// A rendered user prompt plus the spec it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPrompt {
    pub prompt: String,
    pub spec: QuestionSpec,
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    exam: ExamProfile,
}

impl PromptBuilder {
    pub fn new(exam: ExamProfile) -> Self {
        Self { exam }
    }

    pub fn exam(&self) -> &ExamProfile {
        &self.exam
    }

    pub fn system_instruction(&self) -> String {
        SYSTEM_INSTRUCTION_TEMPLATE.replace("{exam_code}", &self.exam.exam_code)
    }

    /// Picks the next objective for `topic` and renders a prompt for it.
    /// Unrecognized question types fail before the rotation is touched.
    pub fn build_prompt<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        state: &mut RotationState,
        difficulty: Difficulty,
        question_type: &str,
        topic: &str,
        rng: &mut R,
    ) -> AppResult<BuiltPrompt> {
        let question_type: QuestionType = question_type.parse()?;

        let selection = select_objective(catalog, state, topic, rng).ok_or_else(|| {
            AppError::InternalError("Exam catalog has no topics to select from".to_string())
        })?;
        let spec = QuestionSpec::new(difficulty, question_type, selection);

        Ok(BuiltPrompt {
            prompt: self.render(&spec),
            spec,
        })
    }

    pub fn render(&self, spec: &QuestionSpec) -> String {
        let mut prompt = format!(
            "Generate a {} {} question for the {} exam focusing on '{}'",
            spec.difficulty, spec.question_type, self.exam.exam_code, spec.topic
        );

        match &spec.sub_objective {
            Some(sub_objective) => prompt.push_str(&format!(
                ", specifically covering the objective '{}' and the subtopic '{}'",
                spec.objective, sub_objective
            )),
            None => prompt.push_str(&format!(
                ", specifically covering the objective '{}'",
                spec.objective
            )),
        }

        let (format, example) = match spec.question_type {
            QuestionType::MultipleChoice => (MULTIPLE_CHOICE_FORMAT, MULTIPLE_CHOICE_EXAMPLE),
            QuestionType::TrueFalse => (TRUE_FALSE_FORMAT, TRUE_FALSE_EXAMPLE),
            QuestionType::MultiResponse => (MULTI_RESPONSE_FORMAT, MULTI_RESPONSE_EXAMPLE),
        };

        prompt.push_str(format);
        prompt.push_str("\nExample:\n");
        prompt.push_str(example);
        prompt.push_str("\nThe JSON object must validate against this JSON Schema:\n");
        prompt.push_str(output_schema(spec.question_type));
        prompt
    }
}

static SINGLE_ANSWER_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(SingleAnswerQuestionSchema))
        .unwrap_or_default()
});

static MULTI_ANSWER_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(MultiAnswerQuestionSchema))
        .unwrap_or_default()
});

fn output_schema(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::MultiResponse => &MULTI_ANSWER_SCHEMA,
        QuestionType::MultipleChoice | QuestionType::TrueFalse => &SINGLE_ANSWER_SCHEMA,
    }
}
