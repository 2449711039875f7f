use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{
            catalog::Catalog,
            question::{Difficulty, Question, QuestionType},
            quiz_session::QuizSession,
        },
        dto::{
            request::StartQuizRequest,
            response::{FeedbackPayload, QuizResultsResponse},
        },
    },
    services::{
        documentation_lookup::{DocumentationLookup, LookupQuery},
        generation_service::{GenerationError, GenerationRequest, QuestionGenerationService},
        prompt_builder::{BuiltPrompt, PromptBuilder},
        question_parser::parse_question,
        topic_rotator::RotationState,
    },
};

/// Result of answering the current question.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub feedback: FeedbackPayload,
    pub is_last_question: bool,
}

/// Drives a quiz: generates questions on demand, scores answers and
/// attaches documentation to feedback.
pub struct QuizEngine {
    catalog: Arc<Catalog>,
    rotation: Arc<Mutex<RotationState>>,
    prompts: PromptBuilder,
    generator: Arc<dyn QuestionGenerationService>,
    docs: Arc<dyn DocumentationLookup>,
    model: String,
    temperature: f32,
    generation_timeout: Duration,
}

impl QuizEngine {
    pub fn new(
        config: &Config,
        catalog: Arc<Catalog>,
        rotation: Arc<Mutex<RotationState>>,
        generator: Arc<dyn QuestionGenerationService>,
        docs: Arc<dyn DocumentationLookup>,
    ) -> Self {
        Self {
            catalog,
            rotation,
            prompts: PromptBuilder::new(config.exam.clone()),
            generator,
            docs,
            model: config.openai_model.clone(),
            temperature: config.openai_temperature,
            generation_timeout: config.generation_timeout(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn exam_code(&self) -> &str {
        &self.prompts.exam().exam_code
    }

    /// Creates a session and tries to generate its first question. A failed
    /// first generation still returns the session; the question is retried
    /// when it is next requested.
    pub async fn start_quiz(&self, request: &StartQuizRequest) -> AppResult<QuizSession> {
        let difficulty: Difficulty = request.difficulty.parse()?;
        if !self.catalog.accepts_topic(&request.topic) {
            log::warn!(
                "Topic '{}' is not in the {} catalog, questions will use random topics",
                request.topic,
                self.exam_code()
            );
        }

        let mut session = QuizSession::new(request.num_questions, difficulty, &request.topic);
        log::info!(
            "Starting {} quiz: {} {} questions on '{}'",
            self.exam_code(),
            session.num_questions,
            difficulty,
            session.topic
        );
        self.ensure_current_question(&mut session).await;
        Ok(session)
    }

    /// Generates one more question for `session` without appending it.
    /// Returns `None` when the session is full or generation failed.
    pub async fn generate_next_question(&self, session: &QuizSession) -> Option<Question> {
        if !session.can_accept_question() {
            return None;
        }

        match self.try_generate(session).await {
            Ok(question) => Some(question),
            Err(e) => {
                log::error!(
                    "Failed to generate question {} of {}: {}",
                    session.questions.len() + 1,
                    session.num_questions,
                    e
                );
                None
            }
        }
    }

    async fn try_generate(&self, session: &QuizSession) -> AppResult<Question> {
        let BuiltPrompt { prompt, spec } = self.next_prompt(session).await?;
        log::debug!(
            "Generating {} question on '{}' / '{}'",
            spec.question_type,
            spec.topic,
            spec.objective
        );

        let request = GenerationRequest {
            system_instruction: self.prompts.system_instruction(),
            prompt,
            model: self.model.clone(),
            temperature: self.temperature,
        };

        let raw = tokio::time::timeout(self.generation_timeout, self.generator.generate(&request))
            .await
            .map_err(|_| GenerationError::Timeout(self.generation_timeout))??;

        let question = parse_question(&raw, &spec)?;
        Ok(question)
    }

    /// Picks a random question type and the next objective. The rotation
    /// lock is only held while selecting.
    async fn next_prompt(&self, session: &QuizSession) -> AppResult<BuiltPrompt> {
        let mut rotation = self.rotation.lock().await;
        let mut rng = rand::thread_rng();
        let question_type = QuestionType::ALL
            .choose(&mut rng)
            .copied()
            .unwrap_or(QuestionType::MultipleChoice);

        self.prompts.build_prompt(
            &self.catalog,
            &mut rotation,
            session.difficulty,
            question_type.as_str(),
            &session.topic,
            &mut rng,
        )
    }

    /// Makes sure the current slot holds a question, generating it if
    /// needed. `None` means the quiz is complete or generation failed.
    pub async fn ensure_current_question<'a>(
        &self,
        session: &'a mut QuizSession,
    ) -> Option<&'a Question> {
        if session.needs_question() {
            if let Some(question) = self.generate_next_question(session).await {
                session.push_question(question);
            }
        }
        session.current_question()
    }

    /// Scores `answer` against the current question, advances the session
    /// and generates the following question ahead of time.
    pub async fn submit_answer(
        &self,
        session: &mut QuizSession,
        answer: &[u32],
    ) -> AppResult<SubmitOutcome> {
        if session.is_complete() {
            return Err(AppError::ValidationError(
                "Quiz is already complete".to_string(),
            ));
        }
        if session.current_question().is_none() {
            return Err(AppError::ValidationError(
                "No question has been generated for this position yet".to_string(),
            ));
        }

        let outcome = session.check_answer(answer);
        let feedback = session.feedback();
        log::debug!("Raw feedback: {:?}", feedback);

        let doc = match &feedback {
            Some(f) => {
                let query = LookupQuery {
                    query: f.search_query(),
                    sub_objective: f.sub_objective.clone(),
                };
                self.docs.lookup(&query).await
            }
            None => None,
        };

        let mut payload = FeedbackPayload::new(outcome, feedback);
        if let Some(doc) = doc {
            payload.doc_link = Some(doc.link);
            payload.doc_snippet = Some(doc.snippet);
        }

        session.advance();
        let is_last_question = session.is_complete();
        if !is_last_question {
            self.ensure_current_question(session).await;
        }

        Ok(SubmitOutcome {
            feedback: payload,
            is_last_question,
        })
    }

    pub fn results(&self, session: &QuizSession) -> QuizResultsResponse {
        QuizResultsResponse {
            score: session.score,
            num_questions: session.num_questions,
            answered: session.user_performance.len(),
            summary: session
                .performance_summary()
                .iter()
                .map(ToString::to_string)
                .collect(),
            weak_areas: session.weak_areas(),
        }
    }
}
