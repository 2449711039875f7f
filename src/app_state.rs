use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::catalog::Catalog,
    repositories::{InMemoryQuizSessionRepository, QuizSessionRepository},
    services::{
        documentation_lookup::{DocumentationLookup, WebDocumentationLookup},
        generation_service::{OpenAiQuestionGenerator, QuestionGenerationService},
        quiz_engine::QuizEngine,
        topic_rotator::RotationState,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_engine: Arc<QuizEngine>,
    pub sessions: Arc<dyn QuizSessionRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let catalog = Catalog::load(config.exam_catalog_path.as_deref())?;
        log::info!(
            "Loaded {} catalog with {} topics",
            config.exam.exam_code,
            catalog.topics().len()
        );

        let generator = Arc::new(OpenAiQuestionGenerator::new(&config));
        let docs = Arc::new(WebDocumentationLookup::new(&config));
        let sessions = Arc::new(InMemoryQuizSessionRepository::with_limits(
            config.session_ttl(),
            config.max_sessions,
        ));

        Ok(Self::with_collaborators(config, catalog, generator, docs, sessions))
    }

    /// Wires the state from explicit collaborators. The rotation state is
    /// created here and shared by every quiz this state serves.
    pub fn with_collaborators(
        config: Config,
        catalog: Catalog,
        generator: Arc<dyn QuestionGenerationService>,
        docs: Arc<dyn DocumentationLookup>,
        sessions: Arc<dyn QuizSessionRepository>,
    ) -> Self {
        let rotation = Arc::new(Mutex::new(RotationState::new()));
        let quiz_engine = Arc::new(QuizEngine::new(
            &config,
            Arc::new(catalog),
            rotation,
            generator,
            docs,
        ));

        Self {
            quiz_engine,
            sessions,
            config: Arc::new(config),
        }
    }
}
