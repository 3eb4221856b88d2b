use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        model_service::OpenAiQuestionGenerator, question_generator::QuestionGenerator,
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let generator = Arc::new(OpenAiQuestionGenerator::new(&config));
        Self::with_generator(config, generator)
    }

    /// Builds the state around any generator, e.g. an in-memory one in tests.
    pub fn with_generator(config: Config, generator: Arc<dyn QuestionGenerator>) -> Self {
        let quiz_service = Arc::new(QuizService::new(generator, config.quiz));

        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}
