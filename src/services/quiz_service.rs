use std::sync::Arc;

use validator::Validate;

use crate::{
    clock::{Clock, SystemClock},
    config::QuizSettings,
    constants::FALLBACK_EXPLANATION,
    errors::AppResult,
    models::{
        domain::Question,
        dto::{ExplainAnswerRequest, GenerateQuizRequest},
    },
    services::{
        question_generator::QuestionGenerator,
        quiz_session::{QuizSession, SupplementalRequest},
    },
};

/// Validates requests before they reach the generator and starts sessions
/// from what it returns.
pub struct QuizService {
    generator: Arc<dyn QuestionGenerator>,
    settings: QuizSettings,
    clock: Arc<dyn Clock>,
}

impl QuizService {
    pub fn new(generator: Arc<dyn QuestionGenerator>, settings: QuizSettings) -> Self {
        Self {
            generator,
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    pub async fn generate_questions(&self, request: &GenerateQuizRequest) -> AppResult<Vec<Question>> {
        request.validate()?;

        let questions = self.generator.generate(request).await?;
        log::info!(
            "Generated {} {} questions",
            questions.len(),
            request.difficulty
        );
        Ok(questions)
    }

    pub async fn start_session(&self, request: GenerateQuizRequest) -> AppResult<QuizSession> {
        let questions = self.generate_questions(&request).await?;
        QuizSession::new(
            request.content,
            request.difficulty,
            questions,
            self.settings,
            Arc::clone(&self.clock),
        )
    }

    pub async fn supplemental_questions(
        &self,
        request: &SupplementalRequest,
    ) -> AppResult<Vec<Question>> {
        self.generate_questions(&request.to_generate_request()).await
    }

    /// Personalized explanation of an answer. Only bad input is an error; a
    /// failing generator degrades to the static fallback text.
    pub async fn explain_answer(&self, request: &ExplainAnswerRequest) -> AppResult<String> {
        request.validate()?;

        match self.generator.explain(request).await {
            Ok(explanation) => Ok(explanation),
            Err(err) => {
                log::warn!("Explanation generation failed, using fallback: {}", err);
                Ok(FALLBACK_EXPLANATION.to_string())
            }
        }
    }
}
