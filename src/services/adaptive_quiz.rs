use std::sync::Arc;

use serde::Serialize;
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::AnswerRecord,
        dto::{ExplainAnswerRequest, GenerateQuizRequest, ResultsReport},
    },
    services::{
        quiz_service::QuizService,
        quiz_session::{AdvanceOutcome, QuizSession, SupplementalRequest},
        results_aggregator::ResultsAggregator,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizPhase {
    Input,
    Quiz,
    Results,
}

/// Drives one learner's quiz: content in, questions answered, results out.
///
/// The session lives in a shared slot so that supplemental batches finishing
/// in the background can append to it. A batch only lands if the slot still
/// holds the session that asked for it.
pub struct AdaptiveQuiz {
    service: Arc<QuizService>,
    session: Arc<RwLock<Option<QuizSession>>>,
    in_flight: Mutex<Vec<JoinHandle<()>>>,
}

impl AdaptiveQuiz {
    pub fn new(service: Arc<QuizService>) -> Self {
        Self {
            service,
            session: Arc::new(RwLock::new(None)),
            in_flight: Mutex::new(Vec::new()),
        }
    }

    pub async fn phase(&self) -> QuizPhase {
        match self.session.read().await.as_ref() {
            None => QuizPhase::Input,
            Some(session) if session.is_completed() => QuizPhase::Results,
            Some(_) => QuizPhase::Quiz,
        }
    }

    /// Generates the initial batch and starts a session. On failure the
    /// previous phase is kept.
    pub async fn generate_quiz(&self, request: GenerateQuizRequest) -> AppResult<()> {
        let session = self.service.start_session(request).await?;
        *self.session.write().await = Some(session);
        Ok(())
    }

    pub async fn select_option(&self, option_index: usize) -> AppResult<()> {
        let mut guard = self.session.write().await;
        active_session(&mut guard)?.select_option(option_index)
    }

    pub async fn submit_answer(&self) -> AppResult<AnswerRecord> {
        let mut guard = self.session.write().await;
        active_session(&mut guard)?.submit_answer()
    }

    /// Moves past the explanation. A supplemental request raised by the
    /// checkpoint is dispatched in the background and never delays this call.
    pub async fn advance(&self) -> AppResult<AdvanceOutcome> {
        let outcome = {
            let mut guard = self.session.write().await;
            active_session(&mut guard)?.advance()?
        };

        if let Some(request) = outcome.supplemental.clone() {
            self.dispatch_supplemental(request).await;
        }
        Ok(outcome)
    }

    async fn dispatch_supplemental(&self, request: SupplementalRequest) {
        log::info!(
            "Requesting {} supplemental {} questions for session {}",
            request.count,
            request.difficulty,
            request.session_id
        );

        let service = Arc::clone(&self.service);
        let slot = Arc::clone(&self.session);
        let handle = tokio::spawn(async move {
            let questions = match service.supplemental_questions(&request).await {
                Ok(questions) => questions,
                Err(err) => {
                    log::warn!(
                        "Supplemental questions for session {} failed, continuing without them: {}",
                        request.session_id,
                        err
                    );
                    return;
                }
            };

            let mut guard = slot.write().await;
            match guard.as_mut() {
                Some(session) => {
                    session.append_supplemental(request.session_id, questions);
                }
                None => log::warn!(
                    "Discarding supplemental questions for session {}: quiz was reset",
                    request.session_id
                ),
            }
        });

        let mut in_flight = self.in_flight.lock().await;
        in_flight.retain(|h| !h.is_finished());
        in_flight.push(handle);
    }

    /// Number of supplemental requests that have not finished yet.
    pub async fn pending_supplemental(&self) -> usize {
        self.in_flight
            .lock()
            .await
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Waits for every supplemental request dispatched so far.
    pub async fn settle(&self) {
        let handles: Vec<JoinHandle<()>> = self.in_flight.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(err) = handle.await {
                log::error!("Supplemental question task failed: {}", err);
            }
        }
    }

    /// Asks the generator to explain the most recent answer, with the static
    /// fallback if it cannot.
    pub async fn explain_last_answer(&self) -> AppResult<String> {
        let request = {
            let guard = self.session.read().await;
            let session = guard
                .as_ref()
                .ok_or_else(|| AppError::InvalidTransition("no quiz in progress".to_string()))?;
            let record = session.last_answer().ok_or_else(|| {
                AppError::InvalidTransition("no answer has been submitted yet".to_string())
            })?;
            let question = session.question(&record.question_id).ok_or_else(|| {
                AppError::InternalError(format!("question {} is missing", record.question_id))
            })?;

            ExplainAnswerRequest {
                question: question.prompt.clone(),
                user_answer: question
                    .option(record.chosen_option_index)
                    .unwrap_or_default()
                    .to_string(),
                correct_answer: question.correct_option().to_string(),
                user_performance: session.score_percent(),
            }
        };

        self.service.explain_answer(&request).await
    }

    pub async fn results(&self) -> AppResult<ResultsReport> {
        let guard = self.session.read().await;
        let session = guard
            .as_ref()
            .ok_or_else(|| AppError::InvalidTransition("no quiz to report on".to_string()))?;
        Ok(ResultsAggregator::from_session(session).report())
    }

    /// Copy of the current session, if any.
    pub async fn session(&self) -> Option<QuizSession> {
        self.session.read().await.clone()
    }

    /// Abandons the quiz entirely. Batches still in flight are discarded
    /// when they arrive.
    pub async fn start_over(&self) {
        if let Some(session) = self.session.write().await.take() {
            log::info!("Learner started over, dropping session {}", session.id());
        }
    }

    /// Replaces the session with a fresh one over the same questions.
    pub async fn retake_quiz(&self) -> AppResult<()> {
        let mut guard = self.session.write().await;
        let previous = guard
            .as_ref()
            .ok_or_else(|| AppError::InvalidTransition("no quiz to retake".to_string()))?;
        let retaken = previous.retake()?;
        log::info!(
            "Retaking session {} as {} at {} difficulty",
            previous.id(),
            retaken.id(),
            retaken.active_difficulty()
        );
        *guard = Some(retaken);
        Ok(())
    }
}

fn active_session(slot: &mut Option<QuizSession>) -> AppResult<&mut QuizSession> {
    slot.as_mut()
        .ok_or_else(|| AppError::InvalidTransition("no quiz in progress".to_string()))
}
