use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    clock::{elapsed_millis, Clock},
    config::QuizSettings,
    constants::{CHECKPOINT_HIGH_SCORE, CHECKPOINT_LOW_SCORE},
    errors::{AppError, AppResult},
    models::{
        domain::{answer_record::rounded_percent, AnswerRecord, Difficulty, Question},
        dto::GenerateQuizRequest,
    },
    services::difficulty_policy::next_difficulty,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    AwaitingAnswer { index: usize },
    ShowingExplanation { index: usize },
    Completed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::AwaitingAnswer { index } => {
                write!(f, "awaiting an answer to question {}", index + 1)
            }
            SessionState::ShowingExplanation { index } => {
                write!(f, "showing the explanation for question {}", index + 1)
            }
            SessionState::Completed => write!(f, "completed"),
        }
    }
}

/// Outcome of the adaptive checkpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointDecision {
    pub score_percent: f64,
    pub target: Option<Difficulty>,
}

/// Ask for more questions at a new difficulty. Carries the id of the session
/// that asked so a late answer can be matched against the live session.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplementalRequest {
    pub session_id: Uuid,
    pub content: String,
    pub difficulty: Difficulty,
    pub count: u32,
    pub previous_performance: f64,
}

impl SupplementalRequest {
    pub fn to_generate_request(&self) -> GenerateQuizRequest {
        GenerateQuizRequest::new(self.content.clone(), self.difficulty, self.count)
            .with_previous_performance(self.previous_performance)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceOutcome {
    pub state: SessionState,
    pub checkpoint: Option<CheckpointDecision>,
    pub supplemental: Option<SupplementalRequest>,
}

/// One learner's pass through a question sequence.
///
/// Questions are strictly forward-only. The question list only grows, the
/// answer log is append-only, and `answer_log().len() == current_index()`
/// whenever the session awaits an answer or is completed.
#[derive(Clone)]
pub struct QuizSession {
    id: Uuid,
    source_content: String,
    questions: Vec<Question>,
    current_index: usize,
    state: SessionState,
    selection: Option<usize>,
    answer_log: Vec<AnswerRecord>,
    running_score: u32,
    active_difficulty: Difficulty,
    checkpoint_fired: bool,
    presented_at: DateTime<Utc>,
    settings: QuizSettings,
    clock: Arc<dyn Clock>,
}

impl QuizSession {
    pub fn new(
        source_content: impl Into<String>,
        difficulty: Difficulty,
        questions: Vec<Question>,
        settings: QuizSettings,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::ValidationError(
                "A quiz needs at least one question".to_string(),
            ));
        }

        let presented_at = clock.now();
        let session = Self {
            id: Uuid::new_v4(),
            source_content: source_content.into(),
            questions,
            current_index: 0,
            state: SessionState::AwaitingAnswer { index: 0 },
            selection: None,
            answer_log: Vec::new(),
            running_score: 0,
            active_difficulty: difficulty,
            checkpoint_fired: false,
            presented_at,
            settings,
            clock,
        };

        log::info!(
            "Started quiz session {} with {} {} questions",
            session.id,
            session.questions.len(),
            difficulty
        );
        Ok(session)
    }

    /// A fresh session over the same questions. The starting difficulty
    /// follows the policy applied to this session's overall score.
    pub fn retake(&self) -> AppResult<Self> {
        let difficulty = self.recommended_difficulty();
        Self::new(
            self.source_content.clone(),
            difficulty,
            self.questions.clone(),
            self.settings,
            Arc::clone(&self.clock),
        )
    }

    pub fn select_option(&mut self, option_index: usize) -> AppResult<()> {
        let index = match self.state {
            SessionState::AwaitingAnswer { index } => index,
            other => {
                return Err(AppError::InvalidTransition(format!(
                    "cannot select an option while {}",
                    other
                )))
            }
        };

        if self.questions[index].option(option_index).is_none() {
            return Err(AppError::ValidationError(format!(
                "Option {} does not exist; choose 0-{}",
                option_index,
                self.questions[index].options.len() - 1
            )));
        }

        self.selection = Some(option_index);
        Ok(())
    }

    pub fn submit_answer(&mut self) -> AppResult<AnswerRecord> {
        let index = match self.state {
            SessionState::AwaitingAnswer { index } => index,
            other => {
                return Err(AppError::InvalidTransition(format!(
                    "cannot submit an answer while {}",
                    other
                )))
            }
        };
        let chosen = self.selection.ok_or_else(|| {
            AppError::InvalidTransition("cannot submit an answer without a selection".to_string())
        })?;

        let now = self.clock.now();
        let record = AnswerRecord::new(
            &self.questions[index],
            chosen,
            elapsed_millis(self.presented_at, now),
            now,
        );
        if record.is_correct {
            self.running_score += 1;
        }
        self.answer_log.push(record.clone());
        self.state = SessionState::ShowingExplanation { index };

        Ok(record)
    }

    pub fn advance(&mut self) -> AppResult<AdvanceOutcome> {
        let index = match self.state {
            SessionState::ShowingExplanation { index } => index,
            other => {
                return Err(AppError::InvalidTransition(format!(
                    "cannot advance while {}",
                    other
                )))
            }
        };

        let checkpoint = self.evaluate_checkpoint(index);
        self.selection = None;

        if index + 1 >= self.questions.len() {
            self.current_index = self.questions.len();
            self.state = SessionState::Completed;
            log::info!(
                "Quiz session {} completed with {}/{} correct",
                self.id,
                self.running_score,
                self.answer_log.len()
            );
            return Ok(AdvanceOutcome {
                state: self.state,
                checkpoint,
                supplemental: None,
            });
        }

        self.current_index = index + 1;
        self.state = SessionState::AwaitingAnswer {
            index: self.current_index,
        };
        self.presented_at = self.clock.now();

        let supplemental = checkpoint
            .and_then(|decision| decision.target)
            .map(|difficulty| SupplementalRequest {
                session_id: self.id,
                content: self.source_content.clone(),
                difficulty,
                count: self.settings.supplemental_batch_size,
                previous_performance: self.score_percent(),
            });

        Ok(AdvanceOutcome {
            state: self.state,
            checkpoint,
            supplemental,
        })
    }

    // Fires at most once per session, when advancing past the checkpoint index.
    fn evaluate_checkpoint(&mut self, index: usize) -> Option<CheckpointDecision> {
        if self.checkpoint_fired || index != self.settings.checkpoint_index {
            return None;
        }
        self.checkpoint_fired = true;

        let score_percent = self.score_percent();
        let target = if score_percent < CHECKPOINT_LOW_SCORE {
            Some(Difficulty::Easy)
        } else if score_percent > CHECKPOINT_HIGH_SCORE {
            Some(Difficulty::Hard)
        } else {
            None
        };

        if let Some(difficulty) = target {
            self.active_difficulty = difficulty;
        }
        log::info!(
            "Checkpoint for session {} at {:.0}%: {}",
            self.id,
            score_percent,
            target.map_or("no change".to_string(), |d| format!("switching to {}", d))
        );

        Some(CheckpointDecision {
            score_percent,
            target,
        })
    }

    /// Appends a generated batch to the tail. Returns false, leaving the
    /// session untouched, if the batch belongs to another session or this
    /// one has already completed.
    pub fn append_supplemental(&mut self, session_id: Uuid, questions: Vec<Question>) -> bool {
        if session_id != self.id {
            log::warn!(
                "Discarding {} questions meant for session {}; current session is {}",
                questions.len(),
                session_id,
                self.id
            );
            return false;
        }
        if self.state == SessionState::Completed {
            log::warn!(
                "Discarding {} questions for completed session {}",
                questions.len(),
                self.id
            );
            return false;
        }

        log::info!(
            "Appending {} supplemental questions to session {}",
            questions.len(),
            self.id
        );
        self.questions.extend(questions);
        true
    }

    /// Percentage of answered questions that were correct, unrounded.
    pub fn score_percent(&self) -> f64 {
        if self.answer_log.is_empty() {
            return 0.0;
        }
        100.0 * f64::from(self.running_score) / self.answer_log.len() as f64
    }

    pub fn recommended_difficulty(&self) -> Difficulty {
        let score = rounded_percent(self.running_score as usize, self.answer_log.len());
        next_difficulty(self.active_difficulty, f64::from(score))
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::AwaitingAnswer { index } | SessionState::ShowingExplanation { index } => {
                self.questions.get(index)
            }
            SessionState::Completed => None,
        }
    }

    pub fn last_answer(&self) -> Option<&AnswerRecord> {
        self.answer_log.last()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source_content(&self) -> &str {
        &self.source_content
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    pub fn running_score(&self) -> u32 {
        self.running_score
    }

    pub fn active_difficulty(&self) -> Difficulty {
        self.active_difficulty
    }

    pub fn checkpoint_fired(&self) -> bool {
        self.checkpoint_fired
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }
}
