use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Difficulty;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(length(
        min = 50,
        message = "Content too short. Please provide at least 50 characters."
    ))]
    pub content: String,

    pub difficulty: Difficulty,

    #[validate(range(min = 1, message = "questionCount must be a positive integer"))]
    pub question_count: u32,

    #[validate(range(min = 0.0, max = 100.0, message = "previousPerformance must be 0-100"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_performance: Option<f64>,
}

impl GenerateQuizRequest {
    pub fn new(content: impl Into<String>, difficulty: Difficulty, question_count: u32) -> Self {
        Self {
            content: content.into(),
            difficulty,
            question_count,
            previous_performance: None,
        }
    }

    pub fn with_previous_performance(mut self, percent: f64) -> Self {
        self.previous_performance = Some(percent);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExplainAnswerRequest {
    #[validate(length(min = 1, message = "question must not be empty"))]
    pub question: String,

    #[validate(length(min = 1, message = "userAnswer must not be empty"))]
    pub user_answer: String,

    #[validate(length(min = 1, message = "correctAnswer must not be empty"))]
    pub correct_answer: String,

    #[validate(range(min = 0.0, max = 100.0, message = "userPerformance must be 0-100"))]
    pub user_performance: f64,
}
