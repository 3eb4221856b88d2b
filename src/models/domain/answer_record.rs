use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{Difficulty, Question};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: String,
    pub question_text: String, // snapshot at answer time
    pub chosen_option_index: usize,
    pub correct_option_index: usize,
    pub is_correct: bool,
    pub elapsed_millis: u64,
    pub difficulty: Difficulty,
    pub answered_at: DateTime<Utc>,
}

impl AnswerRecord {
    pub fn new(
        question: &Question,
        chosen_option_index: usize,
        elapsed_millis: u64,
        answered_at: DateTime<Utc>,
    ) -> Self {
        AnswerRecord {
            question_id: question.id.clone(),
            question_text: question.prompt.clone(),
            chosen_option_index,
            correct_option_index: question.correct_option_index,
            is_correct: question.is_correct(chosen_option_index),
            elapsed_millis,
            difficulty: question.difficulty,
            answered_at,
        }
    }
}

/// Per-concept accuracy derived from an answer log. Never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptStat {
    pub concept: String,
    pub correct_count: usize,
    pub total_count: usize,
    pub accuracy_percent: u8,
}

impl ConceptStat {
    pub fn new(concept: impl Into<String>, correct_count: usize, total_count: usize) -> Self {
        ConceptStat {
            concept: concept.into(),
            correct_count,
            total_count,
            accuracy_percent: rounded_percent(correct_count, total_count),
        }
    }
}

/// `round(100 * part / whole)`, 0 when `whole` is 0.
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round().min(100.0) as u8
}
