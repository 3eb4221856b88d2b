use serde::{Deserialize, Serialize};

use crate::models::domain::{ConceptStat, Question};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateQuizResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainAnswerResponse {
    pub explanation: String,
}

/// One answered question as shown on the results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub number: usize,
    pub question_id: String,
    pub question_text: String,
    pub your_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub is_correct: bool,
    pub time_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsReport {
    pub score_percent: u8,
    pub correct_count: usize,
    pub total_answered: usize,
    pub average_time_seconds: u64,
    pub score_message: String,
    pub concepts: Vec<ConceptStat>,
    pub strong_concepts: Vec<ConceptStat>,
    pub weak_concepts: Vec<ConceptStat>,
    pub study_tip: String,
    pub review: Vec<QuestionReview>,
}
