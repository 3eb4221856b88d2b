use std::collections::HashMap;

use crate::{
    constants::{STRONG_CONCEPT_ACCURACY, WEAK_CONCEPT_ACCURACY},
    models::{
        domain::{answer_record::rounded_percent, AnswerRecord, ConceptStat, Question},
        dto::{QuestionReview, ResultsReport},
    },
    services::quiz_session::QuizSession,
};

/// Read-only statistics over a finished (or in-progress) answer log.
///
/// Every method is a pure function of the log and the question set. An empty
/// log yields 0 for the score and the average time.
pub struct ResultsAggregator<'a> {
    answer_log: &'a [AnswerRecord],
    questions: HashMap<&'a str, &'a Question>,
}

impl<'a> ResultsAggregator<'a> {
    pub fn new(answer_log: &'a [AnswerRecord], questions: &'a [Question]) -> Self {
        Self {
            answer_log,
            questions: questions.iter().map(|q| (q.id.as_str(), q)).collect(),
        }
    }

    pub fn from_session(session: &'a QuizSession) -> Self {
        Self::new(session.answer_log(), session.questions())
    }

    pub fn total_answered(&self) -> usize {
        self.answer_log.len()
    }

    pub fn correct_count(&self) -> usize {
        self.answer_log.iter().filter(|r| r.is_correct).count()
    }

    pub fn overall_score_percent(&self) -> u8 {
        rounded_percent(self.correct_count(), self.total_answered())
    }

    pub fn average_time_seconds(&self) -> u64 {
        if self.answer_log.is_empty() {
            return 0;
        }
        let total_millis: u64 = self.answer_log.iter().map(|r| r.elapsed_millis).sum();
        (total_millis as f64 / self.answer_log.len() as f64 / 1000.0).round() as u64
    }

    /// Accuracy per concept, in order of first appearance. Labels are
    /// compared verbatim: "Osmosis" and "osmosis " are different concepts.
    pub fn concept_breakdown(&self) -> Vec<ConceptStat> {
        let mut order: Vec<&str> = Vec::new();
        let mut tallies: HashMap<&str, (usize, usize)> = HashMap::new();

        for record in self.answer_log {
            let Some(question) = self.questions.get(record.question_id.as_str()) else {
                log::debug!("No question {} for answer record, skipping", record.question_id);
                continue;
            };
            let concept = question.concept.as_str();
            let tally = tallies.entry(concept).or_insert_with(|| {
                order.push(concept);
                (0, 0)
            });
            tally.1 += 1;
            if record.is_correct {
                tally.0 += 1;
            }
        }

        order
            .into_iter()
            .map(|concept| {
                let (correct, total) = tallies[concept];
                ConceptStat::new(concept, correct, total)
            })
            .collect()
    }

    pub fn strong_concepts(&self) -> Vec<ConceptStat> {
        self.concept_breakdown()
            .into_iter()
            .filter(|c| c.accuracy_percent >= STRONG_CONCEPT_ACCURACY)
            .collect()
    }

    /// Concepts between 70% and 80% are neither weak nor strong.
    pub fn weak_concepts(&self) -> Vec<ConceptStat> {
        self.concept_breakdown()
            .into_iter()
            .filter(|c| c.accuracy_percent < WEAK_CONCEPT_ACCURACY)
            .collect()
    }

    pub fn study_tip(&self) -> String {
        study_tip(&self.weak_concepts())
    }

    pub fn score_message(&self) -> &'static str {
        score_message(self.overall_score_percent())
    }

    pub fn question_review(&self) -> Vec<QuestionReview> {
        self.answer_log
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let question = self.questions.get(record.question_id.as_str());
                QuestionReview {
                    number: position + 1,
                    question_id: record.question_id.clone(),
                    question_text: record.question_text.clone(),
                    your_answer: question
                        .and_then(|q| q.option(record.chosen_option_index))
                        .map(str::to_string),
                    correct_answer: question
                        .and_then(|q| q.option(record.correct_option_index))
                        .map(str::to_string),
                    is_correct: record.is_correct,
                    time_seconds: (record.elapsed_millis as f64 / 1000.0).round() as u64,
                }
            })
            .collect()
    }

    pub fn report(&self) -> ResultsReport {
        let concepts = self.concept_breakdown();
        let strong_concepts: Vec<ConceptStat> = concepts
            .iter()
            .filter(|c| c.accuracy_percent >= STRONG_CONCEPT_ACCURACY)
            .cloned()
            .collect();
        let weak_concepts: Vec<ConceptStat> = concepts
            .iter()
            .filter(|c| c.accuracy_percent < WEAK_CONCEPT_ACCURACY)
            .cloned()
            .collect();

        ResultsReport {
            score_percent: self.overall_score_percent(),
            correct_count: self.correct_count(),
            total_answered: self.total_answered(),
            average_time_seconds: self.average_time_seconds(),
            score_message: self.score_message().to_string(),
            study_tip: study_tip(&weak_concepts),
            concepts,
            strong_concepts,
            weak_concepts,
            review: self.question_review(),
        }
    }
}

pub fn study_tip(weak_concepts: &[ConceptStat]) -> String {
    if weak_concepts.is_empty() {
        return "Great job! You can challenge yourself with more advanced topics in this subject."
            .to_string();
    }

    let names: Vec<&str> = weak_concepts.iter().map(|c| c.concept.as_str()).collect();
    format!(
        "Focus on: {}. Consider reviewing these concepts with additional practice.",
        names.join(", ")
    )
}

pub fn score_message(score_percent: u8) -> &'static str {
    match score_percent {
        90..=u8::MAX => "Outstanding! You've mastered this content!",
        80..=89 => "Excellent work! You have a strong understanding!",
        70..=79 => "Good job! You're on the right track!",
        60..=69 => "Not bad! Keep practicing to improve!",
        _ => "Keep learning! Practice makes perfect!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Difficulty;
    use crate::test_utils::fixtures;
    use chrono::Utc;

    fn record(question: &Question, correct: bool, elapsed_millis: u64) -> AnswerRecord {
        let chosen = if correct { 0 } else { 2 };
        AnswerRecord::new(question, chosen, elapsed_millis, Utc::now())
    }

    #[test]
    fn concept_accuracy_for_one_of_two() {
        let questions = vec![
            fixtures::question("a", "photosynthesis", Difficulty::Easy),
            fixtures::question("b", "photosynthesis", Difficulty::Easy),
        ];
        let log = vec![record(&questions[0], true, 1000), record(&questions[1], false, 1000)];

        let breakdown = ResultsAggregator::new(&log, &questions).concept_breakdown();
        assert_eq!(breakdown, vec![ConceptStat::new("photosynthesis", 1, 2)]);
        assert_eq!(breakdown[0].accuracy_percent, 50);
    }

    #[test]
    fn empty_log_yields_zero_sentinels() {
        let questions = fixtures::questions(3);
        let aggregator = ResultsAggregator::new(&[], &questions);

        assert_eq!(aggregator.overall_score_percent(), 0);
        assert_eq!(aggregator.average_time_seconds(), 0);
        assert!(aggregator.concept_breakdown().is_empty());
        assert_eq!(
            aggregator.study_tip(),
            "Great job! You can challenge yourself with more advanced topics in this subject."
        );
    }

    #[test]
    fn overall_score_is_rounded() {
        let questions = fixtures::questions(3);
        let log = vec![
            record(&questions[0], true, 0),
            record(&questions[1], true, 0),
            record(&questions[2], false, 0),
        ];

        assert_eq!(ResultsAggregator::new(&log, &questions).overall_score_percent(), 67);
    }

    #[test]
    fn average_time_is_rounded_seconds() {
        let questions = fixtures::questions(2);
        let log = vec![record(&questions[0], true, 2000), record(&questions[1], true, 3400)];

        // 2.7s rounds to 3
        assert_eq!(ResultsAggregator::new(&log, &questions).average_time_seconds(), 3);
    }

    #[test]
    fn concept_labels_are_compared_verbatim() {
        let questions = vec![
            fixtures::question("a", "Osmosis", Difficulty::Easy),
            fixtures::question("b", "osmosis", Difficulty::Easy),
            fixtures::question("c", "osmosis ", Difficulty::Easy),
        ];
        let log: Vec<AnswerRecord> = questions.iter().map(|q| record(q, true, 0)).collect();

        let concepts: Vec<String> = ResultsAggregator::new(&log, &questions)
            .concept_breakdown()
            .into_iter()
            .map(|c| c.concept)
            .collect();
        assert_eq!(concepts, vec!["Osmosis", "osmosis", "osmosis "]);
    }

    #[test]
    fn breakdown_follows_first_appearance_and_skips_unknown_ids() {
        let questions = vec![
            fixtures::question("a", "light reactions", Difficulty::Easy),
            fixtures::question("b", "Calvin cycle", Difficulty::Easy),
            fixtures::question("c", "light reactions", Difficulty::Easy),
        ];
        let orphan = fixtures::question("gone", "chlorophyll", Difficulty::Easy);
        let log = vec![
            record(&questions[1], true, 0),
            record(&questions[0], false, 0),
            record(&orphan, true, 0),
            record(&questions[2], true, 0),
        ];

        let breakdown = ResultsAggregator::new(&log, &questions).concept_breakdown();
        assert_eq!(
            breakdown,
            vec![
                ConceptStat::new("Calvin cycle", 1, 1),
                ConceptStat::new("light reactions", 1, 2),
            ]
        );
    }

    #[test]
    fn breakdown_is_idempotent() {
        let questions = fixtures::questions(4);
        let log: Vec<AnswerRecord> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| record(q, i % 2 == 0, 500))
            .collect();
        let aggregator = ResultsAggregator::new(&log, &questions);

        assert_eq!(aggregator.concept_breakdown(), aggregator.concept_breakdown());
        assert_eq!(aggregator.report(), aggregator.report());
    }

    #[test]
    fn strong_and_weak_buckets_leave_a_gap() {
        // 4/5 = 80 strong, 3/4 = 75 neither, 2/3 = 67 weak
        let mut questions = Vec::new();
        let mut log = Vec::new();
        for (concept, correct, total) in [("strong", 4, 5), ("middle", 3, 4), ("weak", 2, 3)] {
            for n in 0..total {
                let q = fixtures::question(&format!("{}-{}", concept, n), concept, Difficulty::Medium);
                log.push(record(&q, n < correct, 0));
                questions.push(q);
            }
        }
        let aggregator = ResultsAggregator::new(&log, &questions);

        let strong: Vec<String> = aggregator.strong_concepts().into_iter().map(|c| c.concept).collect();
        let weak: Vec<String> = aggregator.weak_concepts().into_iter().map(|c| c.concept).collect();
        assert_eq!(strong, vec!["strong"]);
        assert_eq!(weak, vec!["weak"]);
        assert_eq!(
            aggregator.study_tip(),
            "Focus on: weak. Consider reviewing these concepts with additional practice."
        );
    }

    #[test]
    fn study_tip_names_every_weak_concept() {
        let weak = vec![
            ConceptStat::new("Calvin cycle", 0, 2),
            ConceptStat::new("thylakoids", 1, 3),
        ];

        assert_eq!(
            study_tip(&weak),
            "Focus on: Calvin cycle, thylakoids. Consider reviewing these concepts with additional practice."
        );
    }

    #[test]
    fn score_message_bands() {
        assert_eq!(score_message(100), "Outstanding! You've mastered this content!");
        assert_eq!(score_message(80), "Excellent work! You have a strong understanding!");
        assert_eq!(score_message(79), "Good job! You're on the right track!");
        assert_eq!(score_message(60), "Not bad! Keep practicing to improve!");
        assert_eq!(score_message(0), "Keep learning! Practice makes perfect!");
    }

    #[test]
    fn review_shows_chosen_and_correct_option_texts() {
        let questions = fixtures::questions(2);
        let log = vec![record(&questions[0], true, 1400), record(&questions[1], false, 600)];

        let review = ResultsAggregator::new(&log, &questions).question_review();
        assert_eq!(review.len(), 2);
        assert_eq!(review[0].number, 1);
        assert_eq!(review[0].time_seconds, 1);
        assert_eq!(review[1].your_answer.as_deref(), Some("Wrong B"));
        assert_eq!(review[1].correct_answer.as_deref(), Some("Right"));
        assert!(!review[1].is_correct);
    }

    #[test]
    fn report_bundles_statistics() {
        let questions = fixtures::questions(2);
        let log = vec![record(&questions[0], true, 1000), record(&questions[1], true, 3000)];

        let report = ResultsAggregator::new(&log, &questions).report();
        assert_eq!(report.score_percent, 100);
        assert_eq!(report.correct_count, 2);
        assert_eq!(report.average_time_seconds, 2);
        assert_eq!(report.strong_concepts.len(), 1);
        assert!(report.weak_concepts.is_empty());
        assert_eq!(report.review.len(), 2);
    }
}
