use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::clock::Clock;
use crate::models::domain::{Difficulty, Question};

pub const SAMPLE_CONTENT: &str = "Photosynthesis is the process by which plants and other \
    organisms convert light energy into chemical energy. This process occurs in chloroplasts, \
    specifically in structures called thylakoids. The process involves two main stages: the \
    light reactions and the Calvin cycle.";

pub mod fixtures {
    use super::*;

    /// A question whose correct option is always index 0.
    pub fn question(id: &str, concept: &str, difficulty: Difficulty) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Question about {}?", concept),
            options: [
                "Right".to_string(),
                "Wrong A".to_string(),
                "Wrong B".to_string(),
                "Wrong C".to_string(),
            ],
            correct_option_index: 0,
            difficulty,
            explanation: format!("Because of {}.", concept),
            concept: concept.to_string(),
        }
    }

    /// `count` medium questions with ids `q1..`, all on the same concept.
    pub fn questions(count: usize) -> Vec<Question> {
        (1..=count)
            .map(|n| question(&format!("q{}", n), "photosynthesis", Difficulty::Medium))
            .collect()
    }

    pub fn questions_with_prefix(prefix: &str, count: usize, difficulty: Difficulty) -> Vec<Question> {
        (1..=count)
            .map(|n| question(&format!("{}{}", prefix, n), "photosynthesis", difficulty))
            .collect()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()),
        }
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + Duration::milliseconds(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_fixtures_questions() {
        let questions = questions(3);
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].id, "q1");
        assert_eq!(questions[2].id, "q3");
        assert!(questions.iter().all(|q| q.correct_option_index == 0));
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance_millis(2500);

        assert_eq!((clock.now() - start).num_milliseconds(), 2500);
        assert!(SAMPLE_CONTENT.len() >= 50);
    }
}
