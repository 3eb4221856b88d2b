use crate::constants::{DEESCALATE_AT_SCORE, ESCALATE_AT_SCORE};
use crate::models::domain::Difficulty;

/// Maps the current difficulty and a score (0-100) to the next difficulty.
///
/// At or above 80 the quiz gets harder by one step, at or below 40 easier by
/// one step, and in between it stays put.
pub fn next_difficulty(current: Difficulty, score_percent: f64) -> Difficulty {
    if score_percent >= ESCALATE_AT_SCORE {
        match current {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium | Difficulty::Hard => Difficulty::Hard,
        }
    } else if score_percent <= DEESCALATE_AT_SCORE {
        match current {
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Easy | Difficulty::Medium => Difficulty::Easy,
        }
    } else {
        current
    }
}
