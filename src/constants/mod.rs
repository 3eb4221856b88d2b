pub mod prompts;

/// Zero-based index of the question whose advance triggers the checkpoint.
pub const CHECKPOINT_INDEX: usize = 2;
pub const SUPPLEMENTAL_BATCH_SIZE: u32 = 3;

/// Checkpoint bounds are strict: exactly 40% or 80% requests nothing.
pub const CHECKPOINT_LOW_SCORE: f64 = 40.0;
pub const CHECKPOINT_HIGH_SCORE: f64 = 80.0;

pub const ESCALATE_AT_SCORE: f64 = 80.0;
pub const DEESCALATE_AT_SCORE: f64 = 40.0;

pub const STRONG_CONCEPT_ACCURACY: u8 = 80;
pub const WEAK_CONCEPT_ACCURACY: u8 = 70;

pub const OPTION_COUNT: usize = 4;

pub const FALLBACK_EXPLANATION: &str =
    "Good try! The correct answer helps you understand this concept better.";
pub const EMPTY_EXPLANATION: &str = "Great effort! Keep learning!";
