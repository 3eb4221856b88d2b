use serde::{Deserialize, Serialize};

use crate::constants::OPTION_COUNT;
use crate::models::domain::Difficulty;

/// A multiple-choice question. Never mutated once the generator client has
/// produced it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: [String; OPTION_COUNT],
    pub correct_option_index: usize,
    pub difficulty: Difficulty,
    pub explanation: String,
    pub concept: String,
}

impl Question {
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    pub fn correct_option(&self) -> &str {
        self.option(self.correct_option_index).unwrap_or_default()
    }

    pub fn is_correct(&self, chosen_option_index: usize) -> bool {
        chosen_option_index == self.correct_option_index
    }
}
