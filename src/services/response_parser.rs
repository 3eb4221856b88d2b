use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::constants::OPTION_COUNT;
use crate::errors::GenerationError;
use crate::models::domain::{Difficulty, Question};
use crate::models::dto::GeneratedQuestion;

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z]*\s*(.*?)\s*```\s*$")
        .expect("CODE_FENCE is a valid regex pattern")
});

/// Turns raw generator text into questions, or fails the whole batch.
///
/// Accepts a JSON array of items, or an object whose `questions` field is
/// one, optionally wrapped in a Markdown code fence. Every question gets a
/// fresh id and the requested difficulty.
pub fn parse_generated_questions(
    raw: &str,
    difficulty: Difficulty,
) -> Result<Vec<Question>, GenerationError> {
    let payload = strip_code_fence(raw);
    if payload.is_empty() {
        return Err(malformed("generator returned no content"));
    }

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| malformed(format!("payload is not valid JSON: {}", e)))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => return Err(malformed("expected a JSON array of questions")),
        },
        _ => return Err(malformed("expected a JSON array of questions")),
    };

    if items.is_empty() {
        return Err(malformed("generator returned an empty question list"));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let generated: GeneratedQuestion = serde_json::from_value(item)
                .map_err(|e| malformed(format!("question {}: {}", index + 1, e)))?;
            normalize_question(generated, difficulty)
                .map_err(|reason| malformed(format!("question {}: {}", index + 1, reason)))
        })
        .collect()
}

fn normalize_question(
    generated: GeneratedQuestion,
    difficulty: Difficulty,
) -> Result<Question, String> {
    let prompt = generated.question.trim().to_string();
    if prompt.is_empty() {
        return Err("question text is empty".to_string());
    }

    if generated.options.len() != OPTION_COUNT {
        return Err(format!(
            "expected {} options, got {}",
            OPTION_COUNT,
            generated.options.len()
        ));
    }
    if generated.options.iter().any(|option| option.trim().is_empty()) {
        return Err("options must not be empty".to_string());
    }

    let concept = generated.concept.trim().to_string();
    if concept.is_empty() {
        return Err("concept is empty".to_string());
    }

    let correct_option_index = usize::try_from(generated.correct_answer)
        .ok()
        .filter(|index| *index < OPTION_COUNT)
        .ok_or_else(|| {
            format!(
                "correctAnswer {} is outside 0..{}",
                generated.correct_answer, OPTION_COUNT
            )
        })?;

    let options: Vec<String> = generated
        .options
        .into_iter()
        .map(|option| option.trim().to_string())
        .collect();
    let options: [String; OPTION_COUNT] = options
        .try_into()
        .map_err(|_| format!("expected {} options", OPTION_COUNT))?;

    Ok(Question {
        id: Uuid::new_v4().to_string(),
        prompt,
        options,
        correct_option_index,
        difficulty,
        explanation: generated.explanation.trim().to_string(),
        concept,
    })
}

fn strip_code_fence(raw: &str) -> &str {
    match CODE_FENCE.captures(raw).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => raw.trim(),
    }
}

fn malformed(reason: impl Into<String>) -> GenerationError {
    GenerationError::MalformedResponse(reason.into())
}
