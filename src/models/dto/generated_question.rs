use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One item as the language model is instructed to emit it. Anything beyond
/// these fields (including a `difficulty` label) is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    /// Question text ending with a question mark.
    pub question: String,
    /// Exactly four answer options.
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: i64,
    /// Brief explanation of why the correct option is right.
    pub explanation: String,
    /// Main concept being tested.
    pub concept: String,
}

/// JSON schema of a single generated item, embedded in the generation prompt.
pub fn generated_question_schema() -> String {
    let schema = schemars::schema_for!(GeneratedQuestion);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_lists_camel_case_fields() {
        let schema = generated_question_schema();

        assert!(schema.contains("correctAnswer"));
        assert!(schema.contains("concept"));
        assert!(!schema.contains("correct_answer"));
    }

    #[test]
    fn generated_question_ignores_generator_difficulty_label() {
        let json = r#"{"question":"Q?","options":["a","b","c","d"],"correctAnswer":2,
            "explanation":"because","concept":"c","difficulty":"hard"}"#;
        let parsed: GeneratedQuestion = serde_json::from_str(json).expect("should parse");

        assert_eq!(parsed.correct_answer, 2);
    }
}
