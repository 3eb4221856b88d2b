use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    constants::{
        prompts::{explanation_prompt, quiz_generation_prompt},
        EMPTY_EXPLANATION,
    },
    errors::GenerationError,
    models::{
        domain::Question,
        dto::{ExplainAnswerRequest, GenerateQuizRequest},
    },
    services::{question_generator::QuestionGenerator, response_parser::parse_generated_questions},
};

/// Question generator backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiQuestionGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    generation_temperature: f32,
    generation_max_tokens: u32,
    explanation_temperature: f32,
    explanation_max_tokens: u32,
}

impl OpenAiQuestionGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
            generation_temperature: config.generation_temperature,
            generation_max_tokens: config.generation_max_tokens,
            explanation_temperature: config.explanation_temperature,
            explanation_max_tokens: config.explanation_max_tokens,
        }
    }

    async fn complete(
        &self,
        prompt: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Option<String>, GenerationError> {
        log::debug!(
            "Sending {} character prompt to model {}",
            prompt.len(),
            self.model
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens,
        };

        let response: ChatResponse = self.client.chat().create_byot(request).await?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[async_trait]
impl QuestionGenerator for OpenAiQuestionGenerator {
    async fn generate(
        &self,
        request: &GenerateQuizRequest,
    ) -> Result<Vec<Question>, GenerationError> {
        let completion = self
            .complete(
                quiz_generation_prompt(request),
                self.generation_temperature,
                self.generation_max_tokens,
            )
            .await?;

        questions_from_completion(completion, request)
    }

    async fn explain(&self, request: &ExplainAnswerRequest) -> Result<String, GenerationError> {
        let completion = self
            .complete(
                explanation_prompt(request),
                self.explanation_temperature,
                self.explanation_max_tokens,
            )
            .await?;

        Ok(explanation_from_completion(completion))
    }
}

/// Parses a generation completion. A missing or blank completion is malformed;
/// a count different from the one requested is only logged.
fn questions_from_completion(
    completion: Option<String>,
    request: &GenerateQuizRequest,
) -> Result<Vec<Question>, GenerationError> {
    let content = completion
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            GenerationError::MalformedResponse("no content received from model".to_string())
        })?;

    let questions = parse_generated_questions(&content, request.difficulty)?;
    if questions.len() != request.question_count as usize {
        log::warn!(
            "Requested {} questions but the model returned {}",
            request.question_count,
            questions.len()
        );
    }

    Ok(questions)
}

fn explanation_from_completion(completion: Option<String>) -> String {
    completion
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| EMPTY_EXPLANATION.to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Difficulty;

    #[test]
    fn chat_request_serializes_like_chat_completions_body() {
        let request = ChatRequest {
            model: "gpt-4".to_string(),
            messages: vec![ChatMessage {
                role: "user",
                content: "hello".to_string(),
            }],
            temperature: 0.7,
            max_tokens: 2000,
        };
        let json = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 2000);
    }

    #[test]
    fn chat_response_tolerates_missing_content() {
        let json = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).expect("response should parse");

        assert!(response.choices[0].message.content.is_none());
    }

    const ONE_QUESTION: &str = r#"[{
        "question": "What splits water during the light reactions?",
        "options": ["Photosystem II", "Rubisco", "ATP synthase", "Ferredoxin"],
        "correctAnswer": 0,
        "explanation": "Photosystem II oxidizes water.",
        "concept": "light reactions"
    }]"#;

    fn request(count: u32) -> GenerateQuizRequest {
        GenerateQuizRequest::new(crate::test_utils::SAMPLE_CONTENT, Difficulty::Hard, count)
    }

    #[test]
    fn missing_or_blank_completion_is_malformed() {
        for completion in [None, Some(String::new()), Some("  \n ".to_string())] {
            let result = questions_from_completion(completion, &request(1));
            assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
        }
    }

    #[test]
    fn count_mismatch_still_returns_questions() {
        let questions = questions_from_completion(Some(ONE_QUESTION.to_string()), &request(3))
            .expect("a short batch is not an error");

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].difficulty, Difficulty::Hard);
    }

    #[test]
    fn blank_explanation_becomes_encouragement() {
        assert_eq!(explanation_from_completion(None), EMPTY_EXPLANATION);
        assert_eq!(explanation_from_completion(Some("   ".to_string())), EMPTY_EXPLANATION);
        assert_eq!(
            explanation_from_completion(Some("  Water is split at PSII. ".to_string())),
            "Water is split at PSII."
        );
    }

    #[test]
    fn generator_builds_from_config() {
        let config = Config::test_config();
        let generator = OpenAiQuestionGenerator::new(&config);

        assert_eq!(generator.model, "gpt-test");
        assert_eq!(generator.explanation_max_tokens, 200);
    }
}
