use std::env;
use secrecy::{ExposeSecret, SecretString};

use crate::constants::{CHECKPOINT_INDEX, SUPPLEMENTAL_BATCH_SIZE};
use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub generation_temperature: f32,
    pub generation_max_tokens: u32,
    pub explanation_temperature: f32,
    pub explanation_max_tokens: u32,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub quiz: QuizSettings,
}

/// Knobs of the adaptive checkpoint. Defaults reproduce the fixed rule:
/// evaluate once when advancing past the third question, request three more.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    pub checkpoint_index: usize,
    pub supplemental_batch_size: u32,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            checkpoint_index: CHECKPOINT_INDEX,
            supplemental_batch_size: SUPPLEMENTAL_BATCH_SIZE,
        }
    }
}

impl QuizSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            checkpoint_index: parse_env("QUIZ_CHECKPOINT_INDEX")
                .unwrap_or(defaults.checkpoint_index),
            supplemental_batch_size: parse_env("QUIZ_SUPPLEMENTAL_BATCH_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.supplemental_batch_size),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            generation_temperature: parse_env("QUIZ_GENERATION_TEMPERATURE").unwrap_or(0.7),
            generation_max_tokens: parse_env("QUIZ_GENERATION_MAX_TOKENS").unwrap_or(2000),
            explanation_temperature: parse_env("EXPLANATION_TEMPERATURE").unwrap_or(0.8),
            explanation_max_tokens: parse_env("EXPLANATION_MAX_TOKENS").unwrap_or(200),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT").unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            quiz: QuizSettings::from_env(),
        }
    }

    /// Checks that the generator can actually be reached with this configuration.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_API_KEY is not set; quiz generation requests will fail".to_string(),
            ));
        }

        if self.openai_model.trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_MODEL must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://127.0.0.1:9/v1".to_string(),
            openai_model: "gpt-test".to_string(),
            generation_temperature: 0.7,
            generation_max_tokens: 2000,
            explanation_temperature: 0.8,
            explanation_max_tokens: 200,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "*".to_string(),
            quiz: QuizSettings::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
