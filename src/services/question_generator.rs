use async_trait::async_trait;

use crate::errors::GenerationError;
use crate::models::domain::Question;
use crate::models::dto::{ExplainAnswerRequest, GenerateQuizRequest};

/// The external question generator. Callers validate requests before
/// invoking it; implementations own output validation and normalization.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Produces questions stamped with `request.difficulty` and fresh ids.
    async fn generate(&self, request: &GenerateQuizRequest)
        -> Result<Vec<Question>, GenerationError>;

    async fn explain(&self, request: &ExplainAnswerRequest) -> Result<String, GenerationError>;
}
