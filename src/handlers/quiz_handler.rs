use actix_web::{error::JsonPayloadError, get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        ExplainAnswerRequest, ExplainAnswerResponse, GenerateQuizRequest, GenerateQuizResponse,
    },
};

#[post("/api/generate-quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let questions = state
        .quiz_service
        .generate_questions(&request)
        .await
        .map_err(|err| {
            log::error!("Quiz generation failed: {}", err);
            err
        })?;

    Ok(HttpResponse::Ok().json(GenerateQuizResponse { questions }))
}

#[post("/api/explain-answer")]
pub async fn explain_answer(
    state: web::Data<AppState>,
    request: web::Json<ExplainAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let explanation = state
        .quiz_service
        .explain_answer(&request.into_inner())
        .await
        .map_err(|err| {
            log::error!("Explanation request rejected: {}", err);
            err
        })?;

    Ok(HttpResponse::Ok().json(ExplainAnswerResponse { explanation }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Body extraction errors become validation errors so every 400 has the same shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        log::warn!("Rejected request body: {}", err);
        AppError::ValidationError(err.to_string()).into()
    })
}
