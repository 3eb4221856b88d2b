pub mod quiz_handler;

use actix_web::web;

pub use quiz_handler::{explain_answer, generate_quiz, health_check, json_config};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(generate_quiz)
        .service(explain_answer);
}
