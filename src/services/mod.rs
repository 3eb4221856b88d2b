pub mod adaptive_quiz;
pub mod difficulty_policy;
pub mod model_service;
pub mod question_generator;
pub mod quiz_service;
pub mod quiz_session;
pub mod response_parser;
pub mod results_aggregator;
