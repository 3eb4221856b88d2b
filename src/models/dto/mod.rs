pub mod generated_question;
pub mod request;
pub mod response;
pub use generated_question::GeneratedQuestion;
pub use request::{ExplainAnswerRequest, GenerateQuizRequest};
pub use response::{ExplainAnswerResponse, GenerateQuizResponse, QuestionReview, ResultsReport};
