pub mod answer_record;
pub mod difficulty;
pub mod question;
pub use answer_record::{AnswerRecord, ConceptStat};
pub use difficulty::Difficulty;
pub use question::Question;
