pub mod catalog;
pub mod question;
pub mod rule;

pub use catalog::Catalog;
pub use question::{Question, QuestionOption};
pub use rule::ContinueRule;
