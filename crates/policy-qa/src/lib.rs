#![allow(missing_docs)]

pub mod answers;
pub mod builtin;
pub mod error;
pub mod flow;
pub mod render;
pub mod report;
pub mod spec;
pub mod validate;

pub use answers::{Answer, AnswerSheet};
pub use builtin::security_policy;
pub use error::{CatalogError, FlowError};
pub use flow::{CompletionReason, FlowState, Session};
pub use render::{
    OptionView, QuestionPrompt, QuestionView, ViewStatus, build_view, render_json, render_text,
};
pub use report::{SectionGroup, generate as generate_report, group_by_section};
pub use spec::{Catalog, ContinueRule, Question, QuestionOption};
pub use validate::{Severity, ValidationIssue, ValidationReport, validate};
