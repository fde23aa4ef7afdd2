use thiserror::Error;

use crate::validate::ValidationReport;

/// Rejections raised by flow engine operations.
///
/// Every variant is returned before the session is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("question index {index} is out of range (catalog has {len} questions)")]
    OutOfRange { index: usize, len: usize },
    #[error("option '{option_id}' is not offered by question '{question_id}'")]
    InvalidOption {
        question_id: String,
        option_id: String,
    },
    #[error("{action} is not allowed: {reason}")]
    NotAllowed {
        action: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("catalog is invalid: {0}")]
    Invalid(ValidationReport),
}
