use serde::Serialize;
use serde_json::Value;

use crate::flow::{CompletionReason, Session};
use crate::spec::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    /// The current question awaits an answer.
    NeedInput,
    /// The session completed; a report can be generated.
    Complete,
}

impl ViewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewStatus::NeedInput => "need_input",
            ViewStatus::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    /// 1-based index for numbered pickers.
    pub index: usize,
    pub id: String,
    pub text: String,
    pub exits: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionPrompt {
    pub id: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub options: Vec<OptionView>,
}

/// Presentation-neutral snapshot of a session, consumed by every front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub catalog_id: String,
    pub title: String,
    pub status: ViewStatus,
    pub position: usize,
    pub total: usize,
    pub progress_fraction: f64,
    pub can_go_back: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionPrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionReason>,
}

pub fn build_view(catalog: &Catalog, session: &Session) -> QuestionView {
    let question = session
        .current_question(catalog)
        .map(|question| QuestionPrompt {
            id: question.id.clone(),
            prompt: question.prompt.clone(),
            section: question.section.clone(),
            options: question
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| OptionView {
                    index: index + 1,
                    id: option.id.clone(),
                    text: option.text.clone(),
                    exits: option.exit_workflow,
                })
                .collect(),
        });

    let status = if session.is_complete() {
        ViewStatus::Complete
    } else {
        ViewStatus::NeedInput
    };

    QuestionView {
        catalog_id: catalog.id.clone(),
        title: catalog.title.clone(),
        status,
        position: session.position(),
        total: catalog.len(),
        progress_fraction: session.progress_fraction(catalog),
        can_go_back: session.can_go_back(),
        question,
        completion: session.completion().cloned(),
    }
}

/// Render the view for a terminal.
pub fn render_text(view: &QuestionView) -> String {
    let mut lines = vec![view.title.clone()];

    match &view.question {
        Some(question) => {
            lines.push(format!(
                "Question {} of {}: {}",
                view.position + 1,
                view.total,
                question.prompt
            ));
            for option in &question.options {
                lines.push(format!("  {}) {}", option.index, option.text));
            }
        }
        None => {
            let summary = match &view.completion {
                Some(CompletionReason::ExitedEarly(message)) => {
                    format!("Finished early: {message}")
                }
                Some(CompletionReason::Disqualified) => {
                    "Finished: no further questions apply.".to_string()
                }
                _ => "Finished: all questions answered.".to_string(),
            };
            lines.push(summary);
        }
    }

    lines.join("\n")
}

/// Render the view as a JSON value for machine front ends.
pub fn render_json(view: &QuestionView) -> Value {
    serde_json::to_value(view).unwrap_or(Value::Null)
}
