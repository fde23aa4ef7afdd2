use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::answers::Answer;
use crate::error::FlowError;
use crate::report;
use crate::spec::{Catalog, Question};

/// Why a session stopped accepting answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "message", rename_all = "snake_case")]
pub enum CompletionReason {
    NaturallyFinished,
    ExitedEarly(String),
    Disqualified,
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionReason::NaturallyFinished => write!(f, "finished"),
            CompletionReason::ExitedEarly(_) => write!(f, "exited early"),
            CompletionReason::Disqualified => write!(f, "disqualified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    InProgress { position: usize },
    Completed { reason: CompletionReason },
}

/// Mutable state of one pass through a catalog.
///
/// A session is a plain value owned by its caller; the catalog is passed in
/// to each operation that needs it, so several sessions can run against the
/// same catalog side by side. The position is always the number of recorded
/// answers: the flow is linear, so the next unanswered question is the one
/// right after the last answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    answers: Vec<Answer>,
    completion: Option<CompletionReason>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        match &self.completion {
            Some(reason) => FlowState::Completed {
                reason: reason.clone(),
            },
            None => FlowState::InProgress {
                position: self.position(),
            },
        }
    }

    pub fn position(&self) -> usize {
        self.answers.len()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|answer| answer.question_id == question_id)
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    pub fn completion(&self) -> Option<&CompletionReason> {
        self.completion.as_ref()
    }

    pub fn exit_message(&self) -> Option<&str> {
        match &self.completion {
            Some(CompletionReason::ExitedEarly(message)) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.answers.is_empty()
    }

    /// Share of the catalog answered so far, in `0.0..=1.0`.
    pub fn progress_fraction(&self, catalog: &Catalog) -> f64 {
        if catalog.is_empty() {
            return 0.0;
        }
        self.position() as f64 / catalog.len() as f64
    }

    /// The question awaiting an answer, or `None` once the session completed.
    pub fn current_question<'c>(&self, catalog: &'c Catalog) -> Option<&'c Question> {
        if self.is_complete() {
            return None;
        }
        catalog.questions().get(self.position())
    }

    /// Records `option_id` for the current question and advances the flow.
    ///
    /// Exit options win over continuation rules, which win over reaching the
    /// end of the catalog.
    pub fn submit_answer(
        &mut self,
        catalog: &Catalog,
        option_id: &str,
    ) -> Result<FlowState, FlowError> {
        if self.is_complete() {
            return Err(FlowError::NotAllowed {
                action: "submit_answer",
                reason: "the session is already complete",
            });
        }

        let position = self.position();
        let question = catalog.question_at(position)?;
        let option = question
            .option(option_id)
            .ok_or_else(|| FlowError::InvalidOption {
                question_id: question.id.clone(),
                option_id: option_id.to_string(),
            })?;

        self.answers.push(Answer::new(question, option));
        self.completion = if option.exit_workflow {
            Some(CompletionReason::ExitedEarly(
                option.exit_message.clone().unwrap_or_default(),
            ))
        } else if !question.allows_continuation(&option.id) {
            Some(CompletionReason::Disqualified)
        } else if position + 1 == catalog.len() {
            Some(CompletionReason::NaturallyFinished)
        } else {
            None
        };

        debug!(
            question = %question.id,
            option = %option.id,
            position,
            "answer recorded"
        );
        if let Some(reason) = &self.completion {
            info!(
                catalog = %catalog.id,
                answers = self.answers.len(),
                %reason,
                "questionnaire complete"
            );
        }
        Ok(self.state())
    }

    /// Discards the most recent answer and reopens its question.
    pub fn go_back(&mut self) -> Result<FlowState, FlowError> {
        let Some(removed) = self.answers.pop() else {
            return Err(FlowError::NotAllowed {
                action: "go_back",
                reason: "no answer has been recorded yet",
            });
        };
        self.completion = None;
        debug!(question = %removed.question_id, "answer withdrawn");
        Ok(self.state())
    }

    pub fn restart(&mut self) {
        self.answers.clear();
        self.completion = None;
        debug!("session restarted");
    }

    /// Report text for the answers recorded so far.
    pub fn generate_report(&self) -> String {
        report::generate(&self.answers, self.exit_message())
    }
}
