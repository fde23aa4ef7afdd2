use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::rule::ContinueRule;

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    /// Completes the questionnaire immediately with `exit_message`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub exit_workflow: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_message: Option<String>,
    /// Statement contributed to the report when this option is chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_text: Option<String>,
    /// Overrides the section of the parent question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl QuestionOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            exit_workflow: false,
            exit_message: None,
            policy_text: None,
            section: None,
        }
    }

    pub fn exiting(mut self, message: impl Into<String>) -> Self {
        self.exit_workflow = true;
        self.exit_message = Some(message.into());
        self
    }

    pub fn with_policy_text(mut self, text: impl Into<String>) -> Self {
        self.policy_text = Some(text.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// Definition of a single question inside a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    /// Default report section for every option of this question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continue_when: Option<ContinueRule>,
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            section: None,
            continue_when: None,
            options: Vec::new(),
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_rule(mut self, rule: ContinueRule) -> Self {
        self.continue_when = Some(rule);
        self
    }

    pub fn with_option(mut self, option: QuestionOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    /// Section label the report files `option` under, if any.
    pub fn section_for<'a>(&'a self, option: &'a QuestionOption) -> Option<&'a str> {
        option
            .section
            .as_deref()
            .or(self.section.as_deref())
            .filter(|label| !label.trim().is_empty())
    }

    /// Whether the flow may advance past this question after `option_id`.
    pub fn allows_continuation(&self, option_id: &str) -> bool {
        self.continue_when
            .as_ref()
            .is_none_or(|rule| rule.permits(option_id))
    }
}
