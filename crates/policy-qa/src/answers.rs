use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::{Question, QuestionOption};

/// Record of one committed choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Answer {
    pub question_id: String,
    pub option_id: String,
    pub option_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_text: Option<String>,
}

impl Answer {
    pub fn new(question: &Question, option: &QuestionOption) -> Self {
        Self {
            question_id: question.id.clone(),
            option_id: option.id.clone(),
            option_text: option.text.clone(),
            section: question.section_for(option).map(str::to_string),
            policy_text: option.policy_text.clone(),
        }
    }
}

/// Question id to option id mapping used to script or export a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerSheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,
    pub answers: BTreeMap<String, String>,
}

impl AnswerSheet {
    pub fn from_answers<'a>(
        catalog_id: impl Into<String>,
        catalog_version: impl Into<String>,
        answers: impl IntoIterator<Item = &'a Answer>,
    ) -> Self {
        Self {
            catalog_id: Some(catalog_id.into()),
            catalog_version: Some(catalog_version.into()),
            answers: answers
                .into_iter()
                .map(|answer| (answer.question_id.clone(), answer.option_id.clone()))
                .collect(),
        }
    }

    pub fn option_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_copies_option_data_and_inherited_section() {
        let option = QuestionOption::new("paid", "We offer paid support").with_policy_text("Paid.");
        let question = Question::new("commercial", "Commercial?")
            .with_section("Commercial Support")
            .with_option(option.clone());

        let answer = Answer::new(&question, &option);
        assert_eq!(answer.question_id, "commercial");
        assert_eq!(answer.option_id, "paid");
        assert_eq!(answer.option_text, "We offer paid support");
        assert_eq!(answer.section.as_deref(), Some("Commercial Support"));
        assert_eq!(answer.policy_text.as_deref(), Some("Paid."));
    }

    #[test]
    fn sheet_accepts_bare_answers_map() {
        let sheet: AnswerSheet =
            serde_json::from_str(r#"{ "answers": { "q1": "a" } }"#).expect("sheet parses");
        assert_eq!(sheet.catalog_id, None);
        assert_eq!(sheet.option_for("q1"), Some("a"));
        assert_eq!(sheet.option_for("q2"), None);
    }
}
