use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, FlowError};
use crate::spec::question::Question;
use crate::validate::validate;

/// Ordered, read-only set of questions driving one questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    pub id: String,
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

impl Catalog {
    pub fn new(id: impl Into<String>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            version: "1.0.0".to_string(),
            description: None,
            questions,
        }
    }

    /// Parses a JSON catalog and rejects it when validation reports errors.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw).map_err(CatalogError::Parse)?;
        let report = validate(&catalog);
        if !report.is_valid() {
            return Err(CatalogError::Invalid(report));
        }
        for warning in report.warnings() {
            tracing::warn!(catalog = %catalog.id, code = %warning.code, "{}", warning.message);
        }
        Ok(catalog)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// JSON Schema describing the catalog document format.
    pub fn json_schema() -> Schema {
        schema_for!(Catalog)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question at `index`; callers are expected to check [`Catalog::len`] first.
    pub fn question_at(&self, index: usize) -> Result<&Question, FlowError> {
        self.questions.get(index).ok_or(FlowError::OutOfRange {
            index,
            len: self.questions.len(),
        })
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    pub fn position_of(&self, question_id: &str) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| question.id == question_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::question::QuestionOption;

    fn two_questions() -> Catalog {
        Catalog::new(
            "demo",
            "Demo",
            vec![
                Question::new("first", "First?").with_option(QuestionOption::new("a", "A")),
                Question::new("second", "Second?").with_option(QuestionOption::new("b", "B")),
            ],
        )
    }

    #[test]
    fn question_at_reports_out_of_range() {
        let catalog = two_questions();
        assert_eq!(catalog.question_at(1).map(|q| q.id.as_str()), Ok("second"));
        assert_eq!(
            catalog.question_at(2),
            Err(FlowError::OutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn lookups_by_id() {
        let catalog = two_questions();
        assert_eq!(catalog.position_of("second"), Some(1));
        assert!(catalog.question("third").is_none());
    }

    #[test]
    fn from_json_str_rejects_invalid_catalog() {
        let err = Catalog::from_json_str(
            r#"{ "id": "broken", "title": "Broken", "version": "1.0", "questions": [] }"#,
        )
        .expect_err("empty catalog must be rejected");
        assert!(matches!(err, CatalogError::Invalid(_)));

        let err = Catalog::from_json_str("{ not json").expect_err("parse error");
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn schema_names_catalog_fields() {
        let schema = serde_json::to_value(Catalog::json_schema()).expect("schema serializes");
        let properties = schema["properties"].as_object().expect("properties");
        assert!(properties.contains_key("questions"));
        assert!(properties.contains_key("version"));
    }
}
