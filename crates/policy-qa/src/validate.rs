use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::spec::{Catalog, Question};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("identifier pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// Authoring defect found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    fn push(
        &mut self,
        severity: Severity,
        code: &str,
        question: Option<&Question>,
        option_id: Option<&str>,
        message: String,
    ) {
        self.issues.push(ValidationIssue {
            severity,
            code: code.to_string(),
            question_id: question.map(|question| question.id.clone()),
            option_id: option_id.map(str::to_string),
            message,
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self
            .errors()
            .map(|issue| format!("{}: {}", issue.code, issue.message))
            .collect::<Vec<_>>();
        if errors.is_empty() {
            write!(f, "no errors")
        } else {
            write!(f, "{}", errors.join("; "))
        }
    }
}

/// Checks a catalog for authoring defects the flow engine cannot recover from.
pub fn validate(catalog: &Catalog) -> ValidationReport {
    let mut report = ValidationReport::default();

    if catalog.questions.is_empty() {
        report.push(
            Severity::Error,
            "empty_catalog",
            None,
            None,
            format!("catalog '{}' has no questions", catalog.id),
        );
    }

    let mut question_ids = BTreeSet::new();
    for question in &catalog.questions {
        check_identifier(&mut report, question, None, &question.id);
        if !question.id.is_empty() && !question_ids.insert(question.id.as_str()) {
            report.push(
                Severity::Error,
                "duplicate_question",
                Some(question),
                None,
                format!("question id '{}' is used more than once", question.id),
            );
        }
        if question.prompt.trim().is_empty() {
            report.push(
                Severity::Warning,
                "empty_prompt",
                Some(question),
                None,
                format!("question '{}' has an empty prompt", question.id),
            );
        }
        validate_options(&mut report, question);
        validate_rule(&mut report, question);
    }

    report
}

fn check_identifier(
    report: &mut ValidationReport,
    question: &Question,
    option_id: Option<&str>,
    id: &str,
) {
    if id.is_empty() {
        report.push(
            Severity::Error,
            "empty_id",
            Some(question),
            option_id,
            "identifiers must not be empty".to_string(),
        );
    } else if !IDENTIFIER.is_match(id) {
        report.push(
            Severity::Warning,
            "id_format",
            Some(question),
            option_id,
            format!("identifier '{id}' is not lower kebab-case"),
        );
    }
}

fn validate_options(report: &mut ValidationReport, question: &Question) {
    if question.options.is_empty() {
        report.push(
            Severity::Error,
            "no_options",
            Some(question),
            None,
            format!("question '{}' offers no options", question.id),
        );
        return;
    }

    let mut option_ids = BTreeSet::new();
    for option in &question.options {
        check_identifier(report, question, Some(&option.id), &option.id);
        if !option.id.is_empty() && !option_ids.insert(option.id.as_str()) {
            report.push(
                Severity::Error,
                "duplicate_option",
                Some(question),
                Some(&option.id),
                format!(
                    "option id '{}' appears more than once in question '{}'",
                    option.id, question.id
                ),
            );
        }

        let has_message = option
            .exit_message
            .as_deref()
            .is_some_and(|message| !message.trim().is_empty());
        if option.exit_workflow && !has_message {
            report.push(
                Severity::Error,
                "missing_exit_message",
                Some(question),
                Some(&option.id),
                format!("exit option '{}' has no exit message", option.id),
            );
        }
        if !option.exit_workflow && option.exit_message.is_some() {
            report.push(
                Severity::Warning,
                "unused_exit_message",
                Some(question),
                Some(&option.id),
                format!(
                    "option '{}' carries an exit message but does not exit",
                    option.id
                ),
            );
        }
        if !option.exit_workflow
            && question.section_for(option).is_some()
            && option.policy_text.is_none()
        {
            report.push(
                Severity::Warning,
                "missing_policy_text",
                Some(question),
                Some(&option.id),
                format!(
                    "option '{}' is filed under a section but contributes no text",
                    option.id
                ),
            );
        }
    }
}

fn validate_rule(report: &mut ValidationReport, question: &Question) {
    let Some(rule) = &question.continue_when else {
        return;
    };

    for option_id in rule.referenced_options() {
        if question.option(option_id).is_none() {
            report.push(
                Severity::Error,
                "unknown_option_in_rule",
                Some(question),
                Some(option_id),
                format!(
                    "continuation rule of '{}' names unknown option '{}'",
                    question.id, option_id
                ),
            );
        }
    }

    let passable = question
        .options
        .iter()
        .filter(|option| !option.exit_workflow)
        .any(|option| rule.permits(&option.id));
    if !passable {
        report.push(
            Severity::Warning,
            "rule_rejects_all",
            Some(question),
            None,
            format!(
                "continuation rule of '{}' rejects every option; the flow can never pass it",
                question.id
            ),
        );
    }
}
