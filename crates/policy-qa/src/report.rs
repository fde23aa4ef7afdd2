use crate::answers::Answer;

/// Heading of the notice produced when the questionnaire was exited early.
pub const EXIT_HEADER: &str = "# Compliance Information Statement";

/// Boilerplate opening every full report.
pub const INTRODUCTION: &str = "# Introduction and Purpose

This project is committed to providing our consumers and adopters with capabilities that
are designed with security in mind. To achieve this, this project is committed to secure
development and effective vulnerability management. This policy outlines the secure
practices, secure development and vulnerability handling processes in use and serves as
the central file in the project’s repository to learn more about how this project
approaches its security.

";

/// Answers sharing one section label, in recording order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup<'a> {
    pub section: &'a str,
    pub answers: Vec<&'a Answer>,
}

/// Groups labelled answers by section.
///
/// Sections appear in the order their label was first seen; answers without
/// a section label are dropped.
pub fn group_by_section(answers: &[Answer]) -> Vec<SectionGroup<'_>> {
    let mut groups: Vec<SectionGroup<'_>> = Vec::new();
    for answer in answers {
        let Some(section) = answer.section.as_deref() else {
            continue;
        };
        match groups.iter_mut().find(|group| group.section == section) {
            Some(group) => group.answers.push(answer),
            None => groups.push(SectionGroup {
                section,
                answers: vec![answer],
            }),
        }
    }
    groups
}

/// Builds the Markdown report for a finished questionnaire.
///
/// A non-empty `exit_message` short-circuits to the early-exit notice and the
/// answers are ignored.
pub fn generate(answers: &[Answer], exit_message: Option<&str>) -> String {
    if let Some(message) = exit_message.filter(|message| !message.is_empty()) {
        return format!("{EXIT_HEADER}\n\n{message}\n");
    }

    let mut markdown = String::from(INTRODUCTION);
    for group in group_by_section(answers) {
        markdown.push_str("# ");
        markdown.push_str(group.section);
        markdown.push_str("\n\n");
        for text in group
            .answers
            .iter()
            .filter_map(|answer| answer.policy_text.as_deref())
        {
            markdown.push_str(text);
            markdown.push_str("\n\n");
        }
    }
    markdown
}
