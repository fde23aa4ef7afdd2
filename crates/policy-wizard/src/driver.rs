use policy_qa::{AnswerSheet, Catalog, FlowError, FlowState, QuestionView, Session, build_view};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error("no answer provided for question '{0}'")]
    MissingAnswer(String),
    #[error("answers were recorded for catalog '{found}', but the active catalog is '{expected}'")]
    CatalogMismatch { expected: String, found: String },
}

/// One line typed by the user at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Choose(String),
    Back,
    Restart,
    Quit,
    Help,
    Empty,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Input::Empty,
            "b" | "back" => Input::Back,
            "r" | "restart" => Input::Restart,
            "q" | "quit" | "exit" => Input::Quit,
            "?" | "h" | "help" => Input::Help,
            _ => Input::Choose(trimmed.to_string()),
        }
    }
}

/// Owns a catalog and the single session running against it.
#[derive(Debug, Clone)]
pub struct WizardDriver {
    catalog: Catalog,
    session: Session,
}

impl WizardDriver {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            session: Session::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    pub fn view(&self) -> QuestionView {
        build_view(&self.catalog, &self.session)
    }

    /// Answers the current question with a 1-based option number or an option id.
    pub fn choose(&mut self, choice: &str) -> Result<FlowState, DriverError> {
        let option_id = self.resolve_choice(choice);
        Ok(self.session.submit_answer(&self.catalog, &option_id)?)
    }

    pub fn go_back(&mut self) -> Result<FlowState, DriverError> {
        Ok(self.session.go_back()?)
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn report(&self) -> String {
        self.session.generate_report()
    }

    pub fn answer_sheet(&self) -> AnswerSheet {
        AnswerSheet::from_answers(
            self.catalog.id.clone(),
            self.catalog.version.clone(),
            self.session.answers(),
        )
    }

    /// Feeds scripted answers in catalog order until the session completes.
    pub fn replay(&mut self, sheet: &AnswerSheet) -> Result<FlowState, DriverError> {
        if let Some(found) = &sheet.catalog_id
            && *found != self.catalog.id
        {
            return Err(DriverError::CatalogMismatch {
                expected: self.catalog.id.clone(),
                found: found.clone(),
            });
        }
        for question_id in sheet.answers.keys() {
            if self.catalog.question(question_id).is_none() {
                warn!(question = %question_id, "answer for unknown question ignored");
            }
        }

        while let Some(question) = self.session.current_question(&self.catalog) {
            let option_id = sheet
                .option_for(&question.id)
                .ok_or_else(|| DriverError::MissingAnswer(question.id.clone()))?;
            debug!(question = %question.id, option = option_id, "replaying answer");
            self.session.submit_answer(&self.catalog, option_id)?;
        }
        Ok(self.session.state())
    }

    fn resolve_choice(&self, choice: &str) -> String {
        let question = self.session.current_question(&self.catalog);
        match (choice.parse::<usize>(), question) {
            (Ok(number), Some(question)) if number >= 1 => question
                .options
                .get(number - 1)
                .map(|option| option.id.clone())
                .unwrap_or_else(|| choice.to_string()),
            _ => choice.to_string(),
        }
    }
}
