use proptest::prelude::*;

use policy_qa::{
    Catalog, CompletionReason, FlowState, Question, QuestionOption, Session, generate_report,
    security_policy,
};

#[derive(Debug, Clone)]
enum Action {
    Submit(usize),
    Back,
    Restart,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0usize..8).prop_map(Action::Submit),
        2 => Just(Action::Back),
        1 => Just(Action::Restart),
    ]
}

fn apply(catalog: &Catalog, session: &mut Session, action: &Action) {
    match action {
        Action::Submit(pick) => {
            let Some(question) = session.current_question(catalog) else {
                return;
            };
            let option = &question.options[pick % question.options.len()];
            let option_id = option.id.clone();
            session
                .submit_answer(catalog, &option_id)
                .expect("option offered by the current question");
        }
        Action::Back => {
            let _ = session.go_back();
        }
        Action::Restart => session.restart(),
    }
}

/// Linear catalog with no exits and no continuation rules.
fn plain_catalog(shape: &[usize]) -> Catalog {
    let questions = shape
        .iter()
        .enumerate()
        .map(|(index, options)| {
            (0..*options).fold(
                Question::new(format!("q{index}"), format!("Question {index}?"))
                    .with_section(format!("Section {}", index % 3)),
                |question, option| {
                    question.with_option(
                        QuestionOption::new(format!("o{option}"), format!("Option {option}"))
                            .with_policy_text(format!("Statement {index}.{option}")),
                    )
                },
            )
        })
        .collect();
    Catalog::new("plain", "Plain", questions)
}

proptest! {
    #[test]
    fn restart_always_returns_to_start(actions in prop::collection::vec(action(), 0..24)) {
        let catalog = security_policy();
        let mut session = Session::new();
        for action in &actions {
            apply(catalog, &mut session, action);
        }
        session.restart();
        prop_assert_eq!(session.state(), FlowState::InProgress { position: 0 });
        prop_assert!(session.answers().is_empty());
    }

    #[test]
    fn answers_never_outrun_position(actions in prop::collection::vec(action(), 0..24)) {
        let catalog = security_policy();
        let mut session = Session::new();
        for action in &actions {
            apply(catalog, &mut session, action);
            prop_assert!(session.answers().len() <= session.position());
            prop_assert!(session.position() <= catalog.len());
            prop_assert_eq!(session.is_complete(), session.current_question(catalog).is_none());
            for (index, answer) in session.answers().iter().enumerate() {
                prop_assert_eq!(catalog.position_of(&answer.question_id), Some(index));
            }
        }
    }

    #[test]
    fn plain_catalog_finishes_after_every_question(
        shape in prop::collection::vec(1usize..5, 1..8),
        picks in prop::collection::vec(0usize..5, 8),
    ) {
        let catalog = plain_catalog(&shape);
        let mut session = Session::new();
        for (index, options) in shape.iter().enumerate() {
            let option_id = format!("o{}", picks[index] % options);
            session.submit_answer(&catalog, &option_id).expect("valid option");
        }
        prop_assert_eq!(session.completion(), Some(&CompletionReason::NaturallyFinished));
        prop_assert_eq!(session.answers().len(), catalog.len());
    }

    #[test]
    fn go_back_then_resubmit_reproduces_answer(
        actions in prop::collection::vec(action(), 1..16),
    ) {
        let catalog = security_policy();
        let mut session = Session::new();
        for action in &actions {
            apply(catalog, &mut session, action);
        }
        prop_assume!(session.can_go_back());

        let before = session.clone();
        let last = before.answers().last().cloned().expect("at least one answer");
        session.go_back().expect("go back allowed");
        session.submit_answer(catalog, &last.option_id).expect("resubmit accepted");

        prop_assert_eq!(session.answers().last(), Some(&last));
        prop_assert_eq!(session, before);
    }

    #[test]
    fn report_generation_is_idempotent(
        shape in prop::collection::vec(1usize..4, 1..6),
        exit in prop::option::of("[a-z ]{1,12}"),
    ) {
        let catalog = plain_catalog(&shape);
        let mut session = Session::new();
        for _ in 0..shape.len() {
            session.submit_answer(&catalog, "o0").expect("valid option");
        }
        let first = generate_report(session.answers(), exit.as_deref());
        let second = generate_report(session.answers(), exit.as_deref());
        prop_assert_eq!(first, second);
    }
}
