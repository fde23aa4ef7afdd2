use policy_qa::{
    Catalog, CompletionReason, ContinueRule, FlowError, FlowState, Question, QuestionOption,
    Session, group_by_section, security_policy,
};

fn answer_all(catalog: &Catalog, session: &mut Session, options: &[&str]) -> FlowState {
    let mut state = session.state();
    for option in options {
        state = session
            .submit_answer(catalog, option)
            .expect("answer should be accepted");
    }
    state
}

#[test]
fn full_pass_finishes_naturally() {
    let catalog = security_policy();
    let mut session = Session::new();
    let state = answer_all(
        catalog,
        &mut session,
        &["paid", "documented", "full-process", "active-testing"],
    );

    assert_eq!(
        state,
        FlowState::Completed {
            reason: CompletionReason::NaturallyFinished
        }
    );
    assert_eq!(session.answers().len(), catalog.len());
    assert_eq!(session.progress_fraction(catalog), 1.0);
    assert!(session.exit_message().is_none());
}

#[test]
fn progress_advances_one_question_at_a_time() {
    let catalog = security_policy();
    let mut session = Session::new();

    let state = session.submit_answer(catalog, "designed").unwrap();
    assert_eq!(state, FlowState::InProgress { position: 1 });
    assert_eq!(session.progress_fraction(catalog), 0.25);
    assert_eq!(
        session.current_question(catalog).map(|q| q.id.as_str()),
        Some("security-practices")
    );
}

#[test]
fn exit_option_ends_with_message() {
    let catalog = security_policy();
    let mut session = Session::new();
    let state = session.submit_answer(catalog, "no").unwrap();

    assert_eq!(
        state,
        FlowState::Completed {
            reason: CompletionReason::ExitedEarly("I owe you nothing".into())
        }
    );
    assert_eq!(session.answers().len(), 1);
    assert_eq!(
        session.generate_report(),
        "# Compliance Information Statement\n\nI owe you nothing\n"
    );
}

#[test]
fn gating_answer_outside_continuation_set_disqualifies() {
    let catalog = security_policy();
    let mut session = Session::new();
    let state = session.submit_answer(catalog, "implicit").unwrap();

    assert_eq!(
        state,
        FlowState::Completed {
            reason: CompletionReason::Disqualified
        }
    );
    assert_eq!(session.answers().len(), 1);
    assert!(session.exit_message().is_none());

    let groups = group_by_section(session.answers());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].section, "Commercial Support");

    let report = session.generate_report();
    assert!(report.starts_with("# Introduction and Purpose"));
    assert!(report.contains("# Commercial Support\n\nThis project may be used commercially"));
}

#[test]
fn exit_takes_precedence_over_continuation_rule() {
    let catalog = Catalog::new(
        "precedence",
        "Precedence",
        vec![
            Question::new("gate", "Gate?")
                .with_rule(ContinueRule::option_in(["stay"]))
                .with_option(QuestionOption::new("stay", "Stay"))
                .with_option(QuestionOption::new("leave", "Leave").exiting("Left")),
        ],
    );
    let mut session = Session::new();
    assert_eq!(
        session.submit_answer(&catalog, "leave").unwrap(),
        FlowState::Completed {
            reason: CompletionReason::ExitedEarly("Left".into())
        }
    );
}

#[test]
fn rule_on_last_question_disqualifies_before_natural_finish() {
    let catalog = Catalog::new(
        "last-gate",
        "Last gate",
        vec![
            Question::new("gate", "Gate?")
                .with_rule(ContinueRule::option_not_in(["fail"]))
                .with_option(QuestionOption::new("pass", "Pass"))
                .with_option(QuestionOption::new("fail", "Fail")),
        ],
    );

    let mut session = Session::new();
    assert_eq!(
        session.completion(),
        None,
        "fresh session must not be complete"
    );
    session.submit_answer(&catalog, "fail").unwrap();
    assert_eq!(session.completion(), Some(&CompletionReason::Disqualified));

    session.restart();
    session.submit_answer(&catalog, "pass").unwrap();
    assert_eq!(
        session.completion(),
        Some(&CompletionReason::NaturallyFinished)
    );
}

#[test]
fn go_back_after_exit_clears_completion() {
    let catalog = security_policy();
    let mut session = Session::new();
    session.submit_answer(catalog, "no").unwrap();

    let state = session.go_back().unwrap();
    assert_eq!(state, FlowState::InProgress { position: 0 });
    assert!(session.exit_message().is_none());
    assert!(session.answers().is_empty());
    assert_eq!(
        session.go_back(),
        Err(FlowError::NotAllowed {
            action: "go_back",
            reason: "no answer has been recorded yet"
        })
    );
}

#[test]
fn reanswering_replaces_the_previous_answer() {
    let catalog = security_policy();
    let mut session = Session::new();
    session.submit_answer(catalog, "paid").unwrap();
    session.submit_answer(catalog, "no-formal").unwrap();
    session.go_back().unwrap();
    session.submit_answer(catalog, "documented").unwrap();

    assert_eq!(session.answers().len(), 2);
    assert_eq!(
        session
            .answer_for("security-practices")
            .map(|answer| answer.option_id.as_str()),
        Some("documented")
    );
}

#[test]
fn restart_discards_everything() {
    let catalog = security_policy();
    let mut session = Session::new();
    answer_all(catalog, &mut session, &["paid", "documented"]);
    session.restart();

    assert_eq!(session.state(), FlowState::InProgress { position: 0 });
    assert!(session.answers().is_empty());
    assert_eq!(session, Session::new());
}

#[test]
fn sessions_are_independent() {
    let catalog = security_policy();
    let mut first = Session::new();
    let mut second = Session::new();
    first.submit_answer(catalog, "no").unwrap();
    second.submit_answer(catalog, "paid").unwrap();

    assert!(first.is_complete());
    assert!(!second.is_complete());
}
