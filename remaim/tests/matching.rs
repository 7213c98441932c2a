mod common;

use common::{FakeConduit, ScriptedTerminal};
use remaim::{ConduitError, MatchError, MatchOutcome, TaskMatcher};
use serde_json::json;

const PROJECT: &str = "PHID-PROJ-1";

#[tokio::test]
async fn query_strips_search_operators() {
    let conduit = FakeConduit::new().respond("maniphest.query", json!([]));
    let issue = common::issue(1, "t", "A task with +- special chars.", "New");

    TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut ScriptedTerminal::new(&[]))
        .await
        .unwrap();

    assert_eq!(
        conduit.calls_to("maniphest.query"),
        vec![json!({ "projectPHIDs": [PROJECT], "fullText": "A task with special chars." })]
    );
}

#[tokio::test]
async fn no_hits_mean_not_found() {
    let conduit = FakeConduit::new().respond("maniphest.query", json!([]));
    let issue = common::issue(1, "t", "d", "New");

    let outcome = TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut ScriptedTerminal::new(&[]))
        .await
        .unwrap();

    assert_eq!(outcome, MatchOutcome::NotFound);
}

#[tokio::test]
async fn single_hit_is_taken_without_asking() {
    let conduit = FakeConduit::new().respond(
        "maniphest.query",
        json!({ "PHID-TASK-4": common::task(4, "Broken login", "Login fails") }),
    );
    let issue = common::issue(1, "Broken login", "Login fails", "New");
    let mut terminal = ScriptedTerminal::new(&[]);

    let outcome = TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut terminal)
        .await
        .unwrap();

    match outcome {
        MatchOutcome::Found(task) => {
            assert_eq!(task.id, "4");
            assert_eq!(task.phid, "PHID-TASK-4");
        }
        other => panic!("expected a match, got {other:?}"),
    }
    assert!(terminal.questions.is_empty());
    assert!(terminal.output.is_empty());
}

#[tokio::test]
async fn two_hits_offer_both_and_a_skip_option() {
    let conduit = FakeConduit::new().respond(
        "maniphest.query",
        json!([
            common::task(4, "Broken login", "Login fails"),
            common::task(5, "Broken login again", "Login fails"),
        ]),
    );
    let issue = common::issue(1, "Broken login", "Login fails", "New");
    let mut terminal = ScriptedTerminal::new(&["1"]);

    let outcome = TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut terminal)
        .await
        .unwrap();

    assert!(matches!(outcome, MatchOutcome::Found(task) if task.id == "5"));
    assert!(terminal.output.contains("[0] =>\tT4 Broken login"));
    assert!(terminal.output.contains("[1] =>\tT5 Broken login again"));
    assert!(terminal.output.contains("[2] =>\tSkip this issue"));
    assert_eq!(terminal.questions.len(), 1);
}

#[tokio::test]
async fn skip_is_not_the_same_as_not_found() {
    let hits = json!([common::task(4, "a", "d"), common::task(5, "b", "d")]);
    let issue = common::issue(1, "t", "d", "New");

    let conduit = FakeConduit::new().always("maniphest.query", hits);
    let skipped = TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut ScriptedTerminal::new(&["2"]))
        .await
        .unwrap();
    let create_new = TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut ScriptedTerminal::new(&[""]))
        .await
        .unwrap();

    assert_eq!(skipped, MatchOutcome::Skip);
    assert_eq!(create_new, MatchOutcome::NotFound);
    assert_ne!(skipped, create_new);
}

#[tokio::test]
async fn skip_existing_skips_without_asking() {
    let conduit = FakeConduit::new().respond(
        "maniphest.query",
        json!([common::task(4, "a", "d"), common::task(5, "b", "d")]),
    );
    let issue = common::issue(1, "t", "d", "New");
    let mut terminal = ScriptedTerminal::new(&[]);

    let outcome = TaskMatcher::new(true)
        .find_match(&conduit, &issue, PROJECT, &mut terminal)
        .await
        .unwrap();

    assert_eq!(outcome, MatchOutcome::Skip);
    assert!(terminal.questions.is_empty());
}

#[tokio::test]
async fn out_of_range_choice_is_asked_again() {
    let conduit = FakeConduit::new().respond(
        "maniphest.query",
        json!([common::task(4, "a", "d"), common::task(5, "b", "d")]),
    );
    let issue = common::issue(1, "t", "d", "New");
    let mut terminal = ScriptedTerminal::new(&["11", "1"]);

    let outcome = TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut terminal)
        .await
        .unwrap();

    assert!(matches!(outcome, MatchOutcome::Found(task) if task.id == "5"));
    assert_eq!(terminal.questions.len(), 2);
    assert!(terminal.output.contains("You must select a value between 0 and 2"));
}

#[tokio::test]
async fn hit_without_phid_is_rejected() {
    let conduit = FakeConduit::new().respond(
        "maniphest.query",
        json!([{ "id": "4", "title": "t" }]),
    );
    let issue = common::issue(1, "t", "d", "New");

    let result = TaskMatcher::new(false)
        .find_match(&conduit, &issue, PROJECT, &mut ScriptedTerminal::new(&[]))
        .await;

    assert!(matches!(
        result,
        Err(MatchError::Search(ConduitError::Decode { .. }))
    ));
}
