//! End-to-end pipeline tests: runner report in, feedback payload out.

use std::sync::Arc;

use specgrade::domain::models::{
    Band, Config, FailureDetail, FailureKind, Provenance, RunSummary, ScenarioResult,
};
use specgrade::infrastructure::judge::{MockJudge, MockScore};
use specgrade::services::Evaluator;

fn failing(name: &str, step: &str, kind: FailureKind) -> ScenarioResult {
    ScenarioResult::failed(
        name,
        FailureDetail {
            failed_step: step.to_string(),
            kind,
            message: format!("{kind}: raised at steps/users.py:42"),
            location: Some("steps/users.py:42".to_string()),
            step_statuses: vec!["passed".to_string(), "failed".to_string()],
        },
    )
}

/// Five unimplemented CRUD scenarios against an unreachable judge: the
/// deterministic path must produce a zero score and four distinct
/// statements (two create failures collapse into one category).
#[tokio::test]
async fn unreachable_judge_full_crud_failure() {
    let judge = Arc::new(MockJudge::unreachable());
    let evaluator = Evaluator::new(judge.clone(), &Config::default());

    let summary = RunSummary::from_scenarios(vec![
        failing(
            "Create a new user",
            "the user is stored",
            FailureKind::Unimplemented,
        ),
        failing(
            "Create a duplicate user",
            "the request is rejected",
            FailureKind::Unimplemented,
        ),
        failing(
            "Fetch an existing user",
            "the user is returned",
            FailureKind::Unimplemented,
        ),
        failing(
            "Update a user's email",
            "the email is changed",
            FailureKind::Unimplemented,
        ),
        failing(
            "Delete a user",
            "the user is gone",
            FailureKind::Unimplemented,
        ),
    ]);

    let feedback = evaluator.evaluate(&summary).await.unwrap();

    assert!((feedback.score - 0.0).abs() < f64::EPSILON);
    assert_eq!(feedback.provenance, Provenance::Fallback);
    assert_eq!(feedback.band, Band::Poor);
    assert!(!feedback.all_passed);
    assert!(!feedback.deploy_ready);
    assert!(!feedback.rationale.is_empty());

    // Five scenarios, five distinct (kind, step) categories, but the two
    // create failures share a functional area so their fallback templates
    // collapse to the same text.
    assert_eq!(feedback.statements.len(), 4);

    for statement in &feedback.statements {
        assert!(!statement.contains("steps/users.py"), "leak: {statement}");
        assert!(!statement.contains("42"), "leak: {statement}");
    }
}

#[tokio::test]
async fn judge_backed_interior_score_is_accepted() {
    let judge = Arc::new(
        MockJudge::new().with_score(MockScore::success(0.85, "core flows work, one edge broken")),
    );
    let evaluator = Evaluator::new(judge.clone(), &Config::default());

    let summary = RunSummary::from_scenarios(vec![
        ScenarioResult::passed("Create a new user"),
        ScenarioResult::passed("Fetch an existing user"),
        ScenarioResult::passed("Update a user's email"),
        ScenarioResult::passed("Delete a user"),
        failing(
            "Create a duplicate user",
            "the request is rejected",
            FailureKind::AssertionFailure,
        ),
    ]);

    let feedback = evaluator.evaluate(&summary).await.unwrap();

    assert!((feedback.score - 0.85).abs() < f64::EPSILON);
    assert_eq!(feedback.provenance, Provenance::Judge);
    assert_eq!(feedback.band, Band::Good);
    assert!(!feedback.deploy_ready);
    assert_eq!(feedback.statements.len(), 1);
    assert_eq!(judge.score_calls().await, 1);
}

/// A perfect run scores exactly 1.0 without contacting the judge at all.
#[tokio::test]
async fn perfect_run_never_contacts_the_judge() {
    let judge = Arc::new(MockJudge::unreachable());
    let evaluator = Evaluator::new(judge.clone(), &Config::default());

    let summary = RunSummary::from_scenarios(vec![
        ScenarioResult::passed("Create a new user"),
        ScenarioResult::passed("Delete a user"),
    ]);

    let feedback = evaluator.evaluate(&summary).await.unwrap();

    assert!((feedback.score - 1.0).abs() < f64::EPSILON);
    assert!(feedback.all_passed);
    assert!(feedback.deploy_ready);
    assert_eq!(feedback.provenance, Provenance::Judge);
    assert!(feedback.statements.is_empty());
    assert_eq!(judge.obfuscate_calls().await, 0);
    assert_eq!(judge.score_calls().await, 0);
}

/// An out-of-range verdict from the judge is discarded in favor of the
/// pass-rate fallback, never emitted.
#[tokio::test]
async fn out_of_range_verdict_falls_back_to_pass_rate() {
    let judge = Arc::new(MockJudge::new().with_score(MockScore::success(1.7, "overflow")));
    let evaluator = Evaluator::new(judge, &Config::default());

    let summary = RunSummary::from_scenarios(vec![
        ScenarioResult::passed("Create a new user"),
        failing(
            "Delete a user",
            "the user is gone",
            FailureKind::KeyError,
        ),
    ]);

    let feedback = evaluator.evaluate(&summary).await.unwrap();
    assert!((feedback.score - 0.5).abs() < f64::EPSILON);
    assert_eq!(feedback.provenance, Provenance::Fallback);
}

/// Zero passing scenarios clamp an optimistic judge verdict down.
#[tokio::test]
async fn zero_passes_clamp_an_optimistic_judge() {
    let judge = Arc::new(MockJudge::new().with_score(MockScore::success(0.9, "looks great")));
    let evaluator = Evaluator::new(judge, &Config::default());

    let summary = RunSummary::from_scenarios(vec![
        failing(
            "Create a new user",
            "the user is stored",
            FailureKind::Unimplemented,
        ),
        failing(
            "Delete a user",
            "the user is gone",
            FailureKind::Unimplemented,
        ),
    ]);

    let feedback = evaluator.evaluate(&summary).await.unwrap();
    assert!(feedback.score <= 0.25);
    assert_eq!(feedback.band, Band::Poor);
}

/// The empty run is a valid input: zero score, fallback provenance, no
/// statements, and a rationale saying nothing was evaluated.
#[tokio::test]
async fn empty_run_yields_zero_score() {
    let judge = Arc::new(MockJudge::unreachable());
    let evaluator = Evaluator::new(judge.clone(), &Config::default());

    let summary = RunSummary::from_scenarios(vec![]);
    let feedback = evaluator.evaluate(&summary).await.unwrap();

    assert!((feedback.score - 0.0).abs() < f64::EPSILON);
    assert!(!feedback.all_passed);
    assert_eq!(feedback.provenance, Provenance::Fallback);
    assert!(feedback.statements.is_empty());
    assert!(feedback.rationale.contains("no scenarios"));
    assert_eq!(judge.score_calls().await, 0);
}

/// Repeated failures of the same category produce one statement, in
/// first-occurrence order relative to other categories.
#[tokio::test]
async fn duplicate_categories_collapse_to_one_statement() {
    let judge = Arc::new(MockJudge::unreachable());
    let evaluator = Evaluator::new(judge, &Config::default());

    let summary = RunSummary::from_scenarios(vec![
        failing(
            "Create a user via API",
            "the user is stored",
            FailureKind::Unimplemented,
        ),
        failing(
            "Create a user via import",
            "the user is stored",
            FailureKind::Unimplemented,
        ),
        failing(
            "Fetch an existing user",
            "the user is returned",
            FailureKind::KeyError,
        ),
    ]);

    let feedback = evaluator.evaluate(&summary).await.unwrap();
    assert_eq!(feedback.statements.len(), 2);
}
