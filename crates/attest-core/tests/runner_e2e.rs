//! End-to-end case runs against scripted collaborators: preamble fail-fast,
//! epilogue collect-all, wildcard verification and the harness wiring.

use attest_core::providers::fake::{FakeFunctionality, FakePersistence};
use attest_core::providers::QueryResponse;
use attest_core::supervisor::CaseHooks;
use attest_core::{CaseIdentity, CaseOutcome, CaseRunner, CaseSpec, Harness};
use serde_json::json;
use std::sync::Arc;

/// Route engine logs through the test writer; safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn case(expected: &str, preamble: Vec<String>, epilogue: Vec<String>) -> CaseSpec {
    CaseSpec {
        id: 12,
        title: "creates a product".into(),
        description: "one row must appear".into(),
        input: r#"{"name":"Bob"}"#.into(),
        expected: expected.into(),
        preamble,
        epilogue,
    }
}

fn runner(
    spec: CaseSpec,
    functionality: Arc<FakeFunctionality>,
    persistence: Arc<FakePersistence>,
) -> CaseRunner {
    CaseRunner::new(
        CaseIdentity::new("product.create", 12),
        spec,
        functionality,
        persistence,
    )
}

#[tokio::test]
async fn wildcard_pattern_accepts_generated_id() {
    let spec = case(r#"{"id":"+","name":"Bob"}"#, vec![], vec![]);
    let functionality = Arc::new(FakeFunctionality::returning(json!({"id": "42", "name": "Bob"})));
    let outcome = runner(spec, functionality, Arc::new(FakePersistence::new()))
        .run()
        .await;
    assert_eq!(outcome, CaseOutcome::Passed);
}

#[tokio::test]
async fn wildcard_pattern_rejects_null_id_at_its_path() {
    let spec = case(r#"{"id":"+","name":"Bob"}"#, vec![], vec![]);
    let functionality = Arc::new(FakeFunctionality::returning(json!({"id": null, "name": "Bob"})));
    let outcome = runner(spec, functionality, Arc::new(FakePersistence::new()))
        .run()
        .await;
    let diagnostics = outcome.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("testOutput.id"));
    assert!(diagnostics[0].contains("something not null (except array)"));
}

#[tokio::test]
async fn preamble_failure_suppresses_call_and_epilogue() {
    init_tracing();
    let spec = case(
        r#"{"id":"+"}"#,
        vec!["BAD_STMT".into(), "OK_STMT".into()],
        vec!["SELECT 1 FROM products".into()],
    );
    let functionality = Arc::new(FakeFunctionality::returning(json!({"id": "1"})));
    let persistence = Arc::new(FakePersistence::new().fail_execute("BAD_STMT", "table missing"));
    let outcome = runner(spec, functionality.clone(), persistence.clone())
        .run()
        .await;

    let diagnostics = outcome.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("BAD_STMT"));
    assert!(diagnostics[0].contains("table missing"));
    // OK_STMT never executed, the functionality was never invoked and no
    // epilogue query was dispatched.
    assert_eq!(persistence.executed(), ["BAD_STMT"]);
    assert_eq!(functionality.call_count(), 0);
    assert!(persistence.queried().is_empty());
}

#[tokio::test]
async fn epilogue_failures_append_after_structural_diagnostics() {
    let spec = case(
        r#"{"id":"+","name":"Alice"}"#,
        vec![],
        vec!["CHECK 1".into(), "CHECK 2".into(), "CHECK 3".into()],
    );
    let functionality = Arc::new(FakeFunctionality::returning(json!({"id": "7", "name": "Bob"})));
    let persistence = Arc::new(
        FakePersistence::new()
            .respond("CHECK 1", QueryResponse::no())
            .respond("CHECK 3", QueryResponse::no()),
    );
    let outcome = runner(spec, functionality, persistence.clone()).run().await;

    let diagnostics = outcome.diagnostics();
    assert_eq!(diagnostics.len(), 3);
    // Structural mismatch first, then the two failed verifications in order.
    assert!(diagnostics[0].contains("testOutput.name"));
    assert!(diagnostics[1].contains("CHECK 1"));
    assert!(diagnostics[2].contains("CHECK 3"));
    // The middle verification still ran.
    assert_eq!(persistence.queried().len(), 3);
}

#[tokio::test]
async fn passing_case_runs_preamble_call_and_epilogue() {
    let spec = case(
        r#"{"id":"+","name":"Bob"}"#,
        vec!["INSERT seed".into()],
        vec!["SELECT 1 FROM products WHERE name = 'Bob'".into()],
    );
    let functionality = Arc::new(FakeFunctionality::returning(json!({"id": "9", "name": "Bob"})));
    let persistence = Arc::new(FakePersistence::new());
    let outcome = runner(spec, functionality.clone(), persistence.clone())
        .run()
        .await;

    assert!(outcome.passed());
    assert_eq!(persistence.executed(), ["INSERT seed"]);
    assert_eq!(functionality.calls(), vec![json!({"name": "Bob"})]);
    assert_eq!(persistence.queried().len(), 1);
    assert!(persistence.queried()[0].starts_with("SELECT (CASE WHEN EXISTS ("));
}

#[tokio::test]
async fn transport_error_reports_ordinary_mismatches() {
    // The transport failure is only visible in the warn log, never in the
    // diagnostics.
    init_tracing();
    let spec = case(r#"{"id":"+"}"#, vec![], vec![]);
    let functionality = Arc::new(FakeFunctionality::erroring("gateway timeout"));
    let outcome = runner(spec, functionality, Arc::new(FakePersistence::new()))
        .run()
        .await;

    let diagnostics = outcome.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    // No distinct transport error class: the null result fails the pattern.
    assert!(diagnostics[0].contains("null value"));
    assert!(!diagnostics[0].contains("gateway timeout"));
}

#[tokio::test]
async fn deterministic_collaborators_make_reruns_identical() {
    let spec = case(
        r#"{"id":"+","name":"Alice"}"#,
        vec![],
        vec!["CHECK".into()],
    );
    let functionality = Arc::new(FakeFunctionality::returning(json!({"id": "7", "name": "Bob"})));
    let persistence = Arc::new(FakePersistence::new().respond("CHECK", QueryResponse::no()));
    let case = runner(spec, functionality, persistence);

    let first = case.run().await;
    let second = case.run().await;
    assert_eq!(first, second);
    assert_eq!(first.diagnostics().len(), 2);
}

#[tokio::test]
async fn harness_reports_failed_cases_and_propagates_hook_errors() {
    let harness = Harness::new(None);
    harness.init().unwrap();

    let spec = case(r#"{"id":"+"}"#, vec![], vec![]);
    let functionality = Arc::new(FakeFunctionality::returning(json!({"id": null})));
    let case = runner(spec, functionality, Arc::new(FakePersistence::new()));

    let outcome = harness.run_case(&case, &CaseHooks::default()).await.unwrap();
    assert!(!outcome.passed());

    let hooks = CaseHooks {
        before: Some(Box::new(|| anyhow::bail!("fixture not ready"))),
        after: None,
    };
    let err = harness.run_case(&case, &hooks).await.unwrap_err();
    assert!(err.to_string().contains("before-test"));

    harness.shutdown();
}

#[tokio::test]
async fn concurrent_cases_keep_isolated_outcomes() {
    let pass = runner(
        case(r#"{"ok":true}"#, vec![], vec![]),
        Arc::new(FakeFunctionality::returning(json!({"ok": true}))),
        Arc::new(FakePersistence::new()),
    );
    let fail = runner(
        case(r#"{"ok":true}"#, vec![], vec![]),
        Arc::new(FakeFunctionality::returning(json!({"ok": false}))),
        Arc::new(FakePersistence::new()),
    );

    let (first, second) = tokio::join!(pass.run(), fail.run());
    assert!(first.passed());
    assert_eq!(second.diagnostics().len(), 1);
}
