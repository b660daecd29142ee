use calc_autofill::error::FailureKind;
use calc_autofill::report::console::{format_batch, format_run_summary};
use calc_autofill::report::report_model::{
    Artifact, FieldOutcome, Report, RunFailure, RunSuccess, RunSummary,
};

fn mixed_report() -> Report {
    Report::from_outcomes(
        "deadbeef",
        vec![
            FieldOutcome::applied("requests_per_month"),
            FieldOutcome::not_found("provisioned_concurrency"),
            FieldOutcome::apply_error("region", "no option 'mars-north-1'"),
            FieldOutcome::applied("enable_logging"),
        ],
    )
}

#[test]
fn report_tallies_outcomes_and_failed_fields() {
    let report = mixed_report();

    assert_eq!(report.applied, 2);
    assert_eq!(report.failed, 2);
    assert_eq!(
        report.failed_fields,
        vec!["provisioned_concurrency", "region"]
    );
    assert_eq!(report.config_fingerprint, "deadbeef");
    assert!(!report.all_applied());
    assert!(Report::from_outcomes("x", vec![FieldOutcome::applied("a")]).all_applied());
    assert!(Report::empty("x").all_applied());
}

#[test]
fn summary_of_a_success_carries_the_artifact() {
    let result = Ok(RunSuccess {
        artifact: Artifact {
            url: "https://calc.example.com/estimate?id=abc123".to_string(),
            config_name: "baseline".to_string(),
            config_description: "entry sizing".to_string(),
        },
        report: Report::from_outcomes("deadbeef", vec![FieldOutcome::applied("x")]),
    });

    let summary = RunSummary::from_result("baseline", "Amazon Example Service", &result);
    assert!(summary.succeeded);
    assert_eq!(
        summary.artifact.as_ref().map(|a| a.url.as_str()),
        Some("https://calc.example.com/estimate?id=abc123")
    );
    assert!(summary.failure.is_none());
    assert!(summary.failure_code.is_none());
}

#[test]
fn summary_of_a_failure_carries_the_code_and_partial_report() {
    let result = Err(RunFailure {
        kind: FailureKind::NavigationTimeout { waited_ms: 15_000 },
        partial_report: mixed_report(),
    });

    let summary = RunSummary::from_result("heavy", "Amazon Example Service", &result);
    assert!(!summary.succeeded);
    assert_eq!(summary.failure_code.as_deref(), Some("navigation_timeout"));
    assert!(summary.failure.as_deref().unwrap_or("").contains("15000"));
    assert_eq!(summary.report.applied, 2);
}

#[test]
fn summary_serializes_without_empty_optionals() {
    let result = Ok(RunSuccess {
        artifact: Artifact {
            url: "https://calc.example.com/e".to_string(),
            config_name: "n".to_string(),
            config_description: String::new(),
        },
        report: Report::empty("x"),
    });
    let summary = RunSummary::from_result("n", "svc", &result);

    let json = serde_json::to_value(&summary).expect("serialize");
    assert_eq!(json["succeeded"], true);
    assert_eq!(json["artifact"]["url"], "https://calc.example.com/e");
    assert!(json.get("failure").is_none() || json["failure"].is_null());
}

#[test]
fn console_output_lists_only_failed_fields() {
    let result = Err(RunFailure {
        kind: FailureKind::SaveNotConfirmed { waited_ms: 10_000 },
        partial_report: mixed_report(),
    });
    let summary = RunSummary::from_result("heavy", "Amazon Example Service", &result);

    let text = format_run_summary(&summary);
    assert!(text.contains("FAIL"));
    assert!(text.contains("heavy"));
    assert!(text.contains("(2 applied, 2 failed)"));
    assert!(text.contains("[not_found] provisioned_concurrency"));
    assert!(text.contains("[apply_error] region"));
    assert!(!text.contains("[applied]"));
    assert!(!text.contains("requests_per_month —"));
}

#[test]
fn batch_output_ends_with_a_tally() {
    let ok = RunSummary::from_result(
        "a",
        "svc",
        &Ok(RunSuccess {
            artifact: Artifact {
                url: "https://calc.example.com/e".to_string(),
                config_name: "a".to_string(),
                config_description: String::new(),
            },
            report: Report::empty("x"),
        }),
    );
    let bad = RunSummary::from_result(
        "b",
        "svc",
        &Err(RunFailure {
            kind: FailureKind::NoArtifact,
            partial_report: Report::empty("y"),
        }),
    );

    let text = format_batch(&[ok, bad]);
    assert!(text.contains("1 succeeded, 1 failed (2 total)"));
}

#[test]
fn failure_codes_are_stable_identifiers() {
    assert_eq!(
        FailureKind::ServiceNotFound { service: "x".to_string() }.code(),
        "service_not_found"
    );
    assert_eq!(
        FailureKind::NavigationTimeout { waited_ms: 1 }.code(),
        "navigation_timeout"
    );
    assert_eq!(
        FailureKind::SaveNotConfirmed { waited_ms: 1 }.code(),
        "save_not_confirmed"
    );
    assert_eq!(FailureKind::NoArtifact.code(), "no_artifact");
}
