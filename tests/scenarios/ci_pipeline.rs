//! Scenario: Verification in CI
//!
//! Journey: The template's pull-request pipeline runs infracheck.
//!
//! Steps:
//! 1. GitHub Actions runs `infracheck check` on a broken change
//! 2. Failures surface as workflow annotations
//! 3. A downstream job consumes `--json` output
//!
//! Success Criteria:
//! - Non-zero exit on failure
//! - One `::error` annotation per failed property plus a summary notice
//! - NDJSON stream is complete and parseable

use crate::common::*;
use crate::{assert_output_contains, assert_output_not_contains};

/// SCENARIO: Broken pull request annotated in GitHub Actions
#[test]
fn scenario_github_actions_annotations() {
    let env = TestEnv::compliant();
    env.edit_file(
        "live/aws/prod/backend.tf",
        "prod/terraform.tfstate",
        "staging/terraform.tfstate",
    );

    // Step 1
    let result = env.run_with_env(&["check"], &[("GITHUB_ACTIONS", "true"), ("CI", "true")]);
    assert_eq!(result.exit_code, 1, "{}", result.combined_output());

    // Step 2
    let errors: Vec<&str> = result
        .stdout
        .lines()
        .filter(|l| l.starts_with("::error "))
        .collect();
    // The shared key also drops "prod" from prod's backend
    assert_eq!(errors.len(), 2, "{}", result.stdout);
    let state_paths = errors
        .iter()
        .find(|l| l.contains("title=isolation.state-paths%3A Environments have distinct state paths"))
        .unwrap_or_else(|| panic!("no state-paths annotation:\n{}", result.stdout));
    assert!(state_paths.contains("counterexample"), "{}", state_paths);
    assert!(errors
        .iter()
        .any(|l| l.contains("title=isolation.environment-naming")));
    assert_output_contains!(result, "::notice title=infracheck::44 passed, 0 skipped, 2 failed");
}

/// SCENARIO: No annotations outside GitHub Actions
#[test]
fn scenario_no_annotations_locally() {
    let env = TestEnv::builder().without_file("README.md").build();

    let result = env.run(&["check"]);
    assert_eq!(result.exit_code, 1);
    assert_output_not_contains!(result, "::error");
}

/// SCENARIO: JSON consumer sees every property once, in catalog order
#[test]
fn scenario_json_consumer() {
    let env = TestEnv::builder()
        .without_file("modules/compliance/main.tf")
        .without_file("modules/platform/velero/main.tf")
        .build();

    // Step 3
    let result = env.run_with_env(&["check", "--json"], &[("GITHUB_ACTIONS", "true")]);
    assert_eq!(result.exit_code, 1);

    let events = result.events();
    let ids: Vec<&str> = events
        .iter()
        .filter(|e| e["event"] == "check")
        .filter_map(|e| e["id"].as_str())
        .collect();
    let catalog: Vec<&str> = infracheck::properties::catalog::ids().collect();
    assert_eq!(ids, catalog);

    let skipped = events
        .iter()
        .find(|e| e["id"] == "compliance.bucket-protection")
        .unwrap();
    assert_eq!(skipped["status"], "skip");

    let complete = events.last().unwrap();
    assert_eq!(complete["skipped"], 1);
    // JSON mode never interleaves annotations
    assert!(!result.stdout.contains("::error"));
}
