//! Contract: plan on pull requests, apply staging on merge, gate prod.

use infracheck::FailureKind;

use crate::common::*;
use crate::{assert_fails, assert_holds};

const IDS: &[&str] = &[
    "workflows.plan-stages",
    "workflows.plan-oidc",
    "workflows.plan-comment",
    "workflows.apply-staging",
    "workflows.apply-prod",
];

const PLAN: &str = ".github/workflows/terraform-plan.yml";
const APPLY_STAGING: &str = ".github/workflows/terraform-apply-staging.yml";
const APPLY_PROD: &str = ".github/workflows/terraform-apply-prod.yml";

#[test]
fn contract_compliant_workflows_hold() {
    let env = TestEnv::compliant();
    let report = env.verify(IDS);

    for id in IDS {
        assert_holds!(report, id);
    }
}

#[test]
fn contract_plan_must_check_formatting() {
    let env = TestEnv::compliant();
    env.edit_file(PLAN, "terraform fmt -check -recursive", "terraform fmt -recursive");

    let report = env.verify(IDS);
    assert_fails!(report, "workflows.plan-stages", FailureKind::PatternMismatch);
    assert!(outcome(&report, "workflows.plan-stages")
        .verdict
        .message()
        .contains("fmt -check"));
}

#[test]
fn contract_static_credentials_fail_oidc() {
    let env = TestEnv::compliant();
    env.edit_file(
        PLAN,
        "role-to-assume: ${{ secrets.AWS_PLAN_ROLE_ARN }}",
        "aws-access-key-id: ${{ secrets.AWS_ACCESS_KEY_ID }}",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "workflows.plan-oidc", FailureKind::PatternMismatch);
}

/// CONTRACT: Staging must not wait on an environment approval.
#[test]
fn contract_gated_staging_apply_fails() {
    let env = TestEnv::compliant();
    env.edit_file(
        APPLY_STAGING,
        "    runs-on: ubuntu-latest\n",
        "    runs-on: ubuntu-latest\n    environment:\n      name: staging\n",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "workflows.apply-staging", FailureKind::PatternMismatch);
    assert!(outcome(&report, "workflows.apply-staging")
        .verdict
        .message()
        .contains("must not contain `environment:`"));
}

#[test]
fn contract_manual_staging_apply_fails() {
    let env = TestEnv::compliant();
    env.edit_file(
        APPLY_STAGING,
        "on:\n  push:\n    branches: [main]\n",
        "on:\n  workflow_dispatch:\n",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "workflows.apply-staging", FailureKind::PatternMismatch);
}

#[test]
fn contract_ungated_prod_apply_fails() {
    let env = TestEnv::compliant();
    env.edit_file(APPLY_PROD, "    environment:\n      name: production\n", "");

    let report = env.verify(IDS);
    assert_fails!(report, "workflows.apply-prod", FailureKind::PatternMismatch);
    assert_eq!(
        outcome(&report, "workflows.apply-prod")
            .verdict
            .details()
            .len(),
        2
    );
}

#[test]
fn contract_missing_plan_workflow_is_file_not_found() {
    let env = TestEnv::builder().without_file(PLAN).build();

    let report = env.verify(IDS);
    assert_fails!(report, "workflows.plan-stages", FailureKind::FileNotFound);
    assert_fails!(report, "workflows.plan-oidc", FailureKind::FileNotFound);
    assert_fails!(report, "workflows.plan-comment", FailureKind::FileNotFound);
    assert_holds!(report, "workflows.apply-prod");
}
