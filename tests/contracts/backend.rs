//! Contract: state backends lock natively and encrypt at rest.

use infracheck::FailureKind;

use crate::common::*;
use crate::{assert_fails, assert_holds};

const IDS: &[&str] = &["backend.native-locking", "backend.encryption"];

#[test]
fn contract_compliant_backends_hold() {
    let env = TestEnv::compliant();
    let report = env.verify(IDS);

    assert_holds!(report, "backend.native-locking");
    assert_holds!(report, "backend.encryption");
}

/// CONTRACT: A DynamoDB lock table is rejected even when use_lockfile is set.
#[test]
fn contract_dynamodb_table_is_rejected() {
    let env = TestEnv::compliant();
    env.edit_file(
        "live/aws/prod/backend.tf",
        "    use_lockfile = true\n",
        "    use_lockfile = true\n    dynamodb_table = \"terraform-locks\"\n",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "backend.native-locking", FailureKind::PatternMismatch);
    let outcome = outcome(&report, "backend.native-locking");
    assert!(outcome.verdict.message().contains("dynamodb_table"));
    assert!(outcome
        .verdict
        .details()
        .iter()
        .any(|d| d == "counterexample: env=prod"));
    assert_holds!(report, "backend.encryption");
}

#[test]
fn contract_missing_lockfile_flag_fails() {
    let env = TestEnv::compliant();
    env.edit_file("live/aws/staging/backend.tf", "    use_lockfile = true\n", "");

    let report = env.verify(IDS);
    assert_fails!(report, "backend.native-locking", FailureKind::PatternMismatch);
    assert!(outcome(&report, "backend.native-locking")
        .verdict
        .details()
        .iter()
        .any(|d| d == "counterexample: env=staging"));
}

#[test]
fn contract_unencrypted_state_fails() {
    let env = TestEnv::compliant();
    env.edit_file("live/aws/prod/backend.tf", "encrypt      = true", "encrypt      = false");

    let report = env.verify(IDS);
    assert_fails!(report, "backend.encryption", FailureKind::PatternMismatch);
    assert_holds!(report, "backend.native-locking");
}

#[test]
fn contract_missing_backend_is_file_not_found() {
    let env = TestEnv::builder()
        .without_file("live/aws/staging/backend.tf")
        .build();

    let report = env.verify(IDS);
    assert_fails!(report, "backend.native-locking", FailureKind::FileNotFound);
    assert_fails!(report, "backend.encryption", FailureKind::FileNotFound);
    assert!(outcome(&report, "backend.encryption")
        .verdict
        .message()
        .contains("backend.tf"));
}
