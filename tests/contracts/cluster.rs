//! Contract: the control plane is logged, encrypted and IRSA-capable.

use infracheck::FailureKind;

use crate::common::*;
use crate::{assert_fails, assert_holds};

const IDS: &[&str] = &[
    "cluster.control-plane-logs",
    "cluster.secrets-encryption",
    "cluster.kubernetes-version",
    "cluster.oidc-provider",
];

const VARIABLES: &str = "modules/clusters/eks/variables.tf";

#[test]
fn contract_compliant_cluster_holds() {
    let env = TestEnv::compliant();
    let report = env.verify(IDS);

    for id in IDS {
        assert_holds!(report, id);
    }
}

#[test]
fn contract_missing_log_type_fails() {
    let env = TestEnv::compliant();
    let vars = env
        .read_file(VARIABLES)
        .replace(r#", "scheduler""#, "");
    env.write_file(VARIABLES, &vars);

    let report = env.verify(IDS);
    assert_fails!(
        report,
        "cluster.control-plane-logs",
        FailureKind::PatternMismatch
    );
    assert!(outcome(&report, "cluster.control-plane-logs")
        .verdict
        .message()
        .contains("scheduler"));
}

/// CONTRACT: A validation block inside another variable does not count.
#[test]
fn contract_validation_is_scoped_to_its_variable() {
    let env = TestEnv::compliant();
    env.edit_file(
        VARIABLES,
        r#"  validation {
    condition     = can(regex("^1\\.[0-9]+$", var.cluster_version))
    error_message = "cluster_version must look like 1.x."
  }
"#,
        "",
    );
    env.edit_file(
        VARIABLES,
        r#"variable "vpc_cidr" {"#,
        r#"variable "vpc_cidr" {
  validation {
    condition     = can(regex("^1\\.", var.vpc_cidr))
    error_message = "unrelated"
  }"#,
    );

    let report = env.verify(IDS);
    assert_fails!(
        report,
        "cluster.kubernetes-version",
        FailureKind::PatternMismatch
    );
    assert!(outcome(&report, "cluster.kubernetes-version")
        .verdict
        .message()
        .contains("`cluster_version` has no validation block"));
}

#[test]
fn contract_unencrypted_secrets_fail() {
    let env = TestEnv::compliant();
    env.edit_file(
        "modules/clusters/eks/eks.tf",
        r#"resources = ["secrets"]"#,
        "resources = []",
    );

    let report = env.verify(IDS);
    assert_fails!(
        report,
        "cluster.secrets-encryption",
        FailureKind::PatternMismatch
    );
}

#[test]
fn contract_missing_oidc_provider_fails() {
    let env = TestEnv::compliant();
    env.edit_file(
        "modules/clusters/eks/irsa.tf",
        r#"resource "aws_iam_openid_connect_provider" "this""#,
        r#"data "aws_iam_openid_connect_provider" "this""#,
    );

    let report = env.verify(IDS);
    assert_fails!(report, "cluster.oidc-provider", FailureKind::PatternMismatch);
}

#[test]
fn contract_missing_eks_tf_is_file_not_found() {
    let env = TestEnv::builder()
        .without_file("modules/clusters/eks/eks.tf")
        .build();

    let report = env.verify(IDS);
    assert_fails!(report, "cluster.secrets-encryption", FailureKind::FileNotFound);
    assert_holds!(report, "cluster.control-plane-logs");
}
