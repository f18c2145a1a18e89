//! Contract: platform add-ons are installed with their interfaces.

use infracheck::{CheckStatus, FailureKind};

use crate::common::*;
use crate::{assert_fails, assert_holds};

const IDS: &[&str] = &[
    "platform.argocd",
    "platform.policy-engine",
    "platform.security-policies",
    "platform.external-secrets",
    "platform.observability",
    "platform.ingress",
    "platform.velero",
    "platform.irsa-trust",
];

#[test]
fn contract_compliant_platform_holds() {
    let env = TestEnv::compliant();
    let report = env.verify(IDS);

    for id in IDS {
        assert_holds!(report, id);
    }
}

#[test]
fn contract_argocd_outputs_are_required() {
    let env = TestEnv::compliant();
    let outputs = "modules/platform/argocd/outputs.tf";
    env.edit_file(
        outputs,
        r#"output "initial_admin_password_secret""#,
        r#"output "admin_secret""#,
    );

    let report = env.verify(IDS);
    assert_fails!(report, "platform.argocd", FailureKind::PatternMismatch);
    assert!(outcome(&report, "platform.argocd")
        .verdict
        .message()
        .contains("initial_admin_password_secret"));
}

/// CONTRACT: An output name inside a comment is not an output.
#[test]
fn contract_commented_output_does_not_count() {
    let env = TestEnv::compliant();
    env.write_file(
        "modules/platform/velero/outputs.tf",
        "# backup_bucket_name is exported by the root module\n",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "platform.velero", FailureKind::PatternMismatch);
}

#[test]
fn contract_engine_must_be_validated() {
    let env = TestEnv::compliant();
    env.edit_file(
        "modules/platform/policy-engine/variables.tf",
        r#"  validation {
    condition     = contains(["kyverno", "gatekeeper"], var.engine)
    error_message = "engine must be kyverno or gatekeeper."
  }
"#,
        "  # kyverno or gatekeeper\n",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "platform.policy-engine", FailureKind::PatternMismatch);
}

#[test]
fn contract_policies_may_live_in_either_engine() {
    let env = TestEnv::compliant();
    let kyverno = "modules/platform/policy-engine/policies_kyverno.tf";
    let policies = env.read_file(kyverno);
    env.remove_file(kyverno);
    env.write_file(
        "modules/platform/policy-engine/policies_gatekeeper.tf",
        &policies.replace("ClusterPolicy", "K8sConstraint"),
    );

    let report = env.verify(IDS);
    assert_holds!(report, "platform.security-policies");
    assert!(outcome(&report, "platform.security-policies")
        .verdict
        .message()
        .contains("gatekeeper"));
}

#[test]
fn contract_missing_policy_files_are_file_not_found() {
    let env = TestEnv::builder()
        .without_file("modules/platform/policy-engine/policies_kyverno.tf")
        .build();

    let report = env.verify(IDS);
    assert_fails!(
        report,
        "platform.security-policies",
        FailureKind::FileNotFound
    );
}

#[test]
fn contract_missing_policy_is_named() {
    let env = TestEnv::compliant();
    env.edit_file(
        "modules/platform/policy-engine/policies_kyverno.tf",
        "block_latest_tag",
        "allow_any_tag",
    );

    let report = env.verify(IDS);
    assert_fails!(
        report,
        "platform.security-policies",
        FailureKind::PatternMismatch
    );
    assert!(outcome(&report, "platform.security-policies")
        .verdict
        .message()
        .contains("block_latest_tag"));
}

#[test]
fn contract_external_secrets_needs_an_example() {
    let env = TestEnv::builder()
        .without_file("modules/platform/external-secrets/examples/external-secret-example.yaml")
        .build();

    let report = env.verify(IDS);
    assert_fails!(
        report,
        "platform.external-secrets",
        FailureKind::PatternMismatch
    );

    env.write_file(
        "modules/platform/external-secrets/examples/example.yaml",
        EXTERNAL_SECRET_EXAMPLE,
    );
    let report = env.verify(IDS);
    assert_holds!(report, "platform.external-secrets");
}

/// CONTRACT: Either endpoint naming convention satisfies observability.
#[test]
fn contract_observability_accepts_url_outputs() {
    let env = TestEnv::compliant();
    let outputs = "modules/platform/observability/outputs.tf";
    let renamed = env
        .read_file(outputs)
        .replace("grafana_endpoint", "grafana_url")
        .replace("prometheus_endpoint", "prometheus_url");
    env.write_file(outputs, &renamed);

    let report = env.verify(IDS);
    assert_holds!(report, "platform.observability");
}

#[test]
fn contract_ingress_accepts_nginx_example() {
    let env = TestEnv::builder()
        .without_file("modules/platform/ingress/examples/ingress-alb-example.yaml")
        .with_file(
            "modules/platform/ingress/examples/ingress-nginx-example.yaml",
            "kind: Ingress\nspec:\n  ingressClassName: nginx\n",
        )
        .build();

    let report = env.verify(IDS);
    assert_holds!(report, "platform.ingress");
}

#[test]
fn contract_irsa_trust_needs_string_equals() {
    let env = TestEnv::compliant();
    env.edit_file(
        "modules/platform/velero/main.tf",
        "StringEquals",
        "StringLike",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "platform.irsa-trust", FailureKind::PatternMismatch);
    assert!(outcome(&report, "platform.irsa-trust")
        .verdict
        .message()
        .contains("velero"));
}

#[test]
fn contract_irsa_trust_skips_without_consumers() {
    let env = TestEnv::builder()
        .without_file("modules/platform/external-secrets/main.tf")
        .without_file("modules/platform/velero/main.tf")
        .without_file("modules/platform/ingress/alb_controller.tf")
        .build();

    let report = env.verify(IDS);
    assert_eq!(
        outcome(&report, "platform.irsa-trust").status(),
        CheckStatus::Skip
    );
    assert_fails!(report, "platform.velero", FailureKind::FileNotFound);
}
