//! EKS control plane properties

use crate::error::VerifyResult;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, EKS_MODULE, VARIABLES_FILE};

const CONTROL_PLANE_LOG_TYPES: &[&str] = &[
    "api",
    "audit",
    "authenticator",
    "controllerManager",
    "scheduler",
];

pub fn control_plane_logs(ws: &Workspace) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.module_file(EKS_MODULE, VARIABLES_FILE))?;

    let mut expect = Expectations::new(ws);
    for log_type in CONTROL_PLANE_LOG_TYPES {
        expect.contains(&vars, log_type);
    }
    expect.require(
        vars.has_validation_for("control_plane_log_types")?,
        "variable `control_plane_log_types` has no validation block",
    );
    Ok(expect.verdict("all five control plane log types enabled and validated"))
}

/// Kubernetes secrets are envelope-encrypted with a KMS key.
pub fn secrets_encryption(ws: &Workspace) -> VerifyResult<Verdict> {
    let eks = ws.read(ws.module_file(EKS_MODULE, "eks.tf"))?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&eks, "aws_kms_key")
        .contains(&eks, "encryption_config")
        .contains(&eks, r#""secrets""#);
    Ok(expect.verdict("secrets encrypted with a dedicated KMS key"))
}

/// `cluster_version` is validated against a `1\.` version regex.
pub fn kubernetes_version(ws: &Workspace) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.module_file(EKS_MODULE, VARIABLES_FILE))?;

    let mut expect = Expectations::new(ws);
    expect.require(
        vars.has_validation_for("cluster_version")?,
        "variable `cluster_version` has no validation block",
    );
    // Matches the escaped `1\\.` as written inside an HCL regex string.
    expect.matches(&vars, r"1\\.")?;
    Ok(expect.verdict("cluster_version is validated"))
}

pub fn oidc_provider(ws: &Workspace) -> VerifyResult<Verdict> {
    let irsa = ws.read(ws.module_file(EKS_MODULE, "irsa.tf"))?;

    let providers = irsa.resource_count("aws_iam_openid_connect_provider")?;
    let mut expect = Expectations::new(ws);
    expect.require(
        providers > 0,
        "irsa.tf declares no `aws_iam_openid_connect_provider` resource",
    );
    Ok(expect.verdict(format!("{providers} OIDC provider(s) for IRSA")))
}
