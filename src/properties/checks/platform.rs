//! Platform add-on modules

use std::path::PathBuf;

use crate::error::{VerifyError, VerifyResult};
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, MAIN_FILE, OUTPUTS_FILE, VARIABLES_FILE};

const ARGOCD: &str = "platform/argocd";
const POLICY_ENGINE: &str = "platform/policy-engine";
const EXTERNAL_SECRETS: &str = "platform/external-secrets";
const OBSERVABILITY: &str = "platform/observability";
const INGRESS: &str = "platform/ingress";
const VELERO: &str = "platform/velero";

const SECURITY_POLICIES: &[&str] = &[
    "block_privileged",
    "require_non_root",
    "require_resources",
    "block_latest_tag",
];

/// Output names of a module's outputs.tf
fn output_names(ws: &Workspace, module: &str) -> VerifyResult<Vec<String>> {
    let outputs = ws.read(ws.module_file(module, OUTPUTS_FILE))?;
    let names = outputs.outputs()?.map(str::to_string).collect();
    Ok(names)
}

fn any_output(names: &[String], candidates: &[&str]) -> bool {
    names.iter().any(|n| candidates.contains(&n.as_str()))
}

fn any_exists(ws: &Workspace, paths: &[PathBuf]) -> bool {
    paths.iter().any(|p| ws.locate(p).is_some())
}

pub fn argocd(ws: &Workspace) -> VerifyResult<Verdict> {
    let main = ws.read(ws.module_file(ARGOCD, MAIN_FILE))?;
    let outputs = output_names(ws, ARGOCD)?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&main, r#"resource "helm_release""#)
        .contains(&main, "argo-cd")
        .contains(&main, r#"resource "kubernetes_namespace""#)
        .contains(&main, r#""argocd""#)
        .contains(&main, "var.tolerations");
    for name in ["namespace", "server_service_name", "initial_admin_password_secret"] {
        expect.require(
            outputs.iter().any(|o| o == name),
            format!("{ARGOCD}/{OUTPUTS_FILE}: missing output `{name}`"),
        );
    }
    Ok(expect.verdict("Argo CD installed via Helm with its outputs"))
}

pub fn policy_engine(ws: &Workspace) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.module_file(POLICY_ENGINE, VARIABLES_FILE))?;

    let mut expect = Expectations::new(ws);
    expect
        .require(
            vars.has_validation_for("engine")?,
            "variable `engine` has no validation block",
        )
        .contains(&vars, "kyverno")
        .contains(&vars, "gatekeeper");
    Ok(expect.verdict("engine is validated to kyverno | gatekeeper"))
}

/// Each baseline policy exists for at least one engine.
pub fn security_policies(ws: &Workspace) -> VerifyResult<Verdict> {
    let kyverno_path = ws.module_file(POLICY_ENGINE, "policies_kyverno.tf");
    let gatekeeper_path = ws.module_file(POLICY_ENGINE, "policies_gatekeeper.tf");
    let kyverno = ws.read_optional(&kyverno_path)?;
    let gatekeeper = ws.read_optional(&gatekeeper_path)?;

    if kyverno.is_none() && gatekeeper.is_none() {
        return Err(VerifyError::FileNotFound {
            path: ws.display_path(&kyverno_path),
        });
    }

    let mut expect = Expectations::new(ws);
    for policy in SECURITY_POLICIES {
        let found = [&kyverno, &gatekeeper]
            .into_iter()
            .flatten()
            .any(|content| content.contains(policy));
        expect.require(found, format!("policy `{policy}` defined for no engine"));
    }
    let engines = [("kyverno", &kyverno), ("gatekeeper", &gatekeeper)]
        .into_iter()
        .filter(|(_, c)| c.is_some())
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(", ");
    Ok(expect.verdict(format!("baseline policies defined ({engines})")))
}

pub fn external_secrets(ws: &Workspace) -> VerifyResult<Verdict> {
    let main = ws.read(ws.module_file(EXTERNAL_SECRETS, MAIN_FILE))?;
    let vars = ws.read(ws.module_file(EXTERNAL_SECRETS, VARIABLES_FILE))?;
    let examples = ws.module_path(EXTERNAL_SECRETS).join("examples");

    let mut expect = Expectations::new(ws);
    expect
        .contains(&main, "ClusterSecretStore")
        .contains(&main, r#"resource "kubernetes_namespace""#)
        .contains(&vars, r#"variable "aws_region""#)
        .require(
            any_exists(
                ws,
                &[
                    examples.join("external-secret-example.yaml"),
                    examples.join("example.yaml"),
                ],
            ),
            format!("{EXTERNAL_SECRETS}/examples: no ExternalSecret example manifest"),
        );
    Ok(expect.verdict("ClusterSecretStore backed by AWS Secrets Manager"))
}

pub fn observability(ws: &Workspace) -> VerifyResult<Verdict> {
    let main = ws.read(ws.module_file(OBSERVABILITY, MAIN_FILE))?;
    let outputs = output_names(ws, OBSERVABILITY)?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&main, "kube-prometheus-stack")
        .contains(&main, "loki")
        .contains(&main, "opentelemetry")
        .require(
            any_output(&outputs, &["grafana_endpoint", "grafana_url"]),
            format!("{OBSERVABILITY}/{OUTPUTS_FILE}: no Grafana endpoint output"),
        )
        .require(
            any_output(&outputs, &["prometheus_endpoint", "prometheus_url"]),
            format!("{OBSERVABILITY}/{OUTPUTS_FILE}: no Prometheus endpoint output"),
        );
    Ok(expect.verdict("metrics, logs and traces stack installed"))
}

pub fn ingress(ws: &Workspace) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.module_file(INGRESS, VARIABLES_FILE))?;
    let cert_manager = ws.read(ws.module_file(INGRESS, "cert_manager.tf"))?;
    let examples = ws.module_path(INGRESS).join("examples");

    let mut expect = Expectations::new(ws);
    expect
        .require(
            vars.has_validation_for("ingress_type")?,
            "variable `ingress_type` has no validation block",
        )
        .contains(&vars, r#"variable "route53_zone_id""#)
        .contains(&cert_manager, "ClusterIssuer")
        .contains(&cert_manager, "letsencrypt")
        .require(
            any_exists(
                ws,
                &[
                    examples.join("ingress-alb-example.yaml"),
                    examples.join("ingress-nginx-example.yaml"),
                ],
            ),
            format!("{INGRESS}/examples: no ALB or NGINX ingress example"),
        );
    Ok(expect.verdict("ingress type validated with cert-manager issuer"))
}

pub fn velero(ws: &Workspace) -> VerifyResult<Verdict> {
    let main = ws.read(ws.module_file(VELERO, MAIN_FILE))?;
    let outputs = output_names(ws, VELERO)?;

    let buckets = main.resource_count("aws_s3_bucket")?;
    let mut expect = Expectations::new(ws);
    expect
        .require(
            buckets > 0,
            format!("{VELERO}/{MAIN_FILE}: no `aws_s3_bucket` resource"),
        )
        .require(
            any_output(&outputs, &["backup_bucket_name", "bucket_name"]),
            format!("{VELERO}/{OUTPUTS_FILE}: no bucket name output"),
        );
    Ok(expect.verdict("backup bucket created and exported"))
}

/// IRSA roles trust the cluster OIDC provider with a `StringEquals` condition.
pub fn irsa_trust(ws: &Workspace) -> VerifyResult<Verdict> {
    let candidates = [
        ws.module_file(EXTERNAL_SECRETS, MAIN_FILE),
        ws.module_file(VELERO, MAIN_FILE),
        ws.module_file(INGRESS, "alb_controller.tf"),
    ];

    let mut expect = Expectations::new(ws);
    let mut inspected = 0;
    for path in &candidates {
        let Some(content) = ws.read_optional(path)? else {
            continue;
        };
        inspected += 1;
        expect
            .contains(&content, "aws_iam_role")
            .contains(&content, "oidc_provider")
            .contains(&content, "StringEquals");
    }

    if inspected == 0 {
        return Ok(Verdict::skip("no IRSA-consuming module present"));
    }
    Ok(expect.verdict(format!("IRSA trust scoped to the OIDC provider in {inspected} file(s)")))
}
