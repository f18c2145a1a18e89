//! Registry of every architectural property

use crate::error::{VerifyError, VerifyResult};
use crate::model::{AzCase, Category, Environment, NodeGroupSpec};
use crate::workspace::Workspace;

use super::checks::{
    backend, cluster, compliance, documentation, environments, isolation, network, node_groups,
    platform, workflows,
};
use super::types::Verdict;

/// How a property is evaluated, and over which generated cases
#[derive(Debug, Clone, Copy)]
pub enum Check {
    /// Evaluated once
    Fixed(fn(&Workspace) -> VerifyResult<Verdict>),
    /// Sampled over environments
    PerEnvironment(fn(&Workspace, Environment) -> VerifyResult<Verdict>),
    /// Sampled over ordered pairs of distinct environments
    EnvironmentPair(fn(&Workspace, Environment, Environment) -> VerifyResult<Verdict>),
    /// Sampled over AZ layouts
    AzTopology(fn(&Workspace, AzCase) -> VerifyResult<Verdict>),
    /// Sampled over consistent node group records
    NodeGroup(fn(&Workspace, &NodeGroupSpec) -> VerifyResult<Verdict>),
}

impl Check {
    pub fn kind(&self) -> &'static str {
        match self {
            Check::Fixed(_) => "fixed",
            Check::PerEnvironment(_) => "per-environment",
            Check::EnvironmentPair(_) => "environment-pair",
            Check::AzTopology(_) => "az-topology",
            Check::NodeGroup(_) => "node-group",
        }
    }

    pub fn is_sampled(&self) -> bool {
        !matches!(self, Check::Fixed(_))
    }
}

/// A named pass/fail predicate over template content
#[derive(Debug, Clone, Copy)]
pub struct Property {
    pub id: &'static str,
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    /// Files the check reads, relative to the template root
    pub inspects: &'static [&'static str],
    pub check: Check,
}

const EKS_VPC: &str = "modules/clusters/eks/vpc.tf";
const EKS_VARIABLES: &str = "modules/clusters/eks/variables.tf";
const ENV_BACKEND: &str = "live/aws/<env>/backend.tf";
const ENV_TFVARS: &str = "live/aws/<env>/terraform.tfvars.example";
const ENV_MAIN: &str = "live/aws/<env>/main.tf";
const PLAN_WORKFLOW: &str = ".github/workflows/terraform-plan.yml";

static CATALOG: &[Property] = &[
    // Backend
    Property {
        id: "backend.native-locking",
        category: Category::Backend,
        title: "State uses S3 native locking",
        description: "backend.tf sets `use_lockfile = true` and declares no `dynamodb_table`.",
        inspects: &[ENV_BACKEND],
        check: Check::PerEnvironment(backend::native_locking),
    },
    Property {
        id: "backend.encryption",
        category: Category::Backend,
        title: "State is encrypted",
        description: "backend.tf sets `encrypt = true`.",
        inspects: &[ENV_BACKEND],
        check: Check::PerEnvironment(backend::encryption),
    },
    // Isolation
    Property {
        id: "isolation.state-paths",
        category: Category::Isolation,
        title: "Environments have distinct state paths",
        description: "For any two distinct environments the backend `bucket` + `key` differ.",
        inspects: &[ENV_BACKEND],
        check: Check::EnvironmentPair(isolation::state_paths),
    },
    Property {
        id: "isolation.vpc-cidrs",
        category: Category::Isolation,
        title: "Environments have distinct VPC CIDRs",
        description: "For any two distinct environments the `vpc_cidr` values differ.",
        inspects: &[ENV_TFVARS],
        check: Check::EnvironmentPair(isolation::vpc_cidrs),
    },
    Property {
        id: "isolation.environment-naming",
        category: Category::Isolation,
        title: "Backends and CIDRs are environment-specific",
        description: "Each backend.tf names its environment and each tfvars example carries the environment's CIDR.",
        inspects: &[ENV_BACKEND, ENV_TFVARS],
        check: Check::Fixed(isolation::environment_naming),
    },
    // Network
    Property {
        id: "network.subnets-multi-az",
        category: Category::Network,
        title: "Subnets span availability zones",
        description: "vpc.tf declares private and public `aws_subnet` resources keyed by `availability_zones`.",
        inspects: &[EKS_VPC],
        check: Check::AzTopology(network::subnets_multi_az),
    },
    Property {
        id: "network.nat-gateways",
        category: Category::Network,
        title: "NAT gateways follow the single-NAT flag",
        description: "vpc.tf declares `aws_nat_gateway` with a `count` driven by `single_nat_gateway`.",
        inspects: &[EKS_VPC],
        check: Check::AzTopology(network::nat_gateways),
    },
    Property {
        id: "network.subnet-discovery-tags",
        category: Category::Network,
        title: "Subnets carry Kubernetes discovery tags",
        description: "vpc.tf tags subnets with `kubernetes.io/cluster/<cluster_name>`.",
        inspects: &[EKS_VPC],
        check: Check::Fixed(network::subnet_discovery_tags),
    },
    Property {
        id: "network.vpc-endpoints",
        category: Category::Network,
        title: "Required VPC endpoints exist",
        description: "vpc_endpoints.tf declares ecr.api, ecr.dkr, sts, logs and ssm endpoints.",
        inspects: &["modules/clusters/eks/vpc_endpoints.tf"],
        check: Check::Fixed(network::vpc_endpoints),
    },
    // Cluster
    Property {
        id: "cluster.control-plane-logs",
        category: Category::Cluster,
        title: "All control plane logs enabled",
        description: "variables.tf lists api, audit, authenticator, controllerManager and scheduler, and validates `control_plane_log_types`.",
        inspects: &[EKS_VARIABLES],
        check: Check::Fixed(cluster::control_plane_logs),
    },
    Property {
        id: "cluster.secrets-encryption",
        category: Category::Cluster,
        title: "Secrets encrypted with KMS",
        description: "eks.tf declares an `aws_kms_key` and an `encryption_config` for `\"secrets\"`.",
        inspects: &["modules/clusters/eks/eks.tf"],
        check: Check::Fixed(cluster::secrets_encryption),
    },
    Property {
        id: "cluster.kubernetes-version",
        category: Category::Cluster,
        title: "Kubernetes version is validated",
        description: "`cluster_version` has a validation block using a `1\\.` version pattern.",
        inspects: &[EKS_VARIABLES],
        check: Check::Fixed(cluster::kubernetes_version),
    },
    Property {
        id: "cluster.oidc-provider",
        category: Category::Cluster,
        title: "OIDC provider for IRSA",
        description: "irsa.tf declares at least one `aws_iam_openid_connect_provider`.",
        inspects: &["modules/clusters/eks/irsa.tf"],
        check: Check::Fixed(cluster::oidc_provider),
    },
    // Node groups
    Property {
        id: "node-groups.schema",
        category: Category::NodeGroups,
        title: "Node group schema covers every field",
        description: "For any consistent node group record, every field it populates is declared in the EKS module variables (taints only when present).",
        inspects: &[EKS_VARIABLES],
        check: Check::NodeGroup(node_groups::schema),
    },
    Property {
        id: "node-groups.system-taint",
        category: Category::NodeGroups,
        title: "System nodes are tainted",
        description: "node_groups.tf renders `dynamic \"taint\"` and staging defines CriticalAddonsOnly=true:NoSchedule.",
        inspects: &["modules/clusters/eks/node_groups.tf", "live/aws/staging/variables.tf"],
        check: Check::Fixed(node_groups::system_taint),
    },
    Property {
        id: "node-groups.apps-untainted",
        category: Category::NodeGroups,
        title: "Apps nodes are untainted",
        description: "The tfvars example gives the apps group `taints = []`.",
        inspects: &[ENV_TFVARS],
        check: Check::PerEnvironment(node_groups::apps_untainted),
    },
    Property {
        id: "node-groups.conservative-autoscaling",
        category: Category::NodeGroups,
        title: "System group scales conservatively",
        description: "When a `system = { ... }` group is present, `max_size - min_size` is at most 3.",
        inspects: &[ENV_TFVARS],
        check: Check::PerEnvironment(node_groups::conservative_autoscaling),
    },
    // Environments
    Property {
        id: "environments.tfvars-examples",
        category: Category::Environments,
        title: "tfvars examples exist",
        description: "Every environment ships terraform.tfvars.example.",
        inspects: &[ENV_TFVARS],
        check: Check::Fixed(environments::tfvars_examples),
    },
    Property {
        id: "environments.instance-types",
        category: Category::Environments,
        title: "Instance family matches environment",
        description: "staging uses t3.medium/large, prod uses m5.xlarge/2xlarge.",
        inspects: &[ENV_TFVARS],
        check: Check::PerEnvironment(environments::instance_types),
    },
    Property {
        id: "environments.autoscaling",
        category: Category::Environments,
        title: "Apps autoscaling ceiling matches environment",
        description: "`max_size` is 10 in staging and 50 in prod.",
        inspects: &[ENV_TFVARS],
        check: Check::PerEnvironment(environments::autoscaling),
    },
    Property {
        id: "environments.nat-strategy",
        category: Category::Environments,
        title: "NAT strategy matches environment",
        description: "`single_nat_gateway` is true in staging and false in prod.",
        inspects: &[ENV_TFVARS],
        check: Check::PerEnvironment(environments::nat_strategy),
    },
    Property {
        id: "environments.retention",
        category: Category::Environments,
        title: "Observability retention matches environment",
        description: "Prometheus/Loki retention is 7/3 days in staging and 30/15 days in prod.",
        inspects: &[ENV_MAIN],
        check: Check::PerEnvironment(environments::retention),
    },
    Property {
        id: "environments.backup-schedule",
        category: Category::Environments,
        title: "Backup schedule matches environment",
        description: "Velero runs `0 2 * * *` keeping 7 days in staging and `0 */6 * * *` keeping 30 days in prod.",
        inspects: &[ENV_MAIN],
        check: Check::PerEnvironment(environments::backup_schedule),
    },
    Property {
        id: "environments.policy-mode",
        category: Category::Environments,
        title: "Policy enforcement matches environment",
        description: "`enforcement_mode` is \"audit\" in staging and \"enforce\" in prod.",
        inspects: &[ENV_MAIN],
        check: Check::PerEnvironment(environments::policy_mode),
    },
    Property {
        id: "environments.mandatory-tags",
        category: Category::Environments,
        title: "Mandatory tags applied",
        description: "main.tf configures `default_tags` with Environment, ManagedBy, Project, Owner and Purpose.",
        inspects: &[ENV_MAIN],
        check: Check::PerEnvironment(environments::mandatory_tags),
    },
    // Platform
    Property {
        id: "platform.argocd",
        category: Category::Platform,
        title: "Argo CD module",
        description: "Helm release `argo-cd` in an `argocd` namespace with `var.tolerations`, exporting namespace, server_service_name and initial_admin_password_secret.",
        inspects: &[
            "modules/platform/argocd/main.tf",
            "modules/platform/argocd/outputs.tf",
        ],
        check: Check::Fixed(platform::argocd),
    },
    Property {
        id: "platform.policy-engine",
        category: Category::Platform,
        title: "Policy engine selection is validated",
        description: "The `engine` variable is validated and accepts kyverno and gatekeeper.",
        inspects: &["modules/platform/policy-engine/variables.tf"],
        check: Check::Fixed(platform::policy_engine),
    },
    Property {
        id: "platform.security-policies",
        category: Category::Platform,
        title: "Baseline security policies defined",
        description: "block_privileged, require_non_root, require_resources and block_latest_tag each exist for kyverno or gatekeeper.",
        inspects: &[
            "modules/platform/policy-engine/policies_kyverno.tf",
            "modules/platform/policy-engine/policies_gatekeeper.tf",
        ],
        check: Check::Fixed(platform::security_policies),
    },
    Property {
        id: "platform.external-secrets",
        category: Category::Platform,
        title: "External Secrets module",
        description: "Creates a namespace and a ClusterSecretStore, takes `aws_region`, ships an example manifest.",
        inspects: &[
            "modules/platform/external-secrets/main.tf",
            "modules/platform/external-secrets/variables.tf",
            "modules/platform/external-secrets/examples/",
        ],
        check: Check::Fixed(platform::external_secrets),
    },
    Property {
        id: "platform.observability",
        category: Category::Platform,
        title: "Observability stack",
        description: "Installs kube-prometheus-stack, Loki and OpenTelemetry and exports Grafana and Prometheus endpoints.",
        inspects: &[
            "modules/platform/observability/main.tf",
            "modules/platform/observability/outputs.tf",
        ],
        check: Check::Fixed(platform::observability),
    },
    Property {
        id: "platform.ingress",
        category: Category::Platform,
        title: "Ingress module",
        description: "Validates `ingress_type`, takes `route53_zone_id`, issues Let's Encrypt certificates, ships an ALB or NGINX example.",
        inspects: &[
            "modules/platform/ingress/variables.tf",
            "modules/platform/ingress/cert_manager.tf",
            "modules/platform/ingress/examples/",
        ],
        check: Check::Fixed(platform::ingress),
    },
    Property {
        id: "platform.velero",
        category: Category::Platform,
        title: "Velero backup bucket",
        description: "Creates an `aws_s3_bucket` and exports its name.",
        inspects: &[
            "modules/platform/velero/main.tf",
            "modules/platform/velero/outputs.tf",
        ],
        check: Check::Fixed(platform::velero),
    },
    Property {
        id: "platform.irsa-trust",
        category: Category::Platform,
        title: "IRSA trust policies",
        description: "Every present IRSA consumer declares an `aws_iam_role` trusting `oidc_provider` with `StringEquals`.",
        inspects: &[
            "modules/platform/external-secrets/main.tf",
            "modules/platform/velero/main.tf",
            "modules/platform/ingress/alb_controller.tf",
        ],
        check: Check::Fixed(platform::irsa_trust),
    },
    // Compliance
    Property {
        id: "compliance.cloudtrail",
        category: Category::Compliance,
        title: "CloudTrail enabled",
        description: "The compliance module declares an `aws_cloudtrail`.",
        inspects: &["modules/compliance/main.tf"],
        check: Check::Fixed(compliance::cloudtrail),
    },
    Property {
        id: "compliance.aws-config",
        category: Category::Compliance,
        title: "AWS Config enabled",
        description: "The compliance module declares a configuration recorder and a delivery channel.",
        inspects: &["modules/compliance/main.tf"],
        check: Check::Fixed(compliance::aws_config),
    },
    Property {
        id: "compliance.guardduty",
        category: Category::Compliance,
        title: "GuardDuty enabled",
        description: "The compliance module declares an `aws_guardduty_detector`.",
        inspects: &["modules/compliance/main.tf"],
        check: Check::Fixed(compliance::guardduty),
    },
    Property {
        id: "compliance.bucket-protection",
        category: Category::Compliance,
        title: "Buckets protected from deletion",
        description: "Compliance bucket policies deny DeleteBucket; the Velero module creates its bucket.",
        inspects: &["modules/compliance/main.tf", "modules/platform/velero/main.tf"],
        check: Check::Fixed(compliance::bucket_protection),
    },
    // Workflows
    Property {
        id: "workflows.plan-stages",
        category: Category::Workflows,
        title: "Plan workflow runs fmt, validate and plan",
        description: "terraform-plan.yml runs `terraform fmt -check`, `terraform validate` and `terraform plan`.",
        inspects: &[PLAN_WORKFLOW],
        check: Check::Fixed(workflows::plan_stages),
    },
    Property {
        id: "workflows.plan-oidc",
        category: Category::Workflows,
        title: "Plan workflow uses OIDC",
        description: "terraform-plan.yml uses aws-actions/configure-aws-credentials with `role-to-assume`.",
        inspects: &[PLAN_WORKFLOW],
        check: Check::Fixed(workflows::plan_oidc),
    },
    Property {
        id: "workflows.plan-comment",
        category: Category::Workflows,
        title: "Plan is posted to the pull request",
        description: "terraform-plan.yml comments the plan on the pull request.",
        inspects: &[PLAN_WORKFLOW],
        check: Check::Fixed(workflows::plan_comment),
    },
    Property {
        id: "workflows.apply-staging",
        category: Category::Workflows,
        title: "Staging applies automatically",
        description: "terraform-apply-staging.yml triggers on push to main with no environment gate.",
        inspects: &[".github/workflows/terraform-apply-staging.yml"],
        check: Check::Fixed(workflows::apply_staging),
    },
    Property {
        id: "workflows.apply-prod",
        category: Category::Workflows,
        title: "Prod apply requires approval",
        description: "terraform-apply-prod.yml runs in the protected `production` environment.",
        inspects: &[".github/workflows/terraform-apply-prod.yml"],
        check: Check::Fixed(workflows::apply_prod),
    },
    // Documentation
    Property {
        id: "documentation.readme",
        category: Category::Documentation,
        title: "README present",
        description: "README.md exists at the template root.",
        inspects: &["README.md"],
        check: Check::Fixed(documentation::readme),
    },
    Property {
        id: "documentation.guides",
        category: Category::Documentation,
        title: "Operational guides present",
        description: "docs/troubleshooting.md and docs/cost-optimization.md exist.",
        inspects: &["docs/troubleshooting.md", "docs/cost-optimization.md"],
        check: Check::Fixed(documentation::guides),
    },
    Property {
        id: "documentation.tooling",
        category: Category::Documentation,
        title: "Documentation tooling configured",
        description: ".terraform-docs.yml and .tflint.hcl exist.",
        inspects: &[".terraform-docs.yml", ".tflint.hcl"],
        check: Check::Fixed(documentation::tooling),
    },
    Property {
        id: "documentation.descriptions",
        category: Category::Documentation,
        title: "Variables and outputs are described",
        description: "Every variable and output of the platform modules has a non-empty description.",
        inspects: &["modules/<module>/variables.tf", "modules/<module>/outputs.tf"],
        check: Check::Fixed(documentation::descriptions),
    },
];

/// Every property, in report order
pub fn all() -> &'static [Property] {
    CATALOG
}

pub fn find(id: &str) -> VerifyResult<&'static Property> {
    CATALOG
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| VerifyError::UnknownProperty { id: id.to_string() })
}

pub fn ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|p| p.id)
}
