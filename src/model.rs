//! Domain values shared by the checks and the sampling harness.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Deployment target with its own directory under the environments root
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Staging,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Staging, Environment::Prod];

    /// Directory name under the environments root
    pub fn name(&self) -> &'static str {
        match self {
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    /// Expected literal values for this environment
    pub fn profile(&self) -> &'static EnvironmentProfile {
        match self {
            Environment::Staging => &STAGING,
            Environment::Prod => &PROD,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Per-environment literals the template must reproduce verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentProfile {
    pub prometheus_retention_days: u32,
    pub loki_retention_days: u32,
    pub backup_schedule: &'static str,
    pub backup_retention_days: u32,
    pub enforcement_mode: &'static str,
    pub vpc_cidr: &'static str,
    pub single_nat_gateway: bool,
    pub apps_max_size: u32,
    /// Regex over the tfvars example selecting the expected instance family
    pub instance_types: &'static str,
}

static STAGING: EnvironmentProfile = EnvironmentProfile {
    prometheus_retention_days: 7,
    loki_retention_days: 3,
    backup_schedule: "0 2 * * *",
    backup_retention_days: 7,
    enforcement_mode: "audit",
    vpc_cidr: "10.0.0.0/16",
    single_nat_gateway: true,
    apps_max_size: 10,
    instance_types: r"t3\.(medium|large)",
};

static PROD: EnvironmentProfile = EnvironmentProfile {
    prometheus_retention_days: 30,
    loki_retention_days: 15,
    backup_schedule: "0 */6 * * *",
    backup_retention_days: 30,
    enforcement_mode: "enforce",
    vpc_cidr: "10.1.0.0/16",
    single_nat_gateway: false,
    apps_max_size: 50,
    instance_types: r"m5\.(xlarge|2xlarge)",
};

/// Report section a property belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Backend,
    Isolation,
    Network,
    Cluster,
    NodeGroups,
    Environments,
    Platform,
    Compliance,
    Workflows,
    Documentation,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Backend,
        Category::Isolation,
        Category::Network,
        Category::Cluster,
        Category::NodeGroups,
        Category::Environments,
        Category::Platform,
        Category::Compliance,
        Category::Workflows,
        Category::Documentation,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Category::Backend => "backend",
            Category::Isolation => "isolation",
            Category::Network => "network",
            Category::Cluster => "cluster",
            Category::NodeGroups => "node-groups",
            Category::Environments => "environments",
            Category::Platform => "platform",
            Category::Compliance => "compliance",
            Category::Workflows => "workflows",
            Category::Documentation => "documentation",
        }
    }

    /// Heading used in the text report
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Backend => "State Backend",
            Category::Isolation => "Environment Isolation",
            Category::Network => "Network",
            Category::Cluster => "EKS Cluster",
            Category::NodeGroups => "Node Groups",
            Category::Environments => "Environment Settings",
            Category::Platform => "Platform Add-ons",
            Category::Compliance => "Compliance",
            Category::Workflows => "CI Workflows",
            Category::Documentation => "Documentation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// AZ layout drawn for the network properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AzCase {
    pub az_count: u8,
    pub single_nat_gateway: bool,
}

impl std::fmt::Display for AzCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "az_count={} single_nat_gateway={}",
            self.az_count, self.single_nat_gateway
        )
    }
}

/// Kubernetes taint carried by a node group record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taint {
    pub key: String,
    pub value: String,
    pub effect: String,
}

/// Node group record as the `node_groups` variable would receive it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGroupSpec {
    pub instance_types: Vec<String>,
    pub min_size: u32,
    pub max_size: u32,
    pub desired_size: u32,
    pub disk_size: u32,
    pub labels: BTreeMap<String, String>,
    pub taints: Vec<Taint>,
}

impl NodeGroupSpec {
    /// `min <= desired <= max` with at least one instance type
    pub fn is_consistent(&self) -> bool {
        self.min_size <= self.desired_size
            && self.desired_size <= self.max_size
            && !self.instance_types.is_empty()
    }

    /// Attribute names this record populates in the `node_groups` object type.
    ///
    /// `taints` is listed only when the record carries at least one taint.
    pub fn populated_fields(&self) -> Vec<&'static str> {
        let mut fields = vec![
            "instance_types",
            "min_size",
            "max_size",
            "desired_size",
            "disk_size",
            "labels",
        ];
        if !self.taints.is_empty() {
            fields.push("taints");
        }
        fields
    }
}

impl std::fmt::Display for NodeGroupSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "instance_types=[{}] min={} desired={} max={} disk={} labels={} taints={}",
            self.instance_types.join(","),
            self.min_size,
            self.desired_size,
            self.max_size,
            self.disk_size,
            self.labels.len(),
            self.taints.len()
        )
    }
}
