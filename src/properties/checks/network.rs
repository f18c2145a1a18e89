//! VPC topology properties of the EKS module

use crate::error::VerifyResult;
use crate::model::AzCase;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, EKS_MODULE};

const VPC_FILE: &str = "vpc.tf";
const VPC_ENDPOINTS_FILE: &str = "vpc_endpoints.tf";

/// Interface endpoints every private cluster needs without NAT egress
const REQUIRED_ENDPOINTS: &[&str] = &["ecr.api", "ecr.dkr", "sts", "logs", "ssm"];

/// Private and public subnets are declared per availability zone.
pub fn subnets_multi_az(ws: &Workspace, case: AzCase) -> VerifyResult<Verdict> {
    let vpc = ws.read(ws.module_file(EKS_MODULE, VPC_FILE))?;

    let mut expect = Expectations::new(ws);
    expect
        .matches(&vpc, r#"resource\s+"aws_subnet"\s+"private""#)?
        .matches(&vpc, r#"resource\s+"aws_subnet"\s+"public""#)?
        .contains(&vpc, "availability_zones");
    Ok(expect.verdict(format!(
        "private and public subnets keyed by AZ for {} zones",
        case.az_count
    )))
}

/// NAT gateway count follows `single_nat_gateway`.
pub fn nat_gateways(ws: &Workspace, case: AzCase) -> VerifyResult<Verdict> {
    let vpc = ws.read(ws.module_file(EKS_MODULE, VPC_FILE))?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&vpc, r#"resource "aws_nat_gateway""#)
        .contains(&vpc, "single_nat_gateway")
        .matches(&vpc, r"count\s*=")?;

    let gateways = if case.single_nat_gateway {
        1
    } else {
        case.az_count
    };
    Ok(expect.verdict(format!(
        "NAT gateway count is conditional ({gateways} for {case})"
    )))
}

/// Subnets carry the tags the AWS load balancer controller discovers.
pub fn subnet_discovery_tags(ws: &Workspace) -> VerifyResult<Verdict> {
    let vpc = ws.read(ws.module_file(EKS_MODULE, VPC_FILE))?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&vpc, "kubernetes.io/cluster")
        .contains(&vpc, "cluster_name");
    Ok(expect.verdict("subnets tagged for cluster discovery"))
}

pub fn vpc_endpoints(ws: &Workspace) -> VerifyResult<Verdict> {
    let endpoints = ws.read(ws.module_file(EKS_MODULE, VPC_ENDPOINTS_FILE))?;

    let mut expect = Expectations::new(ws);
    for endpoint in REQUIRED_ENDPOINTS {
        expect.contains(&endpoints, endpoint);
    }
    Ok(expect.verdict(format!(
        "VPC endpoints declared: {}",
        REQUIRED_ENDPOINTS.join(", ")
    )))
}
