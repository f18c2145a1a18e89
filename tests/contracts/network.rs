//! Contract: the EKS VPC spans zones and keeps private traffic private.

use infracheck::FailureKind;

use crate::common::*;
use crate::{assert_fails, assert_holds};

const IDS: &[&str] = &[
    "network.subnets-multi-az",
    "network.nat-gateways",
    "network.subnet-discovery-tags",
    "network.vpc-endpoints",
];

const VPC: &str = "modules/clusters/eks/vpc.tf";

#[test]
fn contract_compliant_network_holds() {
    let env = TestEnv::compliant();
    let report = env.verify(IDS);

    for id in IDS {
        assert_holds!(report, id);
    }
}

/// CONTRACT: Sampled network properties draw the configured number of cases.
#[test]
fn contract_topology_properties_are_sampled() {
    let env = TestEnv::compliant();
    let report = env.verify(IDS);

    assert_eq!(outcome(&report, "network.subnets-multi-az").samples, 32);
    assert_eq!(outcome(&report, "network.nat-gateways").samples, 32);
    assert_eq!(outcome(&report, "network.vpc-endpoints").samples, 1);
}

#[test]
fn contract_missing_public_subnets_fail() {
    let env = TestEnv::compliant();
    env.edit_file(VPC, r#"resource "aws_subnet" "public""#, r#"resource "aws_subnet" "edge""#);

    let report = env.verify(IDS);
    assert_fails!(report, "network.subnets-multi-az", FailureKind::PatternMismatch);
    let details = outcome(&report, "network.subnets-multi-az").verdict.details();
    assert!(details.iter().any(|d| d.starts_with("counterexample: az_count=")));
}

#[test]
fn contract_unconditional_nat_gateway_fails() {
    let env = TestEnv::compliant();
    env.edit_file(
        VPC,
        "  count         = var.single_nat_gateway ? 1 : length(var.availability_zones)\n",
        "",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "network.nat-gateways", FailureKind::PatternMismatch);
    assert_holds!(report, "network.subnets-multi-az");
}

#[test]
fn contract_missing_endpoint_is_reported_by_name() {
    let env = TestEnv::compliant();
    env.edit_file(
        "modules/clusters/eks/vpc_endpoints.tf",
        r#""sts", "#,
        "",
    );

    let report = env.verify(IDS);
    assert_fails!(report, "network.vpc-endpoints", FailureKind::PatternMismatch);
    assert!(outcome(&report, "network.vpc-endpoints")
        .verdict
        .message()
        .contains("`sts`"));
}

#[test]
fn contract_untagged_subnets_fail() {
    let env = TestEnv::compliant();
    let vpc = env.read_file(VPC).replace("kubernetes.io/cluster/", "example.com/cluster/");
    env.write_file(VPC, &vpc);

    let report = env.verify(IDS);
    assert_fails!(
        report,
        "network.subnet-discovery-tags",
        FailureKind::PatternMismatch
    );
}

#[test]
fn contract_missing_vpc_is_file_not_found() {
    let env = TestEnv::builder().without_file(VPC).build();

    let report = env.verify(IDS);
    assert_fails!(report, "network.subnets-multi-az", FailureKind::FileNotFound);
    assert_fails!(report, "network.nat-gateways", FailureKind::FileNotFound);
    assert_fails!(
        report,
        "network.subnet-discovery-tags",
        FailureKind::FileNotFound
    );
    assert_holds!(report, "network.vpc-endpoints");
}
