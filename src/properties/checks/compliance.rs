//! Account-level audit and compliance resources

use crate::error::VerifyResult;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, MAIN_FILE};

const COMPLIANCE: &str = "compliance";

fn require_resources(ws: &Workspace, resource_types: &[&str], summary: &str) -> VerifyResult<Verdict> {
    let main = ws.read(ws.module_file(COMPLIANCE, MAIN_FILE))?;

    let mut expect = Expectations::new(ws);
    for resource_type in resource_types {
        let count = main.resource_count(resource_type)?;
        expect.require(
            count > 0,
            format!("{COMPLIANCE}/{MAIN_FILE}: no `{resource_type}` resource"),
        );
    }
    Ok(expect.verdict(summary))
}

pub fn cloudtrail(ws: &Workspace) -> VerifyResult<Verdict> {
    require_resources(ws, &["aws_cloudtrail"], "CloudTrail trail declared")
}

pub fn aws_config(ws: &Workspace) -> VerifyResult<Verdict> {
    require_resources(
        ws,
        &["aws_config_configuration_recorder", "aws_config_delivery_channel"],
        "AWS Config recorder and delivery channel declared",
    )
}

pub fn guardduty(ws: &Workspace) -> VerifyResult<Verdict> {
    require_resources(ws, &["aws_guardduty_detector"], "GuardDuty detector declared")
}

/// Audit and backup buckets are guarded against deletion.
pub fn bucket_protection(ws: &Workspace) -> VerifyResult<Verdict> {
    let compliance = ws.read_optional(ws.module_file(COMPLIANCE, MAIN_FILE))?;
    let velero = ws.read_optional(ws.module_file("platform/velero", MAIN_FILE))?;

    if compliance.is_none() && velero.is_none() {
        return Ok(Verdict::skip("neither compliance nor velero module present"));
    }

    let mut expect = Expectations::new(ws);
    if let Some(main) = &compliance {
        expect
            .contains(main, "aws_s3_bucket_policy")
            .contains(main, "DeleteBucket");
    }
    if let Some(main) = &velero {
        expect.contains(main, "aws_s3_bucket");
    }
    Ok(expect.verdict("bucket policies deny deletion"))
}
