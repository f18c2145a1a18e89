//! GitHub Actions delivery pipeline

use crate::error::VerifyResult;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::Expectations;

const PLAN_WORKFLOW: &str = "terraform-plan.yml";
const APPLY_STAGING_WORKFLOW: &str = "terraform-apply-staging.yml";
const APPLY_PROD_WORKFLOW: &str = "terraform-apply-prod.yml";

pub fn plan_stages(ws: &Workspace) -> VerifyResult<Verdict> {
    let plan = ws.read(ws.workflow_file(PLAN_WORKFLOW))?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&plan, "terraform fmt")
        .contains(&plan, "fmt -check")
        .contains(&plan, "terraform validate")
        .contains(&plan, "terraform plan");
    Ok(expect.verdict("plan runs fmt -check, validate and plan"))
}

/// Plan authenticates with GitHub OIDC, no static keys.
pub fn plan_oidc(ws: &Workspace) -> VerifyResult<Verdict> {
    let plan = ws.read(ws.workflow_file(PLAN_WORKFLOW))?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&plan, "aws-actions/configure-aws-credentials")
        .contains(&plan, "role-to-assume");
    Ok(expect.verdict("plan assumes an AWS role via OIDC"))
}

pub fn plan_comment(ws: &Workspace) -> VerifyResult<Verdict> {
    let plan = ws.read(ws.workflow_file(PLAN_WORKFLOW))?;

    let mut expect = Expectations::new(ws);
    expect.matches(&plan, r"(comment|PR|pull.*request)")?;
    Ok(expect.verdict("plan output is posted to the pull request"))
}

/// Staging applies on push to main without an approval gate.
pub fn apply_staging(ws: &Workspace) -> VerifyResult<Verdict> {
    let apply = ws.read(ws.workflow_file(APPLY_STAGING_WORKFLOW))?;

    let mut expect = Expectations::new(ws);
    expect
        .matches(&apply, r"on:\s*\n\s*push:")?
        .contains(&apply, "main")
        .lacks(&apply, "environment:");
    Ok(expect.verdict("staging applies automatically on push to main"))
}

/// Prod applies only through the protected `production` environment.
pub fn apply_prod(ws: &Workspace) -> VerifyResult<Verdict> {
    let apply = ws.read(ws.workflow_file(APPLY_PROD_WORKFLOW))?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&apply, "environment:")
        .contains(&apply, "name: production");
    Ok(expect.verdict("prod apply gated by the production environment"))
}
