//! Remote state backend properties

use crate::error::VerifyResult;
use crate::model::Environment;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, BACKEND_FILE};

/// S3 native locking (`use_lockfile = true`), no DynamoDB lock table.
pub fn native_locking(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let backend = ws.read(ws.environment_file(env, BACKEND_FILE))?;

    let mut expect = Expectations::new(ws);
    expect
        .matches(&backend, r"use_lockfile\s*=\s*true")?
        .lacks(&backend, "dynamodb_table");
    Ok(expect.verdict(format!("{env} state uses S3 native locking")))
}

pub fn encryption(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let backend = ws.read(ws.environment_file(env, BACKEND_FILE))?;

    let mut expect = Expectations::new(ws);
    expect.matches(&backend, r"encrypt\s*=\s*true")?;
    Ok(expect.verdict(format!("{env} state is encrypted at rest")))
}
