//! Cross-environment isolation properties

use crate::content::Content;
use crate::error::VerifyResult;
use crate::model::Environment;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, BACKEND_FILE, TFVARS_EXAMPLE};

const BUCKET_PATTERN: &str = r#"\bbucket\s*=\s*"([^"]*)""#;
const KEY_PATTERN: &str = r#"\bkey\s*=\s*"([^"]*)""#;
const VPC_CIDR_PATTERN: &str = r#"\bvpc_cidr\s*=\s*"([^"]+)""#;

#[derive(Debug, PartialEq, Eq)]
struct StateLocation {
    bucket: Option<String>,
    key: Option<String>,
}

impl StateLocation {
    fn of(backend: &Content) -> VerifyResult<Self> {
        Ok(Self {
            bucket: backend.capture(BUCKET_PATTERN)?,
            key: backend.capture(KEY_PATTERN)?,
        })
    }
}

impl std::fmt::Display for StateLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "s3://{}/{}",
            self.bucket.as_deref().unwrap_or("?"),
            self.key.as_deref().unwrap_or("?")
        )
    }
}

/// Two environments never share a state bucket+key.
///
/// A backend without a `key` cannot be shown to be isolated and fails.
pub fn state_paths(ws: &Workspace, first: Environment, second: Environment) -> VerifyResult<Verdict> {
    let first_backend = ws.read(ws.environment_file(first, BACKEND_FILE))?;
    let second_backend = ws.read(ws.environment_file(second, BACKEND_FILE))?;

    let a = StateLocation::of(&first_backend)?;
    let b = StateLocation::of(&second_backend)?;

    let mut expect = Expectations::new(ws);
    expect
        .require(
            a.key.is_some(),
            format!("{first}: backend declares no state `key`"),
        )
        .require(
            b.key.is_some(),
            format!("{second}: backend declares no state `key`"),
        );
    if a.key.is_some() && b.key.is_some() {
        expect.require(a != b, format!("{first} and {second} share state location {a}"));
    }
    Ok(expect.verdict(format!("{first} ({a}) and {second} ({b}) use distinct state")))
}

/// VPC CIDRs in the two tfvars examples differ.
pub fn vpc_cidrs(ws: &Workspace, first: Environment, second: Environment) -> VerifyResult<Verdict> {
    let first_vars = ws.read(ws.environment_file(first, TFVARS_EXAMPLE))?;
    let second_vars = ws.read(ws.environment_file(second, TFVARS_EXAMPLE))?;

    let a = first_vars.capture(VPC_CIDR_PATTERN)?;
    let b = second_vars.capture(VPC_CIDR_PATTERN)?;

    let mut expect = Expectations::new(ws);
    expect
        .require(a.is_some(), format!("{first}: no `vpc_cidr` in {TFVARS_EXAMPLE}"))
        .require(b.is_some(), format!("{second}: no `vpc_cidr` in {TFVARS_EXAMPLE}"));
    if let (Some(a), Some(b)) = (&a, &b) {
        expect.require(a != b, format!("{first} and {second} both use {a}"));
    }
    Ok(expect.verdict(format!(
        "{first} and {second} VPC CIDRs differ ({} / {})",
        a.as_deref().unwrap_or("?"),
        b.as_deref().unwrap_or("?")
    )))
}

/// Each backend names its environment; each tfvars example carries its CIDR.
pub fn environment_naming(ws: &Workspace) -> VerifyResult<Verdict> {
    let mut expect = Expectations::new(ws);
    for env in Environment::ALL {
        let backend = ws.read(ws.environment_file(env, BACKEND_FILE))?;
        let vars = ws.read(ws.environment_file(env, TFVARS_EXAMPLE))?;
        expect
            .contains(&backend, env.name())
            .contains(&vars, env.profile().vpc_cidr);
    }
    Ok(expect.verdict("state paths and CIDRs are environment-specific"))
}
