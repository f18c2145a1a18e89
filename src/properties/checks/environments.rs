//! Per-environment literal settings

use crate::error::VerifyResult;
use crate::model::Environment;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, MAIN_FILE, TFVARS_EXAMPLE};

const MANDATORY_TAGS: &[&str] = &["Environment", "ManagedBy", "Project", "Owner", "Purpose"];

pub fn tfvars_examples(ws: &Workspace) -> VerifyResult<Verdict> {
    let mut expect = Expectations::new(ws);
    for env in Environment::ALL {
        expect.exists(&ws.environment_file(env, TFVARS_EXAMPLE));
    }
    Ok(expect.verdict("every environment ships terraform.tfvars.example"))
}

pub fn instance_types(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.environment_file(env, TFVARS_EXAMPLE))?;

    let mut expect = Expectations::new(ws);
    expect.matches(&vars, env.profile().instance_types)?;
    Ok(expect.verdict(format!("{env} uses its instance family")))
}

pub fn autoscaling(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.environment_file(env, TFVARS_EXAMPLE))?;
    let max_size = env.profile().apps_max_size;

    let mut expect = Expectations::new(ws);
    expect.matches(&vars, &format!(r"max_size\s*=\s*{max_size}\b"))?;
    Ok(expect.verdict(format!("{env} apps scale up to {max_size} nodes")))
}

pub fn nat_strategy(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.environment_file(env, TFVARS_EXAMPLE))?;
    let single = env.profile().single_nat_gateway;

    let mut expect = Expectations::new(ws);
    expect.matches(&vars, &format!(r"single_nat_gateway\s*=\s*{single}\b"))?;
    Ok(expect.verdict(format!("{env} sets single_nat_gateway = {single}")))
}

pub fn retention(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let main = ws.read(ws.environment_file(env, MAIN_FILE))?;
    let profile = env.profile();

    let mut expect = Expectations::new(ws);
    expect
        .matches(
            &main,
            &format!(
                r"prometheus_retention_days\s*=\s*{}\b",
                profile.prometheus_retention_days
            ),
        )?
        .matches(
            &main,
            &format!(r"loki_retention_days\s*=\s*{}\b", profile.loki_retention_days),
        )?;
    Ok(expect.verdict(format!(
        "{env} keeps metrics {}d and logs {}d",
        profile.prometheus_retention_days, profile.loki_retention_days
    )))
}

pub fn backup_schedule(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let main = ws.read(ws.environment_file(env, MAIN_FILE))?;
    let profile = env.profile();

    let mut expect = Expectations::new(ws);
    expect.contains(&main, profile.backup_schedule).matches(
        &main,
        &format!(
            r"backup_retention_days\s*=\s*{}\b",
            profile.backup_retention_days
        ),
    )?;
    Ok(expect.verdict(format!(
        "{env} backs up at \"{}\" and keeps {}d",
        profile.backup_schedule, profile.backup_retention_days
    )))
}

/// Staging audits policy violations, prod enforces them.
pub fn policy_mode(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let main = ws.read(ws.environment_file(env, MAIN_FILE))?;
    let mode = env.profile().enforcement_mode;

    let mut expect = Expectations::new(ws);
    expect.matches(&main, &format!(r#"enforcement_mode\s*=\s*"{mode}""#))?;
    Ok(expect.verdict(format!("{env} policies run in {mode} mode")))
}

pub fn mandatory_tags(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let main = ws.read(ws.environment_file(env, MAIN_FILE))?;

    let mut expect = Expectations::new(ws);
    expect.contains(&main, "default_tags");
    for tag in MANDATORY_TAGS {
        expect.contains(&main, tag);
    }
    Ok(expect.verdict(format!("{env} applies mandatory default tags")))
}
