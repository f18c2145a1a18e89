//! Managed node group properties

use crate::blocks;
use crate::error::VerifyResult;
use crate::model::{Environment, NodeGroupSpec};
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, EKS_MODULE, TFVARS_EXAMPLE, VARIABLES_FILE};

/// Largest allowed `max_size - min_size` for the system group
const SYSTEM_SCALING_SPREAD: u32 = 3;

/// Every attribute the record populates is declared by the `node_groups` variable.
///
/// `taints` is only populated by tainted records, so an untainted record
/// passes against a type without it. A tainted record is always among the
/// evaluated cases, so over a run the attribute is still required.
pub fn schema(ws: &Workspace, spec: &NodeGroupSpec) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.module_file(EKS_MODULE, VARIABLES_FILE))?;

    let fields = spec.populated_fields();
    let mut expect = Expectations::new(ws);
    for field in &fields {
        expect.contains(&vars, field);
    }
    Ok(expect.verdict(format!(
        "node_groups declares {}",
        fields.join(", ")
    )))
}

/// The system group is tainted `CriticalAddonsOnly=true:NoSchedule`.
pub fn system_taint(ws: &Workspace) -> VerifyResult<Verdict> {
    let node_groups = ws.read(ws.module_file(EKS_MODULE, "node_groups.tf"))?;
    let staging_vars = ws.read(ws.environment_file(Environment::Staging, VARIABLES_FILE))?;

    let mut expect = Expectations::new(ws);
    expect
        .contains(&node_groups, r#"dynamic "taint""#)
        .matches(&staging_vars, r#"key\s*=\s*"CriticalAddonsOnly""#)?
        .matches(&staging_vars, r#"value\s*=\s*"true""#)?
        .matches(&staging_vars, r#"effect\s*=\s*"NoSchedule""#)?;
    Ok(expect.verdict("system nodes reserved for critical add-ons"))
}

pub fn apps_untainted(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.environment_file(env, TFVARS_EXAMPLE))?;

    let mut expect = Expectations::new(ws);
    expect.contains(&vars, "taints = []");
    Ok(expect.verdict(format!("{env} apps node group schedules any workload")))
}

/// A `system = { ... }` group, when present, scales by at most three nodes.
pub fn conservative_autoscaling(ws: &Workspace, env: Environment) -> VerifyResult<Verdict> {
    let vars = ws.read(ws.environment_file(env, TFVARS_EXAMPLE))?;

    let Some(system) = blocks::find_object(vars.text(), "system")? else {
        return Ok(Verdict::pass(format!("{env} declares no system node group")));
    };

    let min = capture_size(system, "min_size")?;
    let max = capture_size(system, "max_size")?;

    let mut expect = Expectations::new(ws);
    expect
        .require(min.is_some(), format!("{env}: system node group has no min_size"))
        .require(max.is_some(), format!("{env}: system node group has no max_size"));
    let (min, max) = (min.unwrap_or(0), max.unwrap_or(0));
    let spread = max.saturating_sub(min);
    expect.require(
        spread <= SYSTEM_SCALING_SPREAD,
        format!(
            "{env}: system node group scales from {min} to {max} (spread {spread} > {SYSTEM_SCALING_SPREAD})"
        ),
    );
    Ok(expect.verdict(format!("{env} system node group scales {min}..{max}")))
}

fn capture_size(body: &str, field: &str) -> VerifyResult<Option<u32>> {
    let re = crate::content::compile(&format!(r"\b{field}\s*=\s*(\d+)"))?;
    Ok(re
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok()))
}
