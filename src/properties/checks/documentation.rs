//! Repository documentation and module self-description

use crate::content::Content;
use crate::error::VerifyResult;
use crate::properties::types::Verdict;
use crate::workspace::Workspace;

use super::{Expectations, EKS_MODULE, OUTPUTS_FILE, VARIABLES_FILE};

/// Modules whose interface must be self-describing
pub const DOCUMENTED_MODULES: &[&str] = &[
    EKS_MODULE,
    "platform/argocd",
    "platform/policy-engine",
    "platform/external-secrets",
    "platform/observability",
    "platform/ingress",
    "platform/velero",
    "compliance",
];

pub fn readme(ws: &Workspace) -> VerifyResult<Verdict> {
    ws.require(ws.root_file("README.md"))?;
    Ok(Verdict::pass("README.md present"))
}

pub fn guides(ws: &Workspace) -> VerifyResult<Verdict> {
    let mut expect = Expectations::new(ws);
    expect
        .exists(&ws.root_file("docs/troubleshooting.md"))
        .exists(&ws.root_file("docs/cost-optimization.md"));
    Ok(expect.verdict("troubleshooting and cost guides present"))
}

pub fn tooling(ws: &Workspace) -> VerifyResult<Verdict> {
    let mut expect = Expectations::new(ws);
    expect
        .exists(&ws.root_file(".terraform-docs.yml"))
        .exists(&ws.root_file(".tflint.hcl"));
    Ok(expect.verdict("terraform-docs and tflint configured"))
}

/// Every declared variable and output carries a non-empty description.
pub fn descriptions(ws: &Workspace) -> VerifyResult<Verdict> {
    let mut expect = Expectations::new(ws);
    let mut documented = 0;
    let mut files = 0;

    for module in DOCUMENTED_MODULES {
        for (file, keyword) in [(VARIABLES_FILE, "variable"), (OUTPUTS_FILE, "output")] {
            let path = ws.module_file(module, file);
            let Some(content) = ws.read_optional(&path)? else {
                continue;
            };
            files += 1;
            documented += check_file(ws, &content, keyword, &mut expect)?;
        }
    }

    if files == 0 {
        return Ok(Verdict::skip("no module variables.tf or outputs.tf present"));
    }
    Ok(expect.verdict(format!(
        "{documented} declarations described across {files} files"
    )))
}

fn check_file(
    ws: &Workspace,
    content: &Content,
    keyword: &str,
    expect: &mut Expectations<'_>,
) -> VerifyResult<usize> {
    let shown = ws.display_path(content.path());
    let mut documented = 0;
    for name in content.named_blocks(keyword)? {
        let described = content.has_description(keyword, name)?;
        if described {
            documented += 1;
        }
        expect.require(
            described,
            format!(
                "{}: {keyword} `{name}` has no description",
                shown.display()
            ),
        );
    }
    Ok(documented)
}
