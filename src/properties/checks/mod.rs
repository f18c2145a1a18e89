//! Property check functions, one per catalog entry.
//!
//! Each check is a pure function of the files under the workspace. Read
//! failures propagate as errors; unmet content expectations become a
//! `PatternMismatch` verdict listing every miss.

pub mod backend;
pub mod cluster;
pub mod compliance;
pub mod documentation;
pub mod environments;
pub mod isolation;
pub mod network;
pub mod node_groups;
pub mod platform;
pub mod workflows;

use std::path::Path;

use crate::content::Content;
use crate::error::VerifyResult;
use crate::workspace::Workspace;

use super::types::{FailureKind, Verdict};

pub(crate) const EKS_MODULE: &str = "clusters/eks";
pub(crate) const BACKEND_FILE: &str = "backend.tf";
pub(crate) const TFVARS_EXAMPLE: &str = "terraform.tfvars.example";
pub(crate) const MAIN_FILE: &str = "main.tf";
pub(crate) const VARIABLES_FILE: &str = "variables.tf";
pub(crate) const OUTPUTS_FILE: &str = "outputs.tf";

/// Collects unmet expectations for a single verdict.
pub(crate) struct Expectations<'w> {
    ws: &'w Workspace,
    checked: usize,
    missing: Vec<String>,
    missing_files: usize,
}

impl<'w> Expectations<'w> {
    pub(crate) fn new(ws: &'w Workspace) -> Self {
        Self {
            ws,
            checked: 0,
            missing: Vec::new(),
            missing_files: 0,
        }
    }

    fn shown(&self, path: &Path) -> String {
        self.ws.display_path(path).display().to_string()
    }

    pub(crate) fn require(&mut self, ok: bool, failure: impl Into<String>) -> &mut Self {
        self.checked += 1;
        if !ok {
            self.missing.push(failure.into());
        }
        self
    }

    pub(crate) fn contains(&mut self, content: &Content, needle: &str) -> &mut Self {
        let failure = format!("{}: expected `{}`", self.shown(content.path()), needle);
        self.require(content.contains(needle), failure)
    }

    pub(crate) fn lacks(&mut self, content: &Content, needle: &str) -> &mut Self {
        let failure = format!("{}: must not contain `{}`", self.shown(content.path()), needle);
        self.require(!content.contains(needle), failure)
    }

    pub(crate) fn matches(&mut self, content: &Content, pattern: &str) -> VerifyResult<&mut Self> {
        let ok = content.matches(pattern)?;
        let failure = format!("{}: no match for /{}/", self.shown(content.path()), pattern);
        Ok(self.require(ok, failure))
    }

    /// Existence of a whole artifact; absence is reported as `FileNotFound`.
    pub(crate) fn exists(&mut self, path: &Path) -> &mut Self {
        self.checked += 1;
        if self.ws.locate(path).is_none() {
            self.missing_files += 1;
            let failure = format!("{}: file not found", self.shown(path));
            self.missing.push(failure);
        }
        self
    }

    pub(crate) fn verdict(self, summary: impl Into<String>) -> Verdict {
        if self.missing.is_empty() {
            return Verdict::pass(summary);
        }

        let kind = if self.missing_files == self.missing.len() {
            FailureKind::FileNotFound
        } else {
            FailureKind::PatternMismatch
        };
        let message = if self.missing.len() == 1 {
            self.missing[0].clone()
        } else {
            format!(
                "{} of {} expectations not met",
                self.missing.len(),
                self.checked
            )
        };
        Verdict::Fail {
            kind,
            message,
            details: self.missing,
        }
    }
}
