//! Property Runner
//!
//! Evaluates the selected properties against one workspace and streams the
//! outcomes, in catalog order, into a [`ReportSink`].

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::error::VerifyResult;
use crate::harness::{self, Sampled, Sampler};
use crate::model::{Category, Environment};
use crate::workspace::Workspace;

use super::catalog::{self, Check, Property};
use super::report::{CallbackSink, ReportSink, VerifyReport};
use super::types::{CheckOutcome, Verdict};

/// Options for a verification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Property ids to run; empty means all
    pub only: Vec<String>,
    /// Categories to run; empty means all
    pub categories: Vec<Category>,
    /// Cases drawn per sampled property
    pub cases: u32,
    pub seed: Option<u64>,
    /// Evaluate properties on the rayon pool
    pub parallel: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from_config(&HarnessConfig::default())
    }
}

impl RunOptions {
    pub fn from_config(harness: &HarnessConfig) -> Self {
        Self {
            only: Vec::new(),
            categories: Vec::new(),
            cases: harness.cases,
            seed: harness.seed,
            parallel: harness.parallel,
        }
    }

    pub fn sampler(&self) -> Sampler {
        Sampler::new(self.cases, self.seed)
    }
}

/// Properties matching `options`, in catalog order.
///
/// Every id in `only` must exist in the catalog.
pub fn select(options: &RunOptions) -> VerifyResult<Vec<&'static Property>> {
    for id in &options.only {
        catalog::find(id)?;
    }

    Ok(catalog::all()
        .iter()
        .filter(|p| options.only.is_empty() || options.only.iter().any(|id| id == p.id))
        .filter(|p| options.categories.is_empty() || options.categories.contains(&p.category))
        .collect())
}

fn settle(result: VerifyResult<Verdict>) -> Verdict {
    result.unwrap_or_else(|err| Verdict::from_error(&err))
}

/// Evaluate one property. Check-level errors become failed verdicts.
pub fn evaluate(property: &Property, ws: &Workspace, sampler: &Sampler) -> CheckOutcome {
    debug!(id = property.id, kind = property.check.kind(), "evaluating property");

    let Sampled { verdict, samples } = match property.check {
        Check::Fixed(check) => Sampled {
            verdict: settle(check(ws)),
            samples: 1,
        },
        Check::PerEnvironment(check) => {
            sampler.run_covering(&Environment::ALL, harness::environment(), |env| check(ws, *env))
        }
        Check::EnvironmentPair(check) => sampler.run_covering(
            &harness::environment_pairs(),
            harness::environment_pair(),
            |(a, b)| check(ws, *a, *b),
        ),
        Check::AzTopology(check) => {
            sampler.run_covering(&harness::az_cases(), harness::az_case(), |case| check(ws, *case))
        }
        Check::NodeGroup(check) => sampler.run_covering(
            &harness::representative_node_groups(),
            harness::node_group(),
            |spec| check(ws, spec),
        ),
    };

    debug!(
        id = property.id,
        status = ?verdict.status(),
        samples,
        "property evaluated"
    );

    CheckOutcome {
        id: property.id,
        category: property.category,
        title: property.title,
        verdict,
        samples,
    }
}

/// Runs catalog properties against a workspace
pub struct PropertyRunner {
    workspace: Workspace,
}

impl PropertyRunner {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Evaluate every selected property and stream outcomes into `sink`
    pub fn run_into<S: ReportSink>(&self, options: &RunOptions, sink: &mut S) -> VerifyResult<()> {
        let selected = select(options)?;
        let sampler = options.sampler();
        let ws = &self.workspace;

        info!(
            root = %ws.root().display(),
            properties = selected.len(),
            cases = sampler.cases(),
            parallel = options.parallel,
            "running properties"
        );

        // Both paths collect before streaming so the sink sees catalog order.
        let outcomes: Vec<CheckOutcome> = if options.parallel {
            selected
                .par_iter()
                .map(|p| evaluate(p, ws, &sampler))
                .collect()
        } else {
            selected.iter().map(|p| evaluate(p, ws, &sampler)).collect()
        };

        for outcome in outcomes {
            sink.add_outcome(outcome);
        }
        Ok(())
    }

    pub fn execute(&self, options: &RunOptions) -> VerifyResult<VerifyReport> {
        let mut report = VerifyReport::new();
        self.run_into(options, &mut report)?;
        info!(
            passed = report.passes(),
            skipped = report.skips(),
            failed = report.failures(),
            "verification complete"
        );
        Ok(report)
    }

    /// Execute with a callback for each outcome (for streaming UI)
    pub fn execute_with_callback<F>(
        &self,
        options: &RunOptions,
        on_check: F,
    ) -> VerifyResult<VerifyReport>
    where
        F: FnMut(&CheckOutcome),
    {
        let mut sink = CallbackSink::new(on_check);
        self.run_into(options, &mut sink)?;
        let report = sink.report;
        info!(
            passed = report.passes(),
            skipped = report.skips(),
            failed = report.failures(),
            "verification complete"
        );
        Ok(report)
    }
}
