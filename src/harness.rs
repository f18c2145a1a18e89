//! Randomized case generation for sampled properties.
//!
//! Sampled properties are driven by a proptest [`TestRunner`]. Every property
//! gets a fresh runner seeded from the harness configuration, so two runs with
//! the same seed and case count draw the same cases.

use std::cell::Cell;
use std::fmt::Debug;

use proptest::prelude::*;
use proptest::test_runner::{Config, RngAlgorithm, TestCaseError, TestError, TestRng, TestRunner};

use crate::config::HarnessConfig;
use crate::error::VerifyResult;
use crate::model::{AzCase, Environment, NodeGroupSpec, Taint};
use crate::properties::Verdict;

const INSTANCE_TYPES: &[&str] = &[
    "t3.medium",
    "t3.large",
    "t3.xlarge",
    "m5.large",
    "m5.xlarge",
    "m5.2xlarge",
];

const TAINT_EFFECTS: &[&str] = &["NoSchedule", "PreferNoSchedule", "NoExecute"];

/// Human-readable rendering of a drawn case, used in counterexamples
pub trait CaseLabel {
    fn label(&self) -> String;
}

impl CaseLabel for Environment {
    fn label(&self) -> String {
        format!("env={self}")
    }
}

impl CaseLabel for (Environment, Environment) {
    fn label(&self) -> String {
        format!("{} vs {}", self.0, self.1)
    }
}

impl CaseLabel for AzCase {
    fn label(&self) -> String {
        self.to_string()
    }
}

impl CaseLabel for NodeGroupSpec {
    fn label(&self) -> String {
        self.to_string()
    }
}

/// Every ordered pair of distinct environments
pub fn environment_pairs() -> Vec<(Environment, Environment)> {
    Environment::ALL
        .iter()
        .flat_map(|&a| Environment::ALL.iter().map(move |&b| (a, b)))
        .filter(|(a, b)| a != b)
        .collect()
}

/// Every supported AZ layout
pub fn az_cases() -> Vec<AzCase> {
    (2u8..=4)
        .flat_map(|az_count| {
            [false, true].map(|single_nat_gateway| AzCase {
                az_count,
                single_nat_gateway,
            })
        })
        .collect()
}

/// Fixed node group records checked before any draw: one plain, one tainted
pub fn representative_node_groups() -> Vec<NodeGroupSpec> {
    let plain = NodeGroupSpec {
        instance_types: vec![INSTANCE_TYPES[1].to_string()],
        min_size: 1,
        max_size: 10,
        desired_size: 2,
        disk_size: 50,
        labels: [("role".to_string(), "apps".to_string())].into_iter().collect(),
        taints: Vec::new(),
    };
    let tainted = NodeGroupSpec {
        instance_types: vec![INSTANCE_TYPES[0].to_string()],
        min_size: 2,
        max_size: 4,
        desired_size: 2,
        disk_size: 50,
        labels: [("role".to_string(), "system".to_string())].into_iter().collect(),
        taints: vec![Taint {
            key: "CriticalAddonsOnly".to_string(),
            value: "true".to_string(),
            effect: TAINT_EFFECTS[0].to_string(),
        }],
    };
    vec![plain, tainted]
}

pub fn environment() -> impl Strategy<Value = Environment> {
    prop::sample::select(Environment::ALL.to_vec())
}

/// Ordered pairs of distinct environments
pub fn environment_pair() -> impl Strategy<Value = (Environment, Environment)> {
    (environment(), environment()).prop_filter("environments must differ", |(a, b)| a != b)
}

pub fn az_case() -> impl Strategy<Value = AzCase> {
    (2u8..=4, any::<bool>()).prop_map(|(az_count, single_nat_gateway)| AzCase {
        az_count,
        single_nat_gateway,
    })
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn taint() -> impl Strategy<Value = Taint> {
    (
        identifier(),
        "[a-zA-Z]{0,8}",
        prop::sample::select(TAINT_EFFECTS.to_vec()),
    )
        .prop_map(|(key, value, effect)| Taint {
            key,
            value,
            effect: effect.to_string(),
        })
}

/// Node group records satisfying `min <= desired <= max` with at least one
/// instance type. Inconsistent draws are rejected and redrawn.
pub fn node_group() -> impl Strategy<Value = NodeGroupSpec> {
    (
        prop::collection::vec(prop::sample::select(INSTANCE_TYPES.to_vec()), 0..4),
        1u32..=5,
        5u32..=50,
        2u32..=10,
        20u32..=500,
        prop::collection::btree_map(identifier(), identifier(), 0..4),
        prop::collection::vec(taint(), 0..3),
    )
        .prop_map(
            |(instance_types, min_size, max_size, desired_size, disk_size, labels, taints)| {
                NodeGroupSpec {
                    instance_types: instance_types.into_iter().map(str::to_string).collect(),
                    min_size,
                    max_size,
                    desired_size,
                    disk_size,
                    labels,
                    taints,
                }
            },
        )
        .prop_filter("node group must be consistent", NodeGroupSpec::is_consistent)
}

/// Verdict of a sampled property and the evaluations it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sampled {
    pub verdict: Verdict,
    pub samples: u32,
}

/// Draws cases for sampled properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    cases: u32,
    seed: Option<u64>,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::from_config(&HarnessConfig::default())
    }
}

impl Sampler {
    pub fn new(cases: u32, seed: Option<u64>) -> Self {
        Self {
            cases: cases.max(1),
            seed,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.cases, config.seed)
    }

    pub fn cases(&self) -> u32 {
        self.cases
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn runner(&self) -> TestRunner {
        let config = Config {
            cases: self.cases,
            failure_persistence: None,
            ..Config::default()
        };
        let rng = match self.seed {
            Some(seed) => {
                let mut bytes = [0u8; 32];
                bytes[..8].copy_from_slice(&seed.to_le_bytes());
                TestRng::from_seed(RngAlgorithm::ChaCha, &bytes)
            }
            None => TestRng::deterministic_rng(RngAlgorithm::ChaCha),
        };
        TestRunner::new_with_rng(config, rng)
    }

    /// Evaluate `check` over drawn cases.
    ///
    /// The first failing case is shrunk, and the minimal case is evaluated
    /// again to produce the reported verdict. `samples` counts drawn cases
    /// only, not evaluations made while shrinking.
    pub fn run<S, F>(&self, strategy: S, check: F) -> Sampled
    where
        S: Strategy,
        S::Value: CaseLabel + Debug,
        F: Fn(&S::Value) -> VerifyResult<Verdict>,
    {
        let drawn = Cell::new(0u32);
        let shrinking = Cell::new(false);
        let mut runner = self.runner();

        let result = runner.run(&strategy, |case| {
            if !shrinking.get() {
                drawn.set(drawn.get() + 1);
            }
            match check(&case) {
                Ok(verdict) if verdict.is_fail() => {
                    shrinking.set(true);
                    Err(TestCaseError::fail(verdict.message().to_string()))
                }
                Ok(_) => Ok(()),
                Err(err) => {
                    shrinking.set(true);
                    Err(TestCaseError::fail(err.to_string()))
                }
            }
        });

        let verdict = match result {
            Ok(()) => Verdict::pass(format!("held for {} sampled cases", self.cases)),
            Err(TestError::Fail(reason, minimal)) => {
                let verdict = match check(&minimal) {
                    Ok(verdict) if verdict.is_fail() => verdict,
                    Ok(_) => Verdict::mismatch(reason.to_string(), Vec::new()),
                    Err(err) => Verdict::from_error(&err),
                };
                tracing::debug!(case = %minimal.label(), "minimal failing case");
                with_counterexample(verdict, &minimal)
            }
            Err(TestError::Abort(reason)) => {
                Verdict::mismatch(format!("sampling aborted: {reason}"), Vec::new())
            }
        };

        Sampled {
            verdict,
            samples: drawn.get(),
        }
    }

    /// Evaluate `check` on every value of `domain`, then on drawn cases until
    /// the case budget is spent.
    ///
    /// Domain values count as the first draws, so even `cases = 1` covers the
    /// whole domain.
    pub fn run_covering<S, F>(&self, domain: &[S::Value], strategy: S, check: F) -> Sampled
    where
        S: Strategy,
        S::Value: CaseLabel + Debug,
        F: Fn(&S::Value) -> VerifyResult<Verdict>,
    {
        for (evaluated, case) in (1u32..).zip(domain) {
            let verdict = match check(case) {
                Ok(verdict) if !verdict.is_fail() => continue,
                Ok(verdict) => verdict,
                Err(err) => Verdict::from_error(&err),
            };
            return Sampled {
                verdict: with_counterexample(verdict, case),
                samples: evaluated,
            };
        }

        let enumerated = u32::try_from(domain.len()).unwrap_or(u32::MAX);
        let remaining = self.cases.saturating_sub(enumerated);
        let mut total = enumerated;
        if remaining > 0 {
            let drawn = Sampler::new(remaining, self.seed).run(strategy, &check);
            total = total.saturating_add(drawn.samples);
            if drawn.verdict.is_fail() {
                return Sampled {
                    verdict: drawn.verdict,
                    samples: total,
                };
            }
        }

        Sampled {
            verdict: Verdict::pass(format!("held for {total} cases, {enumerated} enumerated")),
            samples: total,
        }
    }
}

fn with_counterexample(mut verdict: Verdict, case: &impl CaseLabel) -> Verdict {
    verdict.push_detail(format!("counterexample: {}", case.label()));
    verdict
}
