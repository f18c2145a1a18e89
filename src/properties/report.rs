//! Suite report and streaming sink

use crate::model::Category;

use super::types::{CheckOutcome, CheckStatus};

/// Receives outcomes in catalog order
pub trait ReportSink {
    fn add_outcome(&mut self, outcome: CheckOutcome);
}

/// Aggregated results of one run
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl VerifyReport {
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
        }
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status() == status)
            .count()
    }

    pub fn passes(&self) -> usize {
        self.count(CheckStatus::Pass)
    }

    pub fn skips(&self) -> usize {
        self.count(CheckStatus::Skip)
    }

    pub fn failures(&self) -> usize {
        self.count(CheckStatus::Fail)
    }

    /// Skips never fail the suite
    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    /// Outcomes grouped by category, categories in declaration order
    pub fn by_category(&self) -> Vec<(Category, Vec<&CheckOutcome>)> {
        Category::ALL
            .iter()
            .filter_map(|category| {
                let items: Vec<_> = self
                    .outcomes
                    .iter()
                    .filter(|o| o.category == *category)
                    .collect();
                (!items.is_empty()).then_some((*category, items))
            })
            .collect()
    }
}

impl ReportSink for VerifyReport {
    fn add_outcome(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }
}

/// Forwards each outcome to a callback before recording it
pub(crate) struct CallbackSink<F> {
    pub(crate) report: VerifyReport,
    on_check: F,
}

impl<F> CallbackSink<F> {
    pub(crate) fn new(on_check: F) -> Self {
        Self {
            report: VerifyReport::new(),
            on_check,
        }
    }
}

impl<F: FnMut(&CheckOutcome)> ReportSink for CallbackSink<F> {
    fn add_outcome(&mut self, outcome: CheckOutcome) {
        (self.on_check)(&outcome);
        self.report.outcomes.push(outcome);
    }
}
