//! Architectural properties of an infrastructure template
//!
//! - [`catalog`]: every property with its category and evaluation mode
//! - [`checks`]: the predicates themselves, one module per category
//! - [`runner`]: selection and (parallel) evaluation
//! - [`report`]: aggregation and streaming sinks

pub mod catalog;
pub mod checks;
pub mod report;
pub mod runner;
mod types;

pub use catalog::{Check, Property};
pub use report::{ReportSink, VerifyReport};
pub use runner::{evaluate, select, PropertyRunner, RunOptions};
pub use types::{CheckOutcome, CheckStatus, FailureKind, Verdict};
