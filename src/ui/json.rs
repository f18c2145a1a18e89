//! NDJSON output for `--json`.
//!
//! A run emits one `start` event, one `check` event per property and a final
//! `complete` event, each on its own line.

use std::io::{self, Write};

use serde::Serialize;

use infracheck::{Category, CheckOutcome, CheckStatus, FailureKind, VerifyReport};

#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub root: String,
    pub properties: usize,
    pub cases: u32,
    pub seed: Option<u64>,
}

impl<'a> StartEvent<'a> {
    pub fn new(command: &'a str, root: String, properties: usize, cases: u32, seed: Option<u64>) -> Self {
        Self {
            event: "start",
            command,
            root,
            properties,
            cases,
            seed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckEvent<'a> {
    pub event: &'static str,
    pub id: &'a str,
    pub category: Category,
    pub title: &'a str,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    pub message: &'a str,
    pub details: &'a [String],
    pub samples: u32,
}

impl<'a> From<&'a CheckOutcome> for CheckEvent<'a> {
    fn from(outcome: &'a CheckOutcome) -> Self {
        Self {
            event: "check",
            id: outcome.id,
            category: outcome.category,
            title: outcome.title,
            status: outcome.status(),
            kind: outcome.verdict.failure_kind(),
            message: outcome.verdict.message(),
            details: outcome.verdict.details(),
            samples: outcome.samples,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub passed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub success: bool,
}

impl<'a> CompleteEvent<'a> {
    pub fn from_report(command: &'a str, report: &VerifyReport) -> Self {
        Self {
            event: "complete",
            command,
            passed: report.passes(),
            skipped: report.skips(),
            failed: report.failures(),
            success: report.is_success(),
        }
    }
}

/// Write a typed event as a single NDJSON line.
pub fn write_event<T: Serialize, W: Write>(out: &mut W, event: &T) -> io::Result<()> {
    let json =
        serde_json::to_string(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Emit a raw JSON value to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}
