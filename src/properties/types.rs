//! Verdict and outcome types

use serde::Serialize;

use crate::error::VerifyError;
use crate::model::Category;

/// Why a property failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required artifact is missing
    FileNotFound,
    /// An artifact could not be read (or a built-in pattern is broken)
    Io,
    /// Content did not satisfy the property
    PatternMismatch,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::FileNotFound => "file not found",
            FailureKind::Io => "io error",
            FailureKind::PatternMismatch => "pattern mismatch",
        }
    }
}

/// Result of evaluating one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass {
        summary: String,
    },
    /// Every artifact the property inspects is optional and absent
    Skip {
        reason: String,
    },
    Fail {
        kind: FailureKind,
        message: String,
        details: Vec<String>,
    },
}

impl Verdict {
    pub fn pass(summary: impl Into<String>) -> Self {
        Verdict::Pass {
            summary: summary.into(),
        }
    }

    pub fn skip(reason: impl Into<String>) -> Self {
        Verdict::Skip {
            reason: reason.into(),
        }
    }

    pub fn mismatch(message: impl Into<String>, details: Vec<String>) -> Self {
        Verdict::Fail {
            kind: FailureKind::PatternMismatch,
            message: message.into(),
            details,
        }
    }

    /// Check-local error turned into a failed verdict
    pub fn from_error(err: &VerifyError) -> Self {
        let kind = match err {
            VerifyError::FileNotFound { .. } => FailureKind::FileNotFound,
            _ => FailureKind::Io,
        };
        Verdict::Fail {
            kind,
            message: err.to_string(),
            details: Vec::new(),
        }
    }

    pub fn status(&self) -> CheckStatus {
        match self {
            Verdict::Pass { .. } => CheckStatus::Pass,
            Verdict::Skip { .. } => CheckStatus::Skip,
            Verdict::Fail { .. } => CheckStatus::Fail,
        }
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail { .. })
    }

    /// One-line summary, reason or failure message
    pub fn message(&self) -> &str {
        match self {
            Verdict::Pass { summary } => summary,
            Verdict::Skip { reason } => reason,
            Verdict::Fail { message, .. } => message,
        }
    }

    pub fn details(&self) -> &[String] {
        match self {
            Verdict::Fail { details, .. } => details,
            _ => &[],
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Verdict::Fail { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub(crate) fn push_detail(&mut self, detail: String) {
        if let Verdict::Fail { details, .. } = self {
            details.push(detail);
        }
    }
}

/// Status of a property check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Skip,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "✓"),
            CheckStatus::Skip => write!(f, "○"),
            CheckStatus::Fail => write!(f, "✗"),
        }
    }
}

/// Verdict of one property, tagged with its catalog identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub id: &'static str,
    pub category: Category,
    pub title: &'static str,
    pub verdict: Verdict,
    /// Evaluations performed (1 for fixed properties)
    pub samples: u32,
}

impl CheckOutcome {
    pub fn status(&self) -> CheckStatus {
        self.verdict.status()
    }
}
