use infracheck::{CheckOutcome, CheckStatus};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// One property line with its failure details
#[derive(Debug, Clone)]
pub struct CheckItem<'a> {
    outcome: &'a CheckOutcome,
}

impl<'a> CheckItem<'a> {
    pub fn new(outcome: &'a CheckOutcome) -> Self {
        Self { outcome }
    }

    pub fn render(&self, verbose: bool, supports_color: bool, supports_unicode: bool) -> String {
        let outcome = self.outcome;
        let status = outcome.status();
        let icon = Icon::for_status(status).colored(supports_color, supports_unicode);
        let arrow = Icon::Arrow.colored(supports_color, supports_unicode);

        let mut out = format!(
            "  {} {} {}\n",
            icon,
            outcome.title,
            ColoredText::dim(format!("[{}]", outcome.id)).render(supports_color)
        );

        match status {
            CheckStatus::Fail => {
                let kind = outcome
                    .verdict
                    .failure_kind()
                    .map(|k| k.label())
                    .unwrap_or_default();
                out.push_str(&format!(
                    "    {} {}: {}\n",
                    arrow,
                    ColoredText::error(kind).render(supports_color),
                    outcome.verdict.message()
                ));
                let message = outcome.verdict.message();
                for detail in outcome.verdict.details().iter().filter(|d| *d != message) {
                    out.push_str(&format!("      {}\n", detail));
                }
            }
            CheckStatus::Skip => {
                out.push_str(&format!(
                    "    {} {}\n",
                    arrow,
                    ColoredText::dim(outcome.verdict.message()).render(supports_color)
                ));
            }
            CheckStatus::Pass if verbose => {
                out.push_str(&format!(
                    "    {} {} ({} samples)\n",
                    arrow,
                    outcome.verdict.message(),
                    outcome.samples
                ));
            }
            CheckStatus::Pass => {}
        }

        out
    }
}
