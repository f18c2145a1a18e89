use std::path::Path;

use infracheck::{RunOptions, VerifyReport};

use crate::ui::blocks::check_item::CheckItem;
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_check_header(
    root: &Path,
    selected: usize,
    options: &RunOptions,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "infracheck");
    header.add("Root", root.display().to_string());
    header.add("Properties", selected.to_string());
    let seed = options
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "deterministic".to_string());
    header.add("Sampling", format!("{} cases, seed {}", options.cases, seed));
    header.render(supports_color, supports_unicode)
}

/// Outcomes grouped under their category headings
pub fn render_check_report(
    report: &VerifyReport,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    for (category, outcomes) in report.by_category() {
        out.push('\n');
        out.push_str(
            &ColoredText::info(category.display_name())
                .bold()
                .render(supports_color),
        );
        out.push('\n');
        for outcome in outcomes {
            out.push_str(&CheckItem::new(outcome).render(
                verbose > 0,
                supports_color,
                supports_unicode,
            ));
        }
    }

    out
}

pub fn render_check_summary(
    report: &VerifyReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if report.is_success() {
        ResultSummary::success("All properties hold")
    } else {
        ResultSummary::failure("Verification FAILED")
    };

    summary.add_stat("passed", report.passes());
    summary.add_stat("skipped", report.skips());
    summary.add_stat("failed", report.failures());
    if !report.is_success() {
        summary.with_next_step("Run `infracheck explain <ID>` for what a property expects");
    }

    summary.render(supports_color, supports_unicode)
}
