use std::io::Write;

use anyhow::{Context, Result};
use clap::CommandFactory;
use infracheck::properties::{self, catalog};
use infracheck::{PropertyRunner, RunOptions, VerifyError, VerifyReport, Workspace};

use crate::cli::{CheckArgs, Cli};
use crate::commands::Session;
use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::json::{self, CheckEvent, CompleteEvent, StartEvent};
use crate::ui::primitives::icon::Icon;
use crate::ui::status_line::StatusLine;

pub fn cmd_check(cli: &Cli, args: CheckArgs) -> Result<()> {
    let session = Session::open(cli)?;
    let ui = session.ui;

    let options = run_options(&session, args);
    let selected = match properties::select(&options) {
        Ok(selected) => selected,
        Err(VerifyError::UnknownProperty { id }) => usage_error(&id),
        Err(err) => return Err(err.into()),
    };

    let workspace = Workspace::new(&session.root, session.config.layout.clone());
    let runner = PropertyRunner::new(workspace);

    let report = if ui.json {
        let mut out = std::io::stdout().lock();
        stream_json(&runner, &options, selected.len(), &mut out)?
    } else {
        print!(
            "{}",
            crate::ui::views::check::render_check_header(
                runner.workspace().root(),
                selected.len(),
                &options,
                ui.color,
                ui.unicode
            )
        );
        let report = if ui.animation {
            execute_animated(&runner, &options, selected.len(), &ui)?
        } else {
            runner.execute(&options)?
        };
        render_result(&report, &ui);
        report
    };

    if ui.annotate() {
        emit_github_annotations(&report);
    }

    if !report.is_success() {
        let _ = std::io::stdout().flush();
        std::process::exit(1);
    }

    Ok(())
}

/// CLI flags over config (which already carries env overrides)
fn run_options(session: &Session, args: CheckArgs) -> RunOptions {
    let harness = &session.config.harness;
    RunOptions {
        only: args.only,
        categories: args.categories,
        cases: args.cases.unwrap_or(harness.cases),
        seed: args.seed.or(harness.seed),
        parallel: harness.parallel && !args.no_parallel,
    }
}

/// Run the selection, writing one NDJSON line per event to `out`.
///
/// The first failed write stops the stream and is returned.
fn stream_json<W: Write>(
    runner: &PropertyRunner,
    options: &RunOptions,
    total: usize,
    out: &mut W,
) -> Result<VerifyReport> {
    let start = StartEvent::new(
        "check",
        runner.workspace().root().display().to_string(),
        total,
        options.cases,
        options.seed,
    );
    json::write_event(&mut *out, &start).context("writing NDJSON start event")?;

    let mut write_error = None;
    let report = runner.execute_with_callback(options, |outcome| {
        if write_error.is_none() {
            write_error = json::write_event(&mut *out, &CheckEvent::from(outcome)).err();
        }
    })?;
    if let Some(err) = write_error {
        return Err(err).context("writing NDJSON check event");
    }

    json::write_event(&mut *out, &CompleteEvent::from_report("check", &report))
        .context("writing NDJSON complete event")?;
    Ok(report)
}

fn usage_error(id: &str) -> ! {
    let valid: Vec<&str> = catalog::ids().collect();
    Cli::command()
        .error(
            clap::error::ErrorKind::InvalidValue,
            format!(
                "unknown property id '{}'\n\nvalid ids:\n  {}",
                id,
                valid.join("\n  ")
            ),
        )
        .exit()
}

fn execute_animated(
    runner: &PropertyRunner,
    options: &RunOptions,
    total: usize,
    ui: &UiContext,
) -> Result<VerifyReport> {
    let mut line = StatusLine::new();
    let mut stdout = std::io::stdout().lock();
    let progress = Icon::Progress.colored(ui.color, ui.unicode);

    let _ = line.show(
        &mut stdout,
        &format!("{} Evaluating {} properties...", progress, total),
    );
    let mut done = 0;
    let report = runner.execute_with_callback(options, |outcome| {
        done += 1;
        let _ = line.show(
            &mut stdout,
            &format!("{} [{}/{}] {}", progress, done, total, outcome.id),
        );
    })?;
    let _ = line.clear(&mut stdout);
    stdout.flush().context("flushing stdout")?;
    Ok(report)
}

fn render_result(report: &VerifyReport, ui: &UiContext) {
    print!(
        "{}",
        crate::ui::views::check::render_check_report(report, ui.verbose, ui.color, ui.unicode)
    );
    print!(
        "\n{}",
        crate::ui::views::check::render_check_summary(report, ui.color, ui.unicode)
    );
}

fn emit_github_annotations(report: &VerifyReport) {
    for outcome in report.outcomes.iter().filter(|o| o.verdict.is_fail()) {
        let title = format!("{}: {}", outcome.id, outcome.title);
        let mut message = outcome.verdict.message().to_string();
        for detail in outcome.verdict.details() {
            if detail != outcome.verdict.message() {
                message.push('\n');
                message.push_str(detail);
            }
        }
        println!(
            "{}",
            github_actions_annotation(AnnotationLevel::Error, &message, None, Some(&title))
        );
    }

    println!(
        "{}",
        github_actions_annotation(
            AnnotationLevel::Notice,
            &format!(
                "{} passed, {} skipped, {} failed",
                report.passes(),
                report.skips(),
                report.failures()
            ),
            None,
            Some("infracheck"),
        )
    );
}
