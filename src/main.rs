//! Rias: folder cover generator.
//!
//! Thin binary entry point. All logic lives in the `rias-core` crate; this
//! file parses arguments, sets up logging and draws the progress line.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use crossbeam_channel::Receiver;
use rias_core::run::{self, RunContext, RunKind, RunProgress, RunSummary};
use std::io::Write;
use std::thread;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let common = cli.command.common();

    // Logs go to stderr so the progress line on stdout stays intact.
    tracing_subscriber::fmt()
        .with_max_level(if common.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Rias starting");

    let options = common.scan_options();
    let (progress_tx, progress_rx) = crossbeam_channel::unbounded::<RunProgress>();

    let kind = match &cli.command {
        Commands::Apply(_) => RunKind::Apply,
        Commands::Remove(_) => RunKind::Remove,
    };
    let printer = thread::Builder::new()
        .name("rias-progress".into())
        .spawn(move || draw_progress(kind, progress_rx))?;

    let result = match &cli.command {
        Commands::Apply(args) => args.policy().and_then(|policy| {
            let ctx = RunContext::native().with_workers(args.jobs.unwrap_or_else(num_cpus::get));
            run::run_apply(&options, &policy, &ctx, Some(&progress_tx))
        }),
        Commands::Remove(args) => {
            let ctx = RunContext::native();
            run::run_remove(&options, &args.policy(), &ctx, Some(&progress_tx))
        }
    };
    drop(progress_tx);
    printer
        .join()
        .map_err(|_| anyhow::anyhow!("progress printer thread panicked"))?;

    let summary = result?;
    print_summary(&summary);
    Ok(())
}

/// Drain progress messages and rewrite one console line in place.
fn draw_progress(kind: RunKind, rx: Receiver<RunProgress>) {
    let verb = match kind {
        RunKind::Apply => "Applied",
        RunKind::Remove => "Removed",
    };
    let mut stdout = std::io::stdout();
    for msg in rx {
        match msg {
            RunProgress::Collected { total } => {
                let action = match kind {
                    RunKind::Apply => "applying",
                    RunKind::Remove => "removing",
                };
                println!("Processing {action} covers for {total} folder");
            }
            RunProgress::Advanced { done, total } => {
                let width = total.to_string().len();
                let _ = write!(stdout, "\r{verb} {done:>width$}/{total} covers\r");
                let _ = stdout.flush();
            }
            RunProgress::Failed { .. } | RunProgress::Phase(_) | RunProgress::Complete { .. } => {}
        }
    }
}

fn print_summary(summary: &RunSummary) {
    let width = summary.total.to_string().len();
    let label = match summary.kind {
        RunKind::Apply => "Processed covers for",
        RunKind::Remove => "Removed covers for",
    };
    println!(
        "\r{label} {:>width$}/{} folder    ",
        summary.completed, summary.total
    );
    if summary.failed > 0 || summary.unreadable > 0 {
        tracing::info!(
            "{} folder(s) failed, {} folder(s) could not be read (run with --verbose for details)",
            summary.failed,
            summary.unreadable
        );
    }
    tracing::debug!("Run took {:?}", summary.duration);
}
