//! Terminal front end for one sift: worker thread, progress bar, Ctrl+C pause, summary.

use anyhow::{Context, Result};
use log::info;

use crate::Opts;
use crate::RunSummary;
use crate::engine::classify::Classifier;
use crate::engine::progress::{ProgressEvent, apply_update, create_progress_bar, refresh_bar};
use crate::pipeline::{PauseSignal, SiftHandles, join_worker, spawn_sift_worker};
use crate::utils::Colors;

/// Sift `opts.source` into `opts.dest` on a worker thread while this thread renders progress.
/// Ctrl+C pauses: the worker stops after the file in hand and copies made so far stay in place.
pub fn run_sift(opts: &Opts, classifier: Box<dyn Classifier>) -> Result<RunSummary> {
    let pause = PauseSignal::new();
    let handler_pause = pause.clone();
    ctrlc::set_handler(move || {
        handler_pause.pause();
    })
    .context("set Ctrl+C handler")?;

    let name = classifier.name();
    info!(
        "Sifting {} -> {} ({})",
        opts.source.display(),
        opts.dest.display(),
        name
    );

    let SiftHandles {
        progress_rx,
        worker,
    } = spawn_sift_worker(opts.clone(), classifier, pause);

    let bar = create_progress_bar("Sifting");
    // Disconnects when the worker returns, finished, paused or failed.
    for event in progress_rx.iter() {
        match event {
            ProgressEvent::File(update) => apply_update(&bar, &update),
            ProgressEvent::Finished(_) => refresh_bar(&bar),
        }
    }
    eprintln!();

    let summary = join_worker(worker)?;
    print_summary(&summary, opts.json)?;
    Ok(summary)
}

/// Summary line on the log, or pretty JSON on stdout with `--json`.
fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).context("serialize summary")?
        );
        return Ok(());
    }
    let state = if summary.paused {
        Colors::colorize(Colors::PAUSED, "Paused")
    } else {
        "Done".to_string()
    };
    info!(
        "{}: {}/{} files, {} images | {} | {}",
        state,
        summary.processed,
        summary.total,
        summary.images,
        Colors::colorize(Colors::MATCHED, &format!("Copied: {}", summary.matched)),
        Colors::colorize(
            Colors::UNDECODABLE,
            &format!("Undecodable: {}", summary.undecodable)
        ),
    );
    if summary.paused {
        info!("Run again to start over from the top; existing copies will be overwritten.");
    }
    Ok(())
}
