use anyhow::{Result, bail};
use crossbeam_channel::{Receiver, unbounded};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use crate::engine::classify::Classifier;
use crate::engine::mirror::mirror_file;
use crate::engine::progress::{ChannelSink, ProgressEvent};
use crate::engine::tools::{
    canonicalize_source, display_name, is_image_file, path_relative_to, prepare_dest,
};
use crate::pipeline::{
    DirWalk, PauseSignal, RunContext, WalkOutcome, count_files, handle_walk_error,
    report_skipped_dirs,
};
use crate::{Opts, ProgressUpdate, RunSummary, TotalMode};

/// Canonical roots for one run. `skip_dir` is set when the destination lies inside the source.
struct Roots {
    source: PathBuf,
    dest: PathBuf,
    skip_dir: Option<PathBuf>,
}

fn setup_roots(opts: &Opts) -> Result<Roots> {
    let source = canonicalize_source(&opts.source)?;
    let dest = prepare_dest(&opts.dest)?;
    if dest == source {
        bail!(
            "destination {} is the source tree; matches would be copied onto themselves",
            dest.display()
        );
    }
    let skip_dir = (dest != source && dest.starts_with(&source)).then(|| dest.clone());
    if skip_dir.is_some() {
        debug!("destination is inside source; not walking {}", dest.display());
    }
    Ok(Roots {
        source,
        dest,
        skip_dir,
    })
}

/// Classify one file and mirror it when it matches. Non-images and non-regular files are counted
/// but not opened.
fn sift_file(
    file: &Path,
    roots: &Roots,
    classifier: &dyn Classifier,
    list_copied: bool,
    summary: &mut RunSummary,
) -> Result<()> {
    if !file.is_file() || !is_image_file(file) {
        return Ok(());
    }
    summary.images += 1;
    match classifier.classify(file) {
        Ok(true) => {
            let out = mirror_file(file, &roots.source, &roots.dest)?;
            debug!("{}: copied {}", classifier.name(), out.display());
            summary.matched += 1;
            if list_copied {
                summary
                    .copied
                    .push(path_relative_to(&out, &roots.dest).unwrap_or(out));
            }
        }
        Ok(false) => {}
        Err(e) => {
            debug!("{}: undecodable {}: {}", classifier.name(), file.display(), e);
            summary.undecodable += 1;
        }
    }
    Ok(())
}

/// Walk the source tree, classify every image and mirror matches into the destination.
/// Runs on the caller's thread.
///
/// Checks the pause signal before each directory and before each file; once it is seen set,
/// nothing more is examined or copied and the summary comes back with `paused = true`.
/// Copy and mkdir failures end the run with an error, as does a destination equal to the source.
pub fn sift_tree(
    opts: &Opts,
    classifier: &dyn Classifier,
    ctx: &mut RunContext<'_>,
) -> Result<RunSummary> {
    let roots = setup_roots(opts)?;
    let precount = match opts.total_mode {
        TotalMode::PreCount => Some(count_files(
            &roots.source,
            roots.skip_dir.clone(),
            opts.follow_links,
        )),
        TotalMode::Running => None,
    };

    let mut summary = RunSummary::default();
    let mut total = precount.unwrap_or(0);
    let mut skipped_dirs = Vec::new();

    'walk: for outcome in DirWalk::new(&roots.source, roots.skip_dir.clone(), opts.follow_links) {
        if ctx.is_paused() {
            summary.paused = true;
            break;
        }
        let batch = match outcome {
            WalkOutcome::Dir(batch) => batch,
            WalkOutcome::Err { msg, path } => {
                handle_walk_error(opts, msg, path, &mut skipped_dirs)?;
                continue;
            }
        };
        if precount.is_none() {
            total += batch.files.len();
        }
        for file in &batch.files {
            if ctx.is_paused() {
                summary.paused = true;
                break 'walk;
            }
            sift_file(file, &roots, classifier, opts.list_copied, &mut summary)?;
            summary.processed += 1;
            ctx.report(&ProgressUpdate {
                processed: summary.processed,
                total,
                matched: summary.matched,
                current: display_name(file),
            });
        }
    }

    summary.total = total;
    summary.skipped_dirs = skipped_dirs.len();
    report_skipped_dirs(opts, &skipped_dirs);
    if summary.paused {
        info!(
            "Paused after {} files; {} already copied are kept",
            summary.processed, summary.matched
        );
    }
    ctx.finish(&summary);
    Ok(summary)
}

/// Handles returned by [`spawn_sift_worker`]: drain `progress_rx`, then [`join_worker`].
/// `progress_rx` disconnects when the worker exits.
pub struct SiftHandles {
    pub progress_rx: Receiver<ProgressEvent>,
    pub worker: JoinHandle<Result<RunSummary>>,
}

/// Run [`sift_tree`] on a single background thread. Progress arrives on an unbounded channel so
/// the worker never waits on the reader.
pub fn spawn_sift_worker(
    opts: Opts,
    classifier: Box<dyn Classifier>,
    pause: PauseSignal,
) -> SiftHandles {
    let (tx, progress_rx) = unbounded::<ProgressEvent>();
    let worker = thread::spawn(move || {
        let mut ctx = RunContext::new(pause, ChannelSink::new(tx));
        sift_tree(&opts, classifier.as_ref(), &mut ctx)
    });
    SiftHandles {
        progress_rx,
        worker,
    }
}

/// Join the worker and return its result.
pub fn join_worker(worker: JoinHandle<Result<RunSummary>>) -> Result<RunSummary> {
    worker
        .join()
        .map_err(|_| anyhow::anyhow!("sift worker panicked"))?
}
