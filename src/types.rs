//! Public and internal types for the picsift API and pipeline.

use serde::Serialize;
use std::path::PathBuf;

/// How the progress denominator is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TotalMode {
    /// Running sum of file counts of the directories entered so far. Grows during the walk.
    #[default]
    Running,
    /// Count every file with a first walk so the total is exact from the start.
    PreCount,
}

/// Lib-only options for [`sift_dir`](crate::sift_dir).
#[derive(Clone, Debug, Default)]
pub struct SiftOpts {
    /// Tree scanned for candidate images.
    pub source: PathBuf,
    /// Tree receiving the mirrored matches. Created when missing.
    pub dest: PathBuf,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Strict mode: fail on the first unreadable directory instead of skipping it.
    pub strict: bool,
    /// Progress denominator mode.
    pub total_mode: TotalMode,
    /// Keep the relative path of every copy in [`RunSummary::copied`]. Off by default so
    /// memory does not grow with the tree; only counts are kept.
    pub list_copied: bool,
}

impl From<&SiftOpts> for Opts {
    fn from(o: &SiftOpts) -> Self {
        Opts {
            source: o.source.clone(),
            dest: o.dest.clone(),
            follow_links: o.follow_links,
            strict: o.strict,
            total_mode: o.total_mode,
            list_copied: o.list_copied,
            verbose: false,
            json: false,
        }
    }
}

/// Full options (CLI). Use [`SiftOpts`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub follow_links: bool,
    pub strict: bool,
    pub total_mode: TotalMode,
    /// Record copied paths in the summary (set by `--json`).
    pub list_copied: bool,
    /// Debug logging and a per-path list of skipped directories.
    pub verbose: bool,
    /// Print the end-of-run summary as JSON instead of a log line.
    pub json: bool,
}

/// Progress snapshot emitted after every file examined, match or not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Files examined so far (images and non-images).
    pub processed: usize,
    /// Denominator; see [`TotalMode`].
    pub total: usize,
    /// Files copied so far.
    pub matched: usize,
    /// File name (last path component) of the file just examined.
    pub current: String,
}

impl ProgressUpdate {
    /// `"processed/total"`, the string shown next to the bar.
    pub fn status_line(&self) -> String {
        format!("{}/{}", self.processed, self.total)
    }
}

/// Outcome of one run. `paused` is true when the walk stopped on the pause signal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub total: usize,
    pub images: usize,
    pub matched: usize,
    pub undecodable: usize,
    pub skipped_dirs: usize,
    pub paused: bool,
    /// Copied paths relative to the destination; empty unless `list_copied` was set.
    pub copied: Vec<PathBuf>,
}
