//! Directory-by-directory walk: yields each directory once with its files, top-down and depth-first.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::engine::tools::should_descend;

/// One directory and the non-directory entries directly inside it, in enumeration order.
#[derive(Clone, Debug, Default)]
pub struct DirBatch {
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// One result from the walk: a directory batch or an error with optional path.
#[derive(Debug)]
pub enum WalkOutcome {
    Dir(DirBatch),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir error into [`WalkOutcome`].
pub fn to_outcome_walkdir(err: walkdir::Error) -> WalkOutcome {
    WalkOutcome::Err {
        msg: format!("{}", err),
        path: err.path().map(PathBuf::from),
    }
}

type EntryIter = Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + Send>;

/// Lazy walk over `root`. Files of a directory are grouped by having walkdir list them before subdirectories.
pub struct DirWalk {
    inner: EntryIter,
    pending: Option<DirBatch>,
}

impl DirWalk {
    /// `skip_dir`: a directory never entered (the destination when it sits inside the source).
    pub fn new(root: &Path, skip_dir: Option<PathBuf>, follow_links: bool) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(follow_links)
            .sort_by(|a, b| a.file_type().is_dir().cmp(&b.file_type().is_dir()))
            .into_iter()
            .filter_entry(move |e| !e.file_type().is_dir() || should_descend(e.path(), &skip_dir));
        Self {
            inner: Box::new(inner),
            pending: None,
        }
    }
}

impl Iterator for DirWalk {
    type Item = WalkOutcome;

    fn next(&mut self) -> Option<WalkOutcome> {
        loop {
            match self.inner.next() {
                None => return self.pending.take().map(WalkOutcome::Dir),
                Some(Err(err)) => return Some(to_outcome_walkdir(err)),
                Some(Ok(entry)) => {
                    if entry.file_type().is_dir() {
                        let batch = DirBatch {
                            dir: entry.into_path(),
                            files: Vec::new(),
                        };
                        if let Some(done) = self.pending.replace(batch) {
                            return Some(WalkOutcome::Dir(done));
                        }
                    } else if entry.path_is_symlink() && entry.path().is_dir() {
                        // Unfollowed directory link: neither a file nor walked into.
                        continue;
                    } else if let Some(batch) = self.pending.as_mut() {
                        batch.files.push(entry.into_path());
                    }
                }
            }
        }
    }
}

/// Number of files under `root` as seen by [`DirWalk`]. Walk errors are ignored here.
pub fn count_files(root: &Path, skip_dir: Option<PathBuf>, follow_links: bool) -> usize {
    DirWalk::new(root, skip_dir, follow_links)
        .map(|o| match o {
            WalkOutcome::Dir(b) => b.files.len(),
            WalkOutcome::Err { .. } => 0,
        })
        .sum()
}
