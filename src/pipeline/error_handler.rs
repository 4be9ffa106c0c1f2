use anyhow::Result;
use std::path::PathBuf;

use crate::Opts;

/// Handle one walk error: strict returns it, otherwise it is recorded in `skipped_dirs` and the walk goes on.
pub fn handle_walk_error(
    opts: &Opts,
    msg: String,
    path: Option<PathBuf>,
    skipped_dirs: &mut Vec<(PathBuf, String)>,
) -> Result<()> {
    if opts.strict {
        return Err(anyhow::anyhow!("strict mode: {}", msg));
    }
    log::debug!("skipping unreadable path: {}", msg);
    skipped_dirs.push((path.unwrap_or_else(|| PathBuf::from("<no-path>")), msg));
    Ok(())
}

/// Log skipped directories once the walk is over.
pub fn report_skipped_dirs(opts: &Opts, skipped_dirs: &[(PathBuf, String)]) {
    if skipped_dirs.is_empty() {
        return;
    }
    log::warn!(
        "Skipped {} paths due to permission errors or access issues",
        skipped_dirs.len()
    );
    if opts.verbose {
        for (p, msg) in skipped_dirs {
            eprintln!("  skipped: {} ({})", p.display(), msg);
        }
    }
}
