//! Picsift: walk an image tree and mirror the near-grayscale or undersized pictures into another tree

pub mod engine;
pub mod pipeline;
pub mod sift;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::{Classifier, DecodeError, InputError, LowSaturation, Resolution};
pub use pipeline::{PauseSignal, RunContext};

use log::debug;

/// Result alias used by public picsift API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: sift `opts.source` into `opts.dest` with `classifier`, on the calling thread.
///
/// - `ctx` carries the pause signal (poll target) and the progress sink. Use [`RunContext::detached`] when you
///   need neither.
/// - For a background run with progress on a channel, see [`spawn_sift_worker`](crate::pipeline::spawn_sift_worker).
///
/// ```ignore
/// let opts = SiftOpts { source: "photos".into(), dest: "gray".into(), ..Default::default() };
/// let summary = picsift::sift_dir(&opts, &LowSaturation::default(), &mut RunContext::detached())?;
/// ```
pub fn sift_dir(
    opts: &SiftOpts,
    classifier: &dyn Classifier,
    ctx: &mut RunContext<'_>,
) -> Result<RunSummary> {
    let opts = Opts::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    pipeline::sift_tree(&opts, classifier, ctx)
}
