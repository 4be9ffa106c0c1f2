//! Pipeline components: run context, walk, worker orchestration, error handling.

pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod walk;

pub use context::{PauseSignal, RunContext};
pub use error_handler::{handle_walk_error, report_skipped_dirs};
pub use orchestrator::{SiftHandles, join_worker, sift_tree, spawn_sift_worker};
pub use walk::{DirBatch, DirWalk, WalkOutcome, count_files, to_outcome_walkdir};
