//! Engine module: classifiers, mirroring, progress, CLI

pub mod arg_parser;
pub mod classify;
pub mod cli;
pub mod mirror;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::{Cli, Commands, CommonArgs};
pub use classify::{
    Classifier, DecodeError, InputError, LowSaturation, Resolution, is_match, parse_threshold,
};
pub use cli::handle_run;
pub use mirror::{mirror_file, mirror_path};
pub use progress::{ChannelSink, NullSink, ProgressEvent, ProgressSink};
pub use tools::{is_image_file, path_relative_to};
