use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::engine::classify::{InputError, parse_threshold};

fn parse_width(s: &str) -> Result<u32, InputError> {
    parse_threshold("width", s)
}

fn parse_height(s: &str) -> Result<u32, InputError> {
    parse_threshold("height", s)
}

/// Pick out near-grayscale or undersized images and mirror them into another folder.
#[derive(Clone, Parser)]
#[command(name = "picsift")]
#[command(about = "Copy matching images from SOURCE to DEST, keeping their relative paths. Ctrl+C pauses.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output.
    #[arg(long, short = 'v', global = true, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Follow symbolic links.
    #[arg(long, short = 'f', global = true, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Strict mode: fail on the first unreadable directory instead of skipping it.
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub strict: Option<bool>,

    /// Count all files before starting so the progress total is exact (one extra walk).
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub precount: Option<bool>,

    /// Print the run summary as JSON on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file. Default: PICSIFT_CONFIG, then `.picsift.toml` in the working directory.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Copy images whose pixels are almost all unsaturated (black-and-white looking).
    Grayscale {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Copy images narrower than --width or shorter than --height.
    Lowres {
        #[command(flatten)]
        common: CommonArgs,

        /// Minimum width in pixels; narrower images match.
        #[arg(long, short = 'W', value_parser = parse_width)]
        width: u32,

        /// Minimum height in pixels; shorter images match.
        #[arg(long, short = 'H', value_parser = parse_height)]
        height: u32,
    },
}

#[derive(Clone, Args)]
pub struct CommonArgs {
    /// Folder to scan.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Folder receiving the copies. Created when missing.
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Grayscale { common } | Commands::Lowres { common, .. } => common,
        }
    }
}
