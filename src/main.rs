//! Picsift CLI: `grayscale` or `lowres` sift from SOURCE into DEST.

use anyhow::Result;
use clap::Parser;
use picsift::engine::arg_parser::Cli;
use picsift::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    // RUST_LOG and PICSIFT_CONFIG may live in a local .env.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
