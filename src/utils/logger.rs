//! Terminal logging for one sift run. Every line carries the run mode (`grayscale`, `lowres`).

use colored::{ColoredString, Colorize};
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;

/// Install the logger. Dependencies log warnings only; picsift logs at info, or debug with
/// `verbose`. `RUST_LOG` still wins. A second call is a no-op.
pub fn setup_logging(verbose: bool, mode: &'static str) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = Builder::from_default_env()
        .filter_level(LevelFilter::Warn)
        .filter_module(env!("CARGO_PKG_NAME"), level)
        .format(move |buf, record| {
            let tag = format!("{} {}", env!("CARGO_PKG_NAME"), mode).cyan();
            match level_label(record.level()) {
                // Debug lines name their module so per-file decisions can be traced.
                Some(label) if verbose || record.level() <= Level::Warn => writeln!(
                    buf,
                    "[{} {} {}] {}",
                    tag,
                    label,
                    record.target().white(),
                    record.args()
                ),
                _ => writeln!(buf, "[{}] {}", tag, record.args()),
            }
        })
        .try_init();
}

fn level_label(level: Level) -> Option<ColoredString> {
    match level {
        Level::Error => Some("ERROR".red()),
        Level::Warn => Some("WARN".yellow()),
        Level::Debug | Level::Trace => Some("DEBUG".dimmed()),
        Level::Info => None,
    }
}

/// Terminal colors for the end-of-run summary.
pub struct Colors;

impl Colors {
    pub const MATCHED: &'static str = "green";
    pub const UNDECODABLE: &'static str = "yellow";
    pub const PAUSED: &'static str = "magenta";

    pub fn colorize(color: &str, text: &str) -> String {
        text.color(color).to_string()
    }
}
