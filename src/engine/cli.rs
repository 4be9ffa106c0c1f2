//! CLI command handler: build options from config file and flags, then run the chosen sift.

use anyhow::Result;
use log::{debug, warn};
use std::path::PathBuf;

use crate::engine::arg_parser::{Cli, Commands};
use crate::engine::classify::{Classifier, Resolution};
use crate::sift::run_sift;
use crate::utils::{PackagePaths, PicsiftToml, load_picsift_toml, setup_logging};
use crate::{Opts, TotalMode};

/// Config file path: --config, then the PICSIFT_CONFIG variable, then `.picsift.toml` in the
/// working directory. The boolean is true when the path was asked for explicitly (a missing file
/// is then worth a warning).
fn config_path(cli: &Cli) -> (PathBuf, bool) {
    if let Some(p) = &cli.config {
        return (p.clone(), true);
    }
    let paths = PackagePaths::get();
    match std::env::var_os(paths.env_var("CONFIG")) {
        Some(p) => (PathBuf::from(p), true),
        None => (PathBuf::from(paths.config_filename()), false),
    }
}

/// Overwrite opts field from the CLI when given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $cli.$field {
            $opts.$field = v;
        }
    };
}

fn setup_opts(cli: &Cli, file: Option<&PicsiftToml>) -> Opts {
    let common = cli.command.common();
    let mut opts = Opts {
        source: common.source.clone(),
        dest: common.dest.clone(),
        json: cli.json,
        list_copied: cli.json,
        ..Default::default()
    };
    if let Some(file) = file {
        file.apply_to_opts(&mut opts);
    }
    apply_cli_opt!(cli, opts, verbose);
    apply_cli_opt!(cli, opts, follow_links);
    apply_cli_opt!(cli, opts, strict);
    if let Some(precount) = cli.precount {
        opts.total_mode = if precount {
            TotalMode::PreCount
        } else {
            TotalMode::Running
        };
    }
    opts
}

fn classifier_for(command: &Commands, file: Option<&PicsiftToml>) -> Box<dyn Classifier> {
    match command {
        Commands::Grayscale { .. } => {
            let classifier = file.map(PicsiftToml::low_saturation).unwrap_or_default();
            Box::new(classifier)
        }
        Commands::Lowres { width, height, .. } => Box::new(Resolution::new(*width, *height)),
    }
}

/// Run the subcommand. Thresholds were validated by clap before we get here.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let (path, explicit) = config_path(cli);
    let loaded = load_picsift_toml(&path);
    let file = loaded.as_ref().ok().and_then(Option::as_ref);

    let opts = setup_opts(cli, file);
    let classifier = classifier_for(&cli.command, file);
    setup_logging(opts.verbose, classifier.name());
    match &loaded {
        Err(e) => warn!("{:#}; ignoring config file", e),
        Ok(None) if explicit => warn!("config file {} not found", path.display()),
        Ok(None) => {}
        Ok(Some(_)) => debug!("Loaded config from {}", path.display()),
    }

    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    run_sift(&opts, classifier)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classify::LowSaturation;
    use clap::Parser;

    #[test]
    fn cli_overrides_file() {
        let cli = Cli::try_parse_from(["picsift", "grayscale", "in", "out", "--strict", "false"])
            .unwrap();
        let file: PicsiftToml =
            toml::from_str("[settings]\nstrict = true\nfollow_links = true\n").unwrap();
        let opts = setup_opts(&cli, Some(&file));
        assert!(!opts.strict);
        assert!(opts.follow_links);
        assert_eq!(opts.source, PathBuf::from("in"));
    }

    #[test]
    fn grayscale_classifier_uses_file_tuning() {
        let cli = Cli::try_parse_from(["picsift", "grayscale", "in", "out"]).unwrap();
        let file: PicsiftToml = toml::from_str("[grayscale]\ncutoff_bucket = 30\n").unwrap();
        assert_eq!(classifier_for(&cli.command, Some(&file)).name(), "grayscale");
        assert_eq!(file.low_saturation(), LowSaturation::new(30, 0.95).unwrap());
    }
}
