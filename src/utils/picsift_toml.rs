//! Load `.picsift.toml` (CLI only). Lib callers pass everything through SiftOpts and the classifier.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::engine::classify::LowSaturation;
use crate::{Opts, TotalMode};

#[derive(Debug, Default, Deserialize)]
pub struct PicsiftToml {
    #[serde(default)]
    settings: SettingsSection,
    #[serde(default)]
    grayscale: GrayscaleSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    follow_links: Option<bool>,
    strict: Option<bool>,
    verbose: Option<bool>,
    precount: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct GrayscaleSection {
    cutoff_bucket: Option<usize>,
    min_ratio: Option<f64>,
}

/// Load the config file at `path`. `Ok(None)` when the file does not exist; parse and read errors are returned
/// so the caller can report them once logging is up.
pub fn load_picsift_toml(path: &Path) -> Result<Option<PicsiftToml>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(file))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$opts_field = v;
        }
    };
}

impl PicsiftToml {
    /// Apply file settings to opts (only fields present in the file). Call before applying CLI flags.
    pub fn apply_to_opts(&self, opts: &mut Opts) {
        let s = &self.settings;
        apply_file_opt!(s, opts, follow_links => follow_links);
        apply_file_opt!(s, opts, strict => strict);
        apply_file_opt!(s, opts, verbose => verbose);
        if let Some(precount) = s.precount {
            opts.total_mode = if precount {
                TotalMode::PreCount
            } else {
                TotalMode::Running
            };
        }
    }

    /// Grayscale classifier with the file's tuning applied over the defaults.
    /// Out-of-range values are warned about and ignored.
    pub fn low_saturation(&self) -> LowSaturation {
        let mut classifier = LowSaturation::default();
        let g = &self.grayscale;
        if let Some(cutoff) = g.cutoff_bucket {
            match LowSaturation::new(cutoff, classifier.min_ratio) {
                Some(c) => classifier = c,
                None => log::warn!("grayscale.cutoff_bucket {} out of range 1..=256", cutoff),
            }
        }
        if let Some(ratio) = g.min_ratio {
            match LowSaturation::new(classifier.cutoff_bucket, ratio) {
                Some(c) => classifier = c,
                None => log::warn!("grayscale.min_ratio {} out of range 0..1", ratio),
            }
        }
        classifier
    }
}
