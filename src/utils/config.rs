//! Application configuration constants.
//! Extensions and classifier thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    env_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                env_prefix: pkg.to_uppercase(),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Name of the optional config file looked up in the working directory.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Prefix of environment variables read by the CLI (e.g. `PICSIFT_CONFIG`).
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{}", self.env_prefix, suffix)
    }
}

// ---- Candidates ----

/// Lowercase extensions (without dot) treated as images. Everything else is never classified.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "bmp"];

// ---- Low saturation ----

/// Saturation thresholds for the grayscale classifier.
pub struct SaturationConsts;

impl SaturationConsts {
    /// Histogram buckets over the 8-bit saturation channel.
    pub const BUCKETS: usize = 256;
    /// Buckets `0..CUTOFF_BUCKET` count as "low saturation" (about 4% of full saturation).
    pub const CUTOFF_BUCKET: usize = 10;
    /// Share of low-saturation pixels an image must exceed to match.
    pub const MIN_RATIO: f64 = 0.95;
}
