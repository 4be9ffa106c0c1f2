//! Path and filter utilities

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::utils::config::IMAGE_EXTENSIONS;

/// Convert absolute path to relative path from base
pub fn path_relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(|p| p.to_path_buf())
}

/// True when the extension (case-insensitive) is one of the supported raster formats.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Last path component as a display string (used for the "current file" status).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Returns false for a directory the walk must not enter (the destination tree nested in the source).
pub fn should_descend(dir: &Path, dest_canonical: &Option<PathBuf>) -> bool {
    match dest_canonical {
        Some(dest) => dir != dest.as_path(),
        None => true,
    }
}

/// Canonicalize the source root; it must be an existing directory.
pub fn canonicalize_source(path: &Path) -> Result<PathBuf> {
    let root = path
        .canonicalize()
        .with_context(|| format!("source folder {}", path.display()))?;
    if !root.is_dir() {
        anyhow::bail!("source {} is not a directory", path.display());
    }
    Ok(root)
}

/// Create the destination root if missing and return its canonical form.
pub fn prepare_dest(path: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("create destination folder {}", path.display()))?;
    path.canonicalize()
        .with_context(|| format!("destination folder {}", path.display()))
}
