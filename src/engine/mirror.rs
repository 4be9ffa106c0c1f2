//! Relative mirroring: copy a matched file under the destination root at the same relative path.

use anyhow::{Context, Result, bail};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use super::tools::path_relative_to;

/// Destination path of `file` when mirrored from `source_root` into `dest_root`.
pub fn mirror_path(file: &Path, source_root: &Path, dest_root: &Path) -> Result<PathBuf> {
    let rel = path_relative_to(file, source_root).with_context(|| {
        format!(
            "{} is not under source {}",
            file.display(),
            source_root.display()
        )
    })?;
    Ok(dest_root.join(rel))
}

/// Copy `file` to `dest_root/relpath(file, source_root)`, creating parent directories.
/// Overwrites an existing destination, read-only or not. Contents, permissions and access/modify
/// times are copied. Refuses to copy a file onto itself. Returns the destination path.
pub fn mirror_file(file: &Path, source_root: &Path, dest_root: &Path) -> Result<PathBuf> {
    let dest = mirror_path(file, source_root, dest_root)?;
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    if same_file(file, &dest) {
        bail!("{} and {} are the same file", file.display(), dest.display());
    }
    make_writable(&dest)?;
    fs::copy(file, &dest)
        .with_context(|| format!("copy {} -> {}", file.display(), dest.display()))?;
    copy_times(file, &dest)?;
    Ok(dest)
}

/// True when both paths exist and resolve to the same file. The copy would truncate its own source.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Give the owner write access to an existing read-only copy so it can be overwritten.
/// The copy gets the source permissions back afterwards.
fn make_writable(dest: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(dest) else {
        return Ok(());
    };
    if !meta.is_file() || !meta.permissions().readonly() {
        return Ok(());
    }
    fs::set_permissions(dest, writable(meta.permissions()))
        .with_context(|| format!("make {} writable", dest.display()))
}

#[cfg(unix)]
fn writable(perms: fs::Permissions) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    fs::Permissions::from_mode(perms.mode() | 0o200)
}

#[cfg(not(unix))]
fn writable(mut perms: fs::Permissions) -> fs::Permissions {
    perms.set_readonly(false);
    perms
}

/// Set access and modification times of `dest` to those of `src`.
fn copy_times(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).with_context(|| format!("stat {}", src.display()))?;
    let mut times = FileTimes::new();
    if let Ok(t) = meta.accessed() {
        times = times.set_accessed(t);
    }
    if let Ok(t) = meta.modified() {
        times = times.set_modified(t);
    }
    open_for_times(dest)
        .and_then(|f| f.set_times(times))
        .with_context(|| format!("set times on {}", dest.display()))
}

// Owner may set times through a read-only handle, so read-only copies still get their times.
#[cfg(unix)]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::options().write(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn mirror_path_joins_relative() {
        let p = mirror_path(
            Path::new("/src/a/b/c.png"),
            Path::new("/src"),
            Path::new("/dst"),
        )
        .unwrap();
        assert_eq!(p, PathBuf::from("/dst/a/b/c.png"));
    }

    #[test]
    fn mirror_path_outside_source_errors() {
        let res = mirror_path(Path::new("/other/c.png"), Path::new("/src"), Path::new("/dst"));
        assert!(res.is_err());
    }

    #[test]
    fn mirror_file_copies_bytes_and_mtime() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(src.join("deep/er")).unwrap();
        let file = src.join("deep/er/pic.png");
        fs::write(&file, b"not really a png").unwrap();
        let old = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
        File::options()
            .write(true)
            .open(&file)
            .unwrap()
            .set_modified(old)
            .unwrap();

        let out = mirror_file(&file, &src, &dst).unwrap();
        assert_eq!(out, dst.join("deep/er/pic.png"));
        assert_eq!(fs::read(&out).unwrap(), b"not really a png");
        assert_eq!(fs::metadata(&out).unwrap().modified().unwrap(), old);
    }

    #[test]
    fn mirror_file_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("a.bmp"), b"new").unwrap();
        fs::write(dst.join("a.bmp"), b"old and longer").unwrap();
        mirror_file(&src.join("a.bmp"), &src, &dst).unwrap();
        assert_eq!(fs::read(dst.join("a.bmp")).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn mirror_file_overwrites_read_only_copy() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        let file = src.join("cam.jpg");
        fs::write(&file, b"first").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();

        let out = mirror_file(&file, &src, &dst).unwrap();
        assert!(fs::metadata(&out).unwrap().permissions().readonly());

        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();
        fs::write(&file, b"second").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();
        mirror_file(&file, &src, &dst).unwrap();
        assert_eq!(fs::read(&out).unwrap(), b"second");
        assert_eq!(fs::metadata(&out).unwrap().permissions().mode() & 0o777, 0o444);
    }

    #[test]
    fn make_writable_clears_read_only() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("ro.png");
        fs::write(&p, b"x").unwrap();
        let mut perms = fs::metadata(&p).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&p, perms).unwrap();
        make_writable(&p).unwrap();
        assert!(!fs::metadata(&p).unwrap().permissions().readonly());
        make_writable(&tmp.path().join("absent.png")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn mirror_file_refuses_copy_onto_itself() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        let file = src.join("pic.png");
        fs::write(&file, b"keep me").unwrap();
        // Destination root reaches the source through a link.
        let alias = tmp.path().join("alias");
        std::os::unix::fs::symlink(&src, &alias).unwrap();

        assert!(mirror_file(&file, &src, &alias).is_err());
        assert_eq!(fs::read(&file).unwrap(), b"keep me");
    }
}
