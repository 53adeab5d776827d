//! Crash-safe file writes.
//!
//! Every artifact is written to a temporary file in the destination
//! directory, synced, and then moved into place with a single rename, so a
//! reader never observes a half-written file at the target path.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Permissions for directories holding key material.
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Permissions for key files.
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Permissions for public artifacts such as the genesis file.
pub const PUBLIC_FILE_MODE: u32 = 0o644;

/// Directory a file lives in, treating a bare file name as `.`.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Create `dir` (and its parents) if missing, with `mode` on unix.
///
/// Existing directories are left as they are.
pub fn ensure_dir(dir: &Path, mode: u32) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(())
}

fn stage(path: &Path, contents: &[u8], mode: u32) -> io::Result<NamedTempFile> {
    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(contents)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(mode))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Flush the directory entry of `path` so the rename survives a crash.
fn sync_dir(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    File::open(parent_dir(path))?.sync_all()?;
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Atomically write `contents` to `path`, replacing any existing file.
pub fn write_atomic(path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
    let tmp = stage(path, contents, mode)?;
    tmp.persist(path)?;
    sync_dir(path)
}

/// Atomically create `path` with `contents`.
///
/// Fails with [`io::ErrorKind::AlreadyExists`] if `path` exists, including
/// when another process created it between our existence check and the
/// commit.
pub fn write_new_atomic(path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
    let tmp = stage(path, contents, mode)?;
    tmp.persist_noclobber(path)?;
    sync_dir(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("genesis.json");

        write_atomic(&path, b"first", PUBLIC_FILE_MODE).unwrap();
        write_atomic(&path, b"second", PUBLIC_FILE_MODE).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        // No temporary files left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_new_atomic_refuses_to_clobber() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.json");

        write_new_atomic(&path, b"original", PRIVATE_FILE_MODE).unwrap();
        let err = write_new_atomic(&path, b"replacement", PRIVATE_FILE_MODE).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&path).unwrap(), b"original");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested, PRIVATE_DIR_MODE).unwrap();
        ensure_dir(&nested, PRIVATE_DIR_MODE).unwrap();
        assert!(nested.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_modes_applied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let keys = dir.path().join("keys");
        ensure_dir(&keys, PRIVATE_DIR_MODE).unwrap();
        let path = keys.join("key.json");
        write_new_atomic(&path, b"{}", PRIVATE_FILE_MODE).unwrap();

        let dir_mode = fs::metadata(&keys).unwrap().permissions().mode();
        let file_mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o777, PRIVATE_DIR_MODE);
        assert_eq!(file_mode & 0o777, PRIVATE_FILE_MODE);
    }

    #[cfg(unix)]
    #[test]
    fn test_sync_dir_of_existing_and_missing_parent() {
        let dir = TempDir::new().unwrap();
        sync_dir(&dir.path().join("genesis.json")).unwrap();

        let err = sync_dir(&dir.path().join("missing").join("genesis.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("genesis.json")), Path::new("."));
        assert_eq!(parent_dir(Path::new("/a/b.json")), Path::new("/a"));
    }
}
