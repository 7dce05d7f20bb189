//! Capability-based file access over UTF-8 paths.
//!
//! Paths from configuration are resolved against an ambient directory
//! handle (the filesystem root for absolute paths, `.` otherwise) and every
//! open goes through that handle.

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
///
/// Propagates any failure to resolve the parent directory or open the file.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create (or truncate) `path` for writing, creating missing parents.
///
/// # Errors
///
/// Propagates directory creation and file creation failures.
pub fn create_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    dir.create(name)
}

/// Whether the entry at `path` is a regular file.
///
/// # Errors
///
/// Fails with [`io::ErrorKind::NotFound`] when the entry or its parent is
/// absent, and with the underlying error when it cannot be inspected.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Open the directory containing `path` and return it with the file name.
///
/// # Errors
///
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Create every missing directory above `path`.
///
/// # Errors
///
/// Propagates failures to open the base directory or create the chain.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) else {
        return Ok(());
    };
    let (base, relative) = split_at_base(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?.create_dir_all(&relative)
}

/// Split `path` into the directory cap-std can open ambiently and the
/// remainder relative to it.
fn split_at_base(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut components = path.components();
    match components.next() {
        // Windows drive or UNC prefix, followed by the root separator.
        Some(Utf8Component::Prefix(_)) => {
            let base: Utf8PathBuf = path.components().take(2).collect();
            let relative = path
                .strip_prefix(&base)
                .map(Utf8Path::to_path_buf)
                .unwrap_or_default();
            (base, relative)
        }
        Some(Utf8Component::RootDir) => (
            Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR),
            components.as_path().to_path_buf(),
        ),
        _ => (Utf8PathBuf::from("."), path.to_path_buf()),
    }
}
