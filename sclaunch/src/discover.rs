use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use jwalk::{Parallelism, WalkDir};

use crate::error::LaunchError;

/// `discover` walks the directory tree under `root` recursively
/// and returns the paths of all regular files whose name ends with `suffix`.
///
/// ## Remarks
/// Siblings are visited in file name order so the result is the same on every run.
/// Symbolic links are not followed and hidden entries are not skipped.
/// An empty suffix matches every regular file.
///
/// Any error met during the walk stops discovery,
/// so the tool never runs over a partial file list.
pub fn discover(root: &Path, suffix: &str) -> Result<Vec<PathBuf>, LaunchError> {
    check_root(root)?;

    create_dir_iterator(root)
        .into_iter()
        .map(|entry| {
            // unreadable directories come back as entries carrying the error
            entry
                .and_then(|mut e| match e.read_children_error.take() {
                    Some(source) => Err(source),
                    None => Ok(e),
                })
                .map_err(|source| LaunchError::Walk {
                    path: source
                        .path()
                        .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
                    source,
                })
        })
        .filter_ok(|e| e.file_type().is_file())
        .filter_ok(|e| has_suffix(&e.file_name, suffix))
        .map_ok(|e| e.path())
        .collect()
}

fn check_root(root: &Path) -> Result<(), LaunchError> {
    let path = root.to_path_buf();
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(LaunchError::RootNotDirectory { path }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LaunchError::RootNotFound { path }),
        Err(source) => Err(LaunchError::RootUnreadable { path, source }),
    }
}

fn create_dir_iterator(root: &Path) -> WalkDir {
    let root = decorate_path(root);
    WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(Parallelism::Serial)
}

fn has_suffix(file_name: &OsStr, suffix: &str) -> bool {
    file_name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// On Windows trailing back slash (\) to be added if volume and colon passed (like c:).
/// Otherwise the walk starts from the drive's current directory
#[cfg(target_os = "windows")]
fn decorate_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) if s.len() == 2 && s.ends_with(':') => PathBuf::from(format!("{s}\\")),
        _ => path.to_path_buf(),
    }
}

/// On Unix just passthrough as is
#[cfg(not(target_os = "windows"))]
fn decorate_path(path: &Path) -> PathBuf {
    path.to_path_buf()
}
