//! File system walking

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FintError, Result};

/// List every regular file under `root`, depth first, sorted by name within
/// each directory. Symlinks are followed.
pub fn list_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            FintError::CannotOpenFile {
                path,
                source: err
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop")),
            }
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
