//! Fix engine
//!
//! Fixed output is written to a shadow file next to the original and swapped
//! in with a rename once every line has been written. If anything fails before
//! the swap the shadow file is dropped and the original stays as it was.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{FintError, Result};
use crate::scanner::line_source::SourceLine;

/// Shadow copy of one source file being rewritten
#[derive(Debug)]
pub struct ShadowFile {
    original: PathBuf,
    writer: BufWriter<NamedTempFile>,
    changed: bool,
}

impl ShadowFile {
    /// Create an empty shadow file next to the file `original` resolves to,
    /// so the final rename never crosses filesystems and a symlink keeps
    /// pointing at the rewritten target.
    pub fn create(original: &Path) -> Result<Self> {
        let failed = |source| FintError::FixFailed {
            path: original.to_path_buf(),
            source,
        };
        let resolved = fs::canonicalize(original).map_err(failed)?;
        let dir = match resolved.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = NamedTempFile::new_in(&dir).map_err(failed)?;

        Ok(Self {
            original: resolved,
            writer: BufWriter::new(temp),
            changed: false,
        })
    }

    /// Write `line`, replaced by `fixed` when given, followed by the line's
    /// original terminator. Unfixed lines are copied byte-for-byte.
    pub fn write_line(&mut self, line: &SourceLine, fixed: Option<&str>) -> Result<()> {
        let content = match fixed {
            Some(fixed) => {
                self.changed |= fixed.as_bytes() != line.raw.as_slice();
                fixed.as_bytes()
            }
            None => line.raw.as_slice(),
        };

        self.writer
            .write_all(content)
            .and_then(|_| self.writer.write_all(line.terminator.as_bytes()))
            .map_err(|source| self.failed(source))
    }

    /// Whether any written line differs from the original
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Replace the original with the shadow file. Returns `false` without
    /// touching the original when no line changed.
    pub fn commit(self) -> Result<bool> {
        if !self.changed {
            debug!(file = %self.original.display(), "No fixes, leaving file as is");
            return Ok(false);
        }

        let original = self.original;
        let failed = |source: std::io::Error| FintError::FixFailed {
            path: original.clone(),
            source,
        };

        let temp = self
            .writer
            .into_inner()
            .map_err(|e| failed(e.into_error()))?;
        temp.as_file().sync_all().map_err(failed)?;

        let permissions = fs::metadata(&original).map_err(failed)?.permissions();
        fs::set_permissions(temp.path(), permissions).map_err(failed)?;

        temp.persist(&original).map_err(|e| failed(e.error))?;
        debug!(file = %original.display(), "Fixed file written");
        Ok(true)
    }

    fn failed(&self, source: std::io::Error) -> FintError {
        FintError::FixFailed {
            path: self.original.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::line_source::{LineSource, Terminator};
    use tempfile::TempDir;

    fn source_lines(path: &Path) -> Vec<SourceLine> {
        LineSource::open(path, 4096)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_commit_replaces_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.m");
        fs::write(&path, "}else{\r\nok\nlast").unwrap();

        let lines = source_lines(&path);
        let mut shadow = ShadowFile::create(&path).unwrap();
        shadow.write_line(&lines[0], Some("} else {")).unwrap();
        shadow.write_line(&lines[1], None).unwrap();
        shadow.write_line(&lines[2], None).unwrap();
        assert!(shadow.is_changed());
        assert!(shadow.commit().unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "} else {\r\nok\nlast");
        // Only the original remains in the directory
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_unchanged_file_is_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.m");
        fs::write(&path, b"caf\xe9\n").unwrap();

        let lines = source_lines(&path);
        assert_eq!(lines[0].terminator, Terminator::Lf);
        let mut shadow = ShadowFile::create(&path).unwrap();
        shadow.write_line(&lines[0], None).unwrap();
        assert!(!shadow.commit().unwrap());

        assert_eq!(fs::read(&path).unwrap(), b"caf\xe9\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_dropped_shadow_leaves_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.m");
        fs::write(&path, "\tx\n").unwrap();

        let lines = source_lines(&path);
        {
            let mut shadow = ShadowFile::create(&path).unwrap();
            shadow.write_line(&lines[0], Some("    x")).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "\tx\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_are_kept() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.sh");
        fs::write(&path, "\techo\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let lines = source_lines(&path);
        let mut shadow = ShadowFile::create(&path).unwrap();
        shadow.write_line(&lines[0], Some("  echo")).unwrap();
        shadow.commit().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_target_is_rewritten() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("shared");
        fs::create_dir(&real).unwrap();
        let target = real.join("real.m");
        fs::write(&target, "\tx\n").unwrap();
        let link = dir.path().join("link.m");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let lines = source_lines(&link);
        let mut shadow = ShadowFile::create(&link).unwrap();
        shadow.write_line(&lines[0], Some("  x")).unwrap();
        assert!(shadow.commit().unwrap());

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), target);
        assert_eq!(fs::read_to_string(&target).unwrap(), "  x\n");
        // The shadow file was created and renamed beside the target
        assert_eq!(fs::read_dir(&real).unwrap().count(), 1);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_create_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = ShadowFile::create(&dir.path().join("gone.m")).unwrap_err();
        assert!(matches!(err, FintError::FixFailed { .. }));
    }
}
