use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("output path has no file name: {0}")]
    NoFileName(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file in
/// the same directory and renaming it over the target. A failed write leaves
/// any previous file untouched.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Writer for the directory holding `target`, plus the file name to pass
    /// to [`AtomicFileWriter::write`].
    pub fn for_target(target: &Path) -> Result<(Self, String), PersistError> {
        let filename = target
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| PersistError::NoFileName(target.display().to_string()))?
            .to_string();
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok((Self::new(dir), filename))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_output_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

/// Atomically replace the file at `target`.
pub fn write_atomic(target: &Path, content: &str) -> Result<PathBuf, PersistError> {
    let (writer, filename) = AtomicFileWriter::for_target(target)?;
    writer.write(&filename, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = AtomicFileWriter::new(dir.path().join("nested"));
        writer.write("a.json", "first").unwrap();
        let path = writer.write("a.json", "second").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
        let entries = fs::read_dir(writer.dir()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn output_dir_that_is_a_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            ensure_output_dir(&file),
            Err(PersistError::OutputDir(_))
        ));
    }

    #[test]
    fn bare_file_name_targets_current_dir() {
        let (writer, name) = AtomicFileWriter::for_target(Path::new("posts.json")).unwrap();
        assert_eq!(writer.dir(), Path::new("."));
        assert_eq!(name, "posts.json");
    }
}
