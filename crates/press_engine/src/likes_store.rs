use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use press_core::LikeBook;
use press_logging::press_warn;
use thiserror::Error;

use crate::persist::{write_atomic, PersistError};

/// Key the like book is stored under.
pub const LIKES_KEY: &str = "articleLikes";

#[derive(Debug, Error)]
pub enum LikeStorageError {
    #[error("cannot read likes: {0}")]
    Read(#[from] io::Error),
    #[error("cannot encode likes: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("cannot write likes: {0}")]
    Write(#[from] PersistError),
    #[error("like storage is unusable after a panic in another thread")]
    Poisoned,
}

/// Local key-value storage for the visitor's like book.
pub trait LikeStorage: Send + Sync {
    fn load(&self) -> Result<LikeBook, LikeStorageError>;
    fn save(&self, book: &LikeBook) -> Result<(), LikeStorageError>;
}

/// Like book kept as `{dir}/articleLikes.json`.
#[derive(Debug, Clone)]
pub struct FileLikeStorage {
    path: PathBuf,
}

impl FileLikeStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(format!("{LIKES_KEY}.json")),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl LikeStorage for FileLikeStorage {
    fn load(&self) -> Result<LikeBook, LikeStorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(LikeBook::new()),
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_str::<LikeBook>(&raw) {
            Ok(book) => Ok(book.normalized()),
            Err(err) => {
                press_warn!(
                    "Ignoring unreadable like data in {}: {}",
                    self.path.display(),
                    err
                );
                Ok(LikeBook::new())
            }
        }
    }

    fn save(&self, book: &LikeBook) -> Result<(), LikeStorageError> {
        let json = serde_json::to_string(book)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryLikeStorage {
    book: Mutex<LikeBook>,
}

impl MemoryLikeStorage {
    pub fn new(book: LikeBook) -> Self {
        Self {
            book: Mutex::new(book),
        }
    }

    /// Current contents, including after a poisoned lock.
    pub fn snapshot(&self) -> LikeBook {
        match self.book.lock() {
            Ok(book) => book.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LikeStorage for MemoryLikeStorage {
    fn load(&self) -> Result<LikeBook, LikeStorageError> {
        let book = self.book.lock().map_err(|_| LikeStorageError::Poisoned)?;
        Ok(book.clone())
    }

    fn save(&self, book: &LikeBook) -> Result<(), LikeStorageError> {
        let mut stored = self.book.lock().map_err(|_| LikeStorageError::Poisoned)?;
        *stored = book.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_corrupt_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileLikeStorage::new(dir.path());
        assert!(storage.load().unwrap().is_empty());

        fs::write(storage.path(), "{not json").unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn poisoned_memory_storage_reports_errors() {
        let storage = std::sync::Arc::new(MemoryLikeStorage::default());
        let holder = storage.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.book.lock().unwrap();
            panic!("writer crashed");
        })
        .join();

        let mut book = LikeBook::new();
        book.toggle("post", "u1");
        assert!(matches!(storage.save(&book), Err(LikeStorageError::Poisoned)));
        assert!(matches!(storage.load(), Err(LikeStorageError::Poisoned)));
        assert!(storage.snapshot().is_empty());
    }

    #[test]
    fn saved_book_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileLikeStorage::new(dir.path());
        let mut book = LikeBook::new();
        book.toggle("post", "u1");
        storage.save(&book).unwrap();
        assert_eq!(storage.load().unwrap(), book);
    }
}
