//! JSON file store.
//!
//! # Responsibility
//! - Read and write the catalog as one JSON array document.
//! - Replace the file atomically on save.
//!
//! # Invariants
//! - Saves go through a temp file in the target directory followed by a
//!   rename, so a crash mid-write leaves the previous document intact.
//! - Log events carry counts and paths only, never record contents.

use super::{BookStore, StoreError, StoreResult};
use crate::model::book::Book;
use log::{error, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// File name used when the driver does not configure one.
pub const DEFAULT_LIBRARY_FILE: &str = "library.txt";

/// Store bound to one library file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileBookStore {
    path: PathBuf,
}

impl JsonFileBookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileBookStore {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_FILE)
    }
}

impl BookStore for JsonFileBookStore {
    /// Loads every record from the backing file.
    ///
    /// # Errors
    /// - `Unavailable` when the file exists but cannot be read.
    /// - `MalformedDocument` when the content is not a JSON array
    ///   (an empty file included).
    /// - `MalformedRecord` for the first element that fails to decode.
    fn load(&self) -> StoreResult<Vec<Book>> {
        let started_at = Instant::now();

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=library_load module=store status=ok source=missing count=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=library_load module=store status=error error_code=read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(StoreError::Unavailable {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        match decode_document(&self.path, &bytes) {
            Ok(books) => {
                info!(
                    "event=library_load module=store status=ok source=file count={} bytes={} duration_ms={}",
                    books.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(books)
            }
            Err(err) => {
                error!(
                    "event=library_load module=store status=error error_code=decode_failed path={} error={}",
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Replaces the backing file with the full sequence.
    ///
    /// Creates the parent directory when missing.
    fn save(&self, books: &[Book]) -> StoreResult<()> {
        let started_at = Instant::now();

        match write_document(&self.path, books) {
            Ok(written) => {
                info!(
                    "event=library_save module=store status=ok count={} bytes={} duration_ms={}",
                    books.len(),
                    written,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=library_save module=store status=error error_code=write_failed path={} error={}",
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn decode_document(path: &Path, bytes: &[u8]) -> StoreResult<Vec<Book>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_slice(bytes).map_err(|err| StoreError::MalformedDocument {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<Book>(value).map_err(|err| StoreError::MalformedRecord {
                path: path.to_path_buf(),
                index,
                message: err.to_string(),
            })
        })
        .collect()
}

fn write_document(path: &Path, books: &[Book]) -> StoreResult<usize> {
    let payload = serde_json::to_vec_pretty(books).map_err(StoreError::Encode)?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|source| unavailable(&parent, source))?;

    let mut staged = NamedTempFile::new_in(&parent).map_err(|source| unavailable(path, source))?;
    staged
        .write_all(&payload)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|source| unavailable(path, source))?;
    staged
        .persist(path)
        .map_err(|err| unavailable(path, err.error))?;

    Ok(payload.len())
}

fn unavailable(path: &Path, source: io::Error) -> StoreError {
    StoreError::Unavailable {
        path: path.to_path_buf(),
        source,
    }
}
