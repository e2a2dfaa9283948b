//! Persistence store for the book catalog.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the catalog.
//! - Keep file format and I/O details out of the service layer.
//!
//! # Invariants
//! - `save` always writes the complete sequence; there are no partial writes.
//! - `load` on a missing backing file yields an empty catalog, never an error.
//! - A present but unreadable or undecodable document is an error, never an
//!   empty catalog.

use crate::model::book::Book;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod json_file;
mod memory;

pub use json_file::{JsonFileBookStore, DEFAULT_LIBRARY_FILE};
pub use memory::MemoryBookStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for catalog load/save.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file exists but cannot be read, or cannot be written.
    Unavailable { path: PathBuf, source: io::Error },
    /// Document is not a JSON array of records.
    MalformedDocument { path: PathBuf, message: String },
    /// One array element does not decode into a valid book.
    MalformedRecord {
        path: PathBuf,
        index: usize,
        message: String,
    },
    /// In-memory records could not be serialized.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { path, source } => {
                write!(f, "library file `{}` is unavailable: {source}", path.display())
            }
            Self::MalformedDocument { path, message } => write!(
                f,
                "library file `{}` is not a record array: {message}",
                path.display()
            ),
            Self::MalformedRecord {
                path,
                index,
                message,
            } => write!(
                f,
                "malformed record #{index} in library file `{}`: {message}",
                path.display()
            ),
            Self::Encode(err) => write!(f, "failed to encode library: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } => Some(source),
            Self::MalformedDocument { .. } => None,
            Self::MalformedRecord { .. } => None,
            Self::Encode(err) => Some(err),
        }
    }
}

/// Whole-collection persistence contract.
///
/// Implementations assume a single process and a single writer.
pub trait BookStore {
    fn load(&self) -> StoreResult<Vec<Book>>;
    fn save(&self, books: &[Book]) -> StoreResult<()>;
}
