//! Catalog use-case service.
//!
//! # Responsibility
//! - Hold the ordered in-memory book list for one driver.
//! - Provide add/remove/search/list/statistics entry points.
//! - Flush the full list to the store after every mutation.
//!
//! # Invariants
//! - Insertion order is preserved and is the display order.
//! - Duplicate titles are allowed; `remove` drops every exact match.
//! - A mutation is committed in memory only after its flush succeeds, so a
//!   failed save leaves memory and disk in agreement.

use crate::model::book::{Book, BookValidationError, NewBook};
use crate::search::substring::{search_books, SearchQuery};
use crate::store::{BookStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Coarse error class reported to drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// Backing file present but unreadable, or not writable.
    StorageUnavailable,
    /// Stored data does not match the book shape.
    MalformedRecord,
    /// Add input rejected before mutation.
    InvalidField,
}

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    InvalidField(BookValidationError),
    Store(StoreError),
}

impl CatalogError {
    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            Self::InvalidField(_) => CatalogErrorKind::InvalidField,
            Self::Store(StoreError::MalformedDocument { .. })
            | Self::Store(StoreError::MalformedRecord { .. }) => CatalogErrorKind::MalformedRecord,
            Self::Store(StoreError::Unavailable { .. }) | Self::Store(StoreError::Encode(_)) => {
                CatalogErrorKind::StorageUnavailable
            }
        }
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField(err) => write!(f, "invalid book field: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<BookValidationError> for CatalogError {
    fn from(value: BookValidationError) -> Self {
        Self::InvalidField(value)
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Read-progress summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogStats {
    pub total: usize,
    pub read_count: usize,
    /// `None` for an empty catalog.
    pub percent_read: Option<f64>,
}

impl CatalogStats {
    fn from_books(books: &[Book]) -> Self {
        let total = books.len();
        let read_count = books.iter().filter(|book| book.read).count();
        let percent_read = if total == 0 {
            None
        } else {
            Some(read_count as f64 * 100.0 / total as f64)
        };
        Self {
            total,
            read_count,
            percent_read,
        }
    }

    /// Percentage with one decimal, e.g. `66.7%`.
    pub fn percent_read_label(&self) -> Option<String> {
        self.percent_read.map(|percent| format!("{percent:.1}%"))
    }
}

/// Book catalog bound to one store.
///
/// Owned by the driver; there is no shared or global catalog state.
pub struct Catalog<S: BookStore> {
    store: S,
    books: Vec<Book>,
}

impl<S: BookStore> Catalog<S> {
    /// Loads the catalog through `store`.
    ///
    /// Load errors are returned unchanged; a missing file is an empty catalog.
    pub fn open(store: S) -> CatalogResult<Self> {
        let books = store.load()?;
        info!(
            "event=catalog_open module=service status=ok count={}",
            books.len()
        );
        Ok(Self { store, books })
    }

    /// Appends a validated book and flushes.
    ///
    /// # Contract
    /// - Invalid input returns `InvalidField` and leaves the catalog untouched.
    /// - No uniqueness check; the new record is always last.
    pub fn add(&mut self, request: NewBook) -> CatalogResult<&Book> {
        let book = request.into_book().inspect_err(|err| {
            info!(
                "event=book_add module=service status=rejected reason={}",
                err.code()
            );
        })?;

        self.books.push(book);
        if let Err(err) = self.flush("book_add") {
            self.books.pop();
            return Err(err);
        }

        info!(
            "event=book_add module=service status=ok count={}",
            self.books.len()
        );
        let index = self.books.len() - 1;
        Ok(&self.books[index])
    }

    /// Removes every book whose title equals `title` exactly, then flushes.
    ///
    /// Returns how many books were removed; zero is not an error.
    pub fn remove(&mut self, title: &str) -> CatalogResult<usize> {
        let kept: Vec<Book> = self
            .books
            .iter()
            .filter(|book| book.title != title)
            .cloned()
            .collect();
        let removed = self.books.len() - kept.len();

        self.store.save(&kept).map_err(|err| {
            error!(
                "event=book_remove module=service status=error error_code=flush_failed error={err}"
            );
            CatalogError::from(err)
        })?;
        self.books = kept;

        info!(
            "event=book_remove module=service status=ok removed={} count={}",
            removed,
            self.books.len()
        );
        Ok(removed)
    }

    /// Case-insensitive substring search on the selected field.
    ///
    /// An empty query returns no results.
    pub fn search(&self, query: &SearchQuery) -> Vec<&Book> {
        search_books(&self.books, query)
    }

    /// All books in insertion order.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Books paired with their 1-based display position.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &Book)> + '_ {
        self.books
            .iter()
            .enumerate()
            .map(|(index, book)| (index + 1, book))
    }

    /// Titles in catalog order, duplicates included.
    pub fn titles(&self) -> Vec<&str> {
        self.books.iter().map(|book| book.title.as_str()).collect()
    }

    pub fn statistics(&self) -> CatalogStats {
        CatalogStats::from_books(&self.books)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn flush(&self, event: &str) -> CatalogResult<()> {
        self.store.save(&self.books).map_err(|err| {
            error!(
                "event={event} module=service status=error error_code=flush_failed error={err}"
            );
            CatalogError::from(err)
        })
    }
}
