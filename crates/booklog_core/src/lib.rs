//! Core domain logic for booklog, a personal book catalog.
//! This crate owns every catalog invariant; drivers only call into it.

pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookValidationError, Genre, NewBook};
pub use search::substring::{search_books, SearchField, SearchQuery};
pub use service::catalog_service::{
    Catalog, CatalogError, CatalogErrorKind, CatalogResult, CatalogStats,
};
pub use store::{
    BookStore, JsonFileBookStore, MemoryBookStore, StoreError, StoreResult, DEFAULT_LIBRARY_FILE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
