//! Substring search over book fields.
//!
//! # Responsibility
//! - Match a query against one selected field, ignoring case.
//!
//! # Invariants
//! - Results keep catalog order; there is no ranking.
//! - An empty query matches nothing.
//! - The query is matched verbatim apart from case; whitespace is significant.

use crate::model::book::Book;
use std::fmt::{Display, Formatter};

/// Field a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    fn value_of(self, book: &Book) -> &str {
        match self {
            SearchField::Title => book.title.as_str(),
            SearchField::Author => book.author.as_str(),
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchField::Title => f.write_str("Title"),
            SearchField::Author => f.write_str("Author"),
        }
    }
}

/// Search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub field: SearchField,
    /// Raw user text, matched as typed.
    pub text: String,
}

impl SearchQuery {
    pub fn new(field: SearchField, text: impl Into<String>) -> Self {
        Self {
            field,
            text: text.into(),
        }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::new(SearchField::Title, text)
    }

    pub fn author(text: impl Into<String>) -> Self {
        Self::new(SearchField::Author, text)
    }

    /// Whether this query would match nothing regardless of the catalog.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Returns books whose selected field contains the query, ignoring case.
///
/// Returns an empty list for an empty query.
pub fn search_books<'a>(books: &'a [Book], query: &SearchQuery) -> Vec<&'a Book> {
    if query.is_blank() {
        return Vec::new();
    }
    let needle = query.text.to_lowercase();

    books
        .iter()
        .filter(|book| {
            query
                .field
                .value_of(book)
                .to_lowercase()
                .contains(needle.as_str())
        })
        .collect()
}
