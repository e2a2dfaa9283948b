//! In-process store without durability.

use super::{BookStore, StoreResult};
use crate::model::book::Book;
use std::cell::RefCell;

/// Keeps the last saved snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RefCell<Vec<Book>>,
}

impl MemoryBookStore {
    /// Creates a store whose first `load` returns `books`.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RefCell::new(books),
        }
    }

    /// Returns a copy of the last saved snapshot.
    pub fn snapshot(&self) -> Vec<Book> {
        self.books.borrow().clone()
    }
}

impl BookStore for MemoryBookStore {
    fn load(&self) -> StoreResult<Vec<Book>> {
        Ok(self.snapshot())
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        *self.books.borrow_mut() = books.to_vec();
        Ok(())
    }
}
