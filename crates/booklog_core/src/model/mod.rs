//! Domain model for the personal book catalog.
//!
//! # Responsibility
//! - Define the canonical book record shared by store and catalog layers.
//! - Keep the genre set closed so search and statistics stay well-defined.
//!
//! # Invariants
//! - Books carry no identity beyond their field values.
//! - A decoded or constructed `Book` always has a non-empty title.

pub mod book;
